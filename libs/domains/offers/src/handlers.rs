use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ObjectIdPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestQueryResponse, BadRequestValidationResponse,
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use crud::{CrudResult, ListQuery, Paged, Repository, Single};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::OfferService;
use crate::models::{CreateOffer, LineItem, Offer, OfferFilter, OfferStatus, UpdateOffer};

/// OpenAPI documentation for the offer endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_offers, create_offer, get_offer, update_offer, delete_offer),
    components(
        schemas(Offer, CreateOffer, UpdateOffer, LineItem, OfferStatus),
        responses(
            NotFoundResponse,
            ConflictResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            BadRequestQueryResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Offers", description = "Price offers sent to customers")
    )
)]
pub struct ApiDoc;

pub fn router<R: Repository<Offer> + 'static>(service: OfferService<R>) -> Router {
    Router::new()
        .route("/", get(list_offers::<R>).post(create_offer::<R>))
        .route(
            "/{id}",
            get(get_offer::<R>)
                .patch(update_offer::<R>)
                .delete(delete_offer::<R>),
        )
        .with_state(Arc::new(service))
}

/// List offers
#[utoipa::path(
    get,
    path = "",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(ListQuery, OfferFilter),
    responses(
        (status = 200, description = "One page of offers, with the page size", body = Paged<Offer>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_offers<R: Repository<Offer>>(
    State(service): State<Arc<OfferService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
    ValidatedQuery(filter): ValidatedQuery<OfferFilter>,
) -> CrudResult<Json<Paged<Offer>>> {
    let page = service.list(&filter, &query).await?;
    Ok(Json(page))
}

/// Create an offer
#[utoipa::path(
    post,
    path = "",
    tag = "Offers",
    security(("bearer_auth" = [])),
    request_body = CreateOffer,
    responses(
        (status = 201, description = "Offer created", body = Single<Offer>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_offer<R: Repository<Offer>>(
    State(service): State<Arc<OfferService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateOffer>,
) -> CrudResult<impl IntoResponse> {
    let offer = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(Single::new(offer))))
}

/// Get an offer by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Offer id (24-hex ObjectId)")),
    responses(
        (status = 200, description = "Offer found", body = Single<Offer>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_offer<R: Repository<Offer>>(
    State(service): State<Arc<OfferService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CrudResult<Json<Single<Offer>>> {
    let offer = service.get(id).await?;
    Ok(Json(Single::new(offer)))
}

/// Update an offer
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Offer id (24-hex ObjectId)")),
    request_body = UpdateOffer,
    responses(
        (status = 200, description = "Offer updated", body = Single<Offer>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_offer<R: Repository<Offer>>(
    State(service): State<Arc<OfferService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<UpdateOffer>,
) -> CrudResult<Json<Single<Offer>>> {
    let offer = service.update(id, input).await?;
    Ok(Json(Single::new(offer)))
}

/// Delete an offer
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Offer id (24-hex ObjectId)")),
    responses(
        (status = 204, description = "Offer deleted"),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_offer<R: Repository<Offer>>(
    State(service): State<Arc<OfferService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CrudResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
