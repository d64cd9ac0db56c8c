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
use domain_offers::LineItem;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::OrderService;
use crate::models::{CreateOrder, Order, OrderFilter, OrderStatus, PaymentStatus, UpdateOrder};

/// OpenAPI documentation for the order endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_orders, create_order, get_order, update_order, delete_order),
    components(
        schemas(Order, CreateOrder, UpdateOrder, LineItem, OrderStatus, PaymentStatus),
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
        (name = "Orders", description = "Sales orders; numbers are assigned as SO-<year>-<seq>")
    )
)]
pub struct ApiDoc;

pub fn router<R: Repository<Order> + 'static>(service: OrderService<R>) -> Router {
    Router::new()
        .route("/", get(list_orders::<R>).post(create_order::<R>))
        .route(
            "/{id}",
            get(get_order::<R>)
                .patch(update_order::<R>)
                .delete(delete_order::<R>),
        )
        .with_state(Arc::new(service))
}

/// List orders
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(ListQuery, OrderFilter),
    responses(
        (status = 200, description = "One page of orders, with the page size", body = Paged<Order>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: Repository<Order>>(
    State(service): State<Arc<OrderService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
    ValidatedQuery(filter): ValidatedQuery<OrderFilter>,
) -> CrudResult<Json<Paged<Order>>> {
    let page = service.list(&filter, &query).await?;
    Ok(Json(page))
}

/// Create an order
///
/// Any `orderNumber` in the body is ignored; the next free number for the
/// current year is assigned.
#[utoipa::path(
    post,
    path = "",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = Single<Order>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R: Repository<Order>>(
    State(service): State<Arc<OrderService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> CrudResult<impl IntoResponse> {
    let order = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(Single::new(order))))
}

/// Get an order by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Order id (24-hex ObjectId)")),
    responses(
        (status = 200, description = "Order found", body = Single<Order>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: Repository<Order>>(
    State(service): State<Arc<OrderService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CrudResult<Json<Single<Order>>> {
    let order = service.get(id).await?;
    Ok(Json(Single::new(order)))
}

/// Update an order
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Order id (24-hex ObjectId)")),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Order updated", body = Single<Order>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order<R: Repository<Order>>(
    State(service): State<Arc<OrderService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<UpdateOrder>,
) -> CrudResult<Json<Single<Order>>> {
    let order = service.update(id, input).await?;
    Ok(Json(Single::new(order)))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Order id (24-hex ObjectId)")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<R: Repository<Order>>(
    State(service): State<Arc<OrderService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CrudResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
