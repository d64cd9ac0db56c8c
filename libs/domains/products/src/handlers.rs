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
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use crud::{CrudResult, ListQuery, Paged, Repository, Single};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::ProductService;
use crate::models::{
    CreateProduct, Currency, Product, ProductFilter, ProductPrice, ProductVariant, UpdateProduct,
    VariantAttribute,
};

/// OpenAPI documentation for the product endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, get_product, update_product, delete_product),
    components(
        schemas(
            Product,
            CreateProduct,
            UpdateProduct,
            ProductVariant,
            ProductPrice,
            VariantAttribute,
            Currency
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            BadRequestQueryResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Products with variants and prices")
    )
)]
pub struct ApiDoc;

pub fn router<R: Repository<Product> + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(list_products::<R>).post(create_product::<R>))
        .route(
            "/{id}",
            get(get_product::<R>)
                .patch(update_product::<R>)
                .delete(delete_product::<R>),
        )
        .with_state(Arc::new(service))
}

/// List products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(ListQuery, ProductFilter),
    responses(
        (status = 200, description = "One page of products", body = Paged<Product>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: Repository<Product>>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
    ValidatedQuery(filter): ValidatedQuery<ProductFilter>,
) -> CrudResult<Json<Paged<Product>>> {
    let page = service.list(&filter, &query).await?;
    Ok(Json(page))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Single<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: Repository<Product>>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CrudResult<impl IntoResponse> {
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(Single::new(product))))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Product id (24-hex ObjectId)")),
    responses(
        (status = 200, description = "Product found", body = Single<Product>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: Repository<Product>>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CrudResult<Json<Single<Product>>> {
    let product = service.get(id).await?;
    Ok(Json(Single::new(product)))
}

/// Update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Product id (24-hex ObjectId)")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Single<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: Repository<Product>>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> CrudResult<Json<Single<Product>>> {
    let product = service.update(id, input).await?;
    Ok(Json(Single::new(product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Product id (24-hex ObjectId)")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: Repository<Product>>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CrudResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
