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

use crate::CustomerService;
use crate::models::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};

/// OpenAPI documentation for the customer endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_customers, create_customer, get_customer, update_customer, delete_customer),
    components(
        schemas(Customer, CreateCustomer, UpdateCustomer),
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
        (name = "Customers", description = "Customer management")
    )
)]
pub struct ApiDoc;

pub fn router<R: Repository<Customer> + 'static>(service: CustomerService<R>) -> Router {
    Router::new()
        .route("/", get(list_customers::<R>).post(create_customer::<R>))
        .route(
            "/{id}",
            get(get_customer::<R>)
                .patch(update_customer::<R>)
                .delete(delete_customer::<R>),
        )
        .with_state(Arc::new(service))
}

/// List customers
#[utoipa::path(
    get,
    path = "",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(ListQuery, CustomerFilter),
    responses(
        (status = 200, description = "One page of customers", body = Paged<Customer>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_customers<R: Repository<Customer>>(
    State(service): State<Arc<CustomerService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
    ValidatedQuery(filter): ValidatedQuery<CustomerFilter>,
) -> CrudResult<Json<Paged<Customer>>> {
    let page = service.list(&filter, &query).await?;
    Ok(Json(page))
}

/// Create a customer
#[utoipa::path(
    post,
    path = "",
    tag = "Customers",
    security(("bearer_auth" = [])),
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created", body = Single<Customer>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_customer<R: Repository<Customer>>(
    State(service): State<Arc<CustomerService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCustomer>,
) -> CrudResult<impl IntoResponse> {
    let customer = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(Single::new(customer))))
}

/// Get a customer by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Customer id (24-hex ObjectId)")),
    responses(
        (status = 200, description = "Customer found", body = Single<Customer>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_customer<R: Repository<Customer>>(
    State(service): State<Arc<CustomerService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CrudResult<Json<Single<Customer>>> {
    let customer = service.get(id).await?;
    Ok(Json(Single::new(customer)))
}

/// Update a customer
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Customer id (24-hex ObjectId)")),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated", body = Single<Customer>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_customer<R: Repository<Customer>>(
    State(service): State<Arc<CustomerService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<UpdateCustomer>,
) -> CrudResult<Json<Single<Customer>>> {
    let customer = service.update(id, input).await?;
    Ok(Json(Single::new(customer)))
}

/// Delete a customer
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Customer id (24-hex ObjectId)")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_customer<R: Repository<Customer>>(
    State(service): State<Arc<CustomerService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CrudResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
