use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
};
use crud::{Repository, Single};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AuthResult;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, Role, User, UserResponse};
use crate::service::AuthService;

/// OpenAPI documentation for the auth endpoints
#[derive(OpenApi)]
#[openapi(
    paths(register, login, me),
    components(
        schemas(AuthResponse, LoginRequest, RegisterRequest, Role, UserResponse),
        responses(
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and the current account")
    )
)]
pub struct ApiDoc;

/// Routes that do not need a token: register and login
pub fn router<R: Repository<User> + 'static>(service: AuthService<R>) -> Router {
    Router::new()
        .route("/auth/register", post(register::<R>))
        .route("/auth/login", post(login::<R>))
        .with_state(Arc::new(service))
}

/// `/auth/me`; expects the auth middleware to have inserted a [`UserResponse`]
pub fn protected_router() -> Router {
    Router::new().route("/auth/me", get(me))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: Repository<User>>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AuthResult<impl IntoResponse> {
    let response = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: Repository<User>>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AuthResult<Json<AuthResponse>> {
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// The account behind the bearer token
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = Single<UserResponse>),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn me(Extension(user): Extension<UserResponse>) -> Json<Single<UserResponse>> {
    Json(Single::new(user))
}
