//! API routes
//!
//! `/auth/register` and `/auth/login` are open. Everything else under the
//! record mounts, plus `/auth/me`, sits behind the bearer token middleware.

pub mod customers;
pub mod health;
pub mod offers;
pub mod orders;
pub mod products;

use axum::{Router, middleware::from_fn_with_state};
use axum_helpers::{AuthState, jwt_auth_middleware};
use crud::MongoRepository;
use domain_users::{AuthService, User, handlers as auth};
use std::sync::Arc;

use crate::state::AppState;

type UserAuth = AuthService<MongoRepository<User>>;

/// Create all API routes, mounted at the root
pub fn routes(state: &AppState) -> Router {
    let auth_service: UserAuth =
        AuthService::new(MongoRepository::new(&state.db), state.jwt.clone());
    let auth_state = AuthState::new(state.jwt.clone(), Arc::new(auth_service.clone()));

    let protected = Router::new()
        .nest("/customer", customers::router(state))
        .nest("/product", products::router(state))
        .nest("/offer", offers::router(state))
        .nest("/order", orders::router(state))
        .merge(auth::protected_router())
        .route_layer(from_fn_with_state(
            auth_state,
            jwt_auth_middleware::<UserAuth>,
        ));

    Router::new()
        .merge(auth::router(auth_service))
        .merge(protected)
        .merge(health::router(state.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::{JwtAuth, JwtConfig};
    use crud::Repository;
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use mongodb::Client;
    use serde_json::{Value, json};
    use test_utils::{
        TestDataBuilder, TestMongo,
        assertions::{assert_object_id, assert_some},
    };
    use tower::ServiceExt;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn state(client: Client, database: &str) -> AppState {
        let jwt_config = JwtConfig::new(SECRET).unwrap();
        AppState {
            config: Config {
                app: app_info!(),
                mongodb: MongoConfig::with_database("mongodb://localhost:27017", database),
                server: ServerConfig::default(),
                jwt: jwt_config.clone(),
                environment: Environment::Development,
            },
            db: client.database(database),
            mongo_client: client,
            jwt: JwtAuth::new(&jwt_config),
        }
    }

    /// The driver connects lazily, so this never touches a server as long
    /// as the request is rejected before reaching a repository.
    async fn offline_app() -> Router {
        let client = Client::with_uri_str("mongodb://localhost:27017").await.unwrap();
        routes(&state(client, "offline"))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, token: &str) -> Request<Body> {
        Request::get(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_record_routes_require_a_token() {
        let app = offline_app().await;
        for uri in ["/customer", "/product", "/offer", "/order", "/auth/me"] {
            let (status, body) = send(&app, Request::get(uri).body(Body::empty()).unwrap()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body["message"], "No token provided");
        }
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let app = offline_app().await;
        let (status, body) = send(&app, get("/customer", "not.a.jwt")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_register_validates_before_touching_the_store() {
        let app = offline_app().await;
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/auth/register",
                None,
                json!({"email": "not-an-email", "password": "123"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_customer_scenario_end_to_end() {
        let mongo = TestMongo::new().await;
        let builder = TestDataBuilder::from_test_name("test_customer_scenario_end_to_end");
        let app = routes(&state(mongo.client(), &builder.name("db", "e2e")));
        let email = builder.email("ada");

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/auth/register",
                None,
                json!({"email": email.to_uppercase(), "password": "secret1", "name": "Ada"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["email"], email.as_str());

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/auth/login",
                None,
                json!({"email": email, "password": "secret1"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["accessToken"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get("/auth/me", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["email"], email.as_str());
        assert!(body["result"].get("password").is_none());

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/customer",
                Some(&token),
                json!({"firstName": "John", "lastName": "Doe"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["result"]["isActive"], true);
        let id = assert_some(body["result"]["_id"].as_str(), "customer id").to_string();
        assert_object_id(&id, "customer id");

        let (status, body) = send(&app, get("/customer?search=John", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["_id"], id.as_str());

        let delete = Request::delete(format!("/customer/{id}"))
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, delete).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, get(&format!("/customer/{id}"), &token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_order_numbers_increase_within_a_year() {
        let mongo = TestMongo::new().await;
        let builder = TestDataBuilder::from_test_name("test_order_numbers_increase_within_a_year");
        let db_name = builder.name("db", "orders");
        let client = mongo.client();
        let db = client.database(&db_name);
        let orders = MongoRepository::<domain_orders::Order>::new(&db);
        orders.create_indexes(domain_orders::indexes()).await.unwrap();
        let jwt = JwtAuth::new(&JwtConfig::new(SECRET).unwrap());
        let app = routes(&state(client, &db_name));

        let user = User::new(&builder.email("ops"), "unused".into(), None);
        let token = jwt
            .create_token(&user.id, &user.email, &user.role.to_string())
            .unwrap();
        MongoRepository::<User>::new(&db).insert(user).await.unwrap();

        let customer_id = builder.object_id();
        let body = json!({
            "customerId": customer_id.to_hex(),
            "date": "2026-05-10",
            "status": "draft",
            "currency": "TRY",
            "paymentStatus": "unpaid",
            "items": []
        });

        let mut numbers = Vec::new();
        for _ in 0..3 {
            let (status, created) =
                send(&app, json_request("POST", "/order", Some(&token), body.clone())).await;
            assert_eq!(status, StatusCode::CREATED);
            numbers.push(created["result"]["orderNumber"].as_str().unwrap().to_string());
        }

        assert!(numbers[0].ends_with("-001"));
        assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));

        let stored = orders
            .find_many(
                mongodb::bson::doc! {
                    "customerId": customer_id,
                    "date": mongodb::bson::DateTime::parse_rfc3339_str("2026-05-10T00:00:00Z").unwrap(),
                },
                crud::FindSpec::latest_by("orderNumber"),
            )
            .await
            .unwrap();
        let latest = assert_some(stored.first(), "orders by native customer id and date");
        assert_eq!(latest.order_number, numbers[2]);
    }
}
