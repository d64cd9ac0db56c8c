//! Handler tests for the orders domain

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Datelike, Utc};
use crud::MockRepository;
use domain_orders::*;
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn create_body() -> Value {
    json!({
        "customerId": "507f1f77bcf86cd799439011",
        "sourceOfferId": "507f1f77bcf86cd799439013",
        "date": "2026-05-10T09:00:00Z",
        "status": "confirmed",
        "currency": "EUR",
        "paymentStatus": "unpaid",
        "items": [{
            "productId": "507f1f77bcf86cd799439012",
            "productName": "Koltuk",
            "quantity": 3,
            "unitPrice": 100.0,
            "totalPrice": 300.0
        }]
    })
}

fn order(number: &str) -> Order {
    Order::new(
        serde_json::from_value(create_body()).unwrap(),
        number.to_string(),
    )
}

#[tokio::test]
async fn test_create_order_assigns_next_number() {
    let year = Utc::now().year();
    let latest = order(&format!("SO-{year}-009"));

    let mut repo = MockRepository::<Order>::new();
    repo.expect_find_many()
        .times(1)
        .returning(move |_, _| Ok(vec![latest.clone()]));
    repo.expect_find_one().returning(|_| Ok(None));
    repo.expect_insert().returning(Ok);
    let app = handlers::router(OrderService::new(repo));

    let mut body = create_body();
    body["orderNumber"] = json!("SO-1999-500");
    let response = app.oneshot(json_request("POST", "/", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["result"]["orderNumber"], format!("SO-{year}-010"));
    assert_eq!(body["result"]["sourceOfferId"], "507f1f77bcf86cd799439013");
    assert_eq!(body["result"]["items"][0]["quantity"], 3);
}

#[tokio::test]
async fn test_create_order_accepts_date_only_values() {
    let mut repo = MockRepository::<Order>::new();
    repo.expect_find_many().returning(|_, _| Ok(vec![]));
    repo.expect_find_one().returning(|_| Ok(None));
    repo.expect_insert().returning(Ok);
    let app = handlers::router(OrderService::new(repo));

    let mut body = create_body();
    body["date"] = json!("2025-12-03");
    body["deliveryDate"] = json!("2025-12-17");
    let response = app.oneshot(json_request("POST", "/", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["result"]["date"], "2025-12-03T00:00:00Z");
    assert_eq!(body["result"]["deliveryDate"], "2025-12-17T00:00:00Z");
    assert_eq!(body["result"]["customerId"], "507f1f77bcf86cd799439011");
}

#[tokio::test]
async fn test_create_order_with_malformed_date_is_400() {
    let mut repo = MockRepository::<Order>::new();
    repo.expect_insert().never();
    let app = handlers::router(OrderService::new(repo));

    let mut body = create_body();
    body["date"] = json!("12/03/2025");
    let response = app.oneshot(json_request("POST", "/", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_order_with_date_only_value() {
    let existing = order("SO-2026-001");
    let id = existing.id.clone();
    let mut repo = MockRepository::<Order>::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    repo.expect_find_one().never();
    repo.expect_replace().returning(|o| Ok(Some(o)));
    let app = handlers::router(OrderService::new(repo));

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/{id}"),
            json!({"approvedAt": "2026-06-01"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["result"]["approvedAt"], "2026-06-01T00:00:00Z");
    assert_eq!(body["result"]["date"], "2026-05-10T09:00:00Z");
}

#[tokio::test]
async fn test_create_order_with_bad_source_offer_id_is_400() {
    let mut repo = MockRepository::<Order>::new();
    repo.expect_find_many().never();
    repo.expect_insert().never();
    let app = handlers::router(OrderService::new(repo));

    let mut body = create_body();
    body["sourceOfferId"] = json!("offer-1");
    let response = app.oneshot(json_request("POST", "/", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_order_with_unknown_payment_status_is_400() {
    let app = handlers::router(OrderService::new(MockRepository::<Order>::new()));

    let mut body = create_body();
    body["paymentStatus"] = json!("overdue");
    let response = app.oneshot(json_request("POST", "/", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_orders_filters_by_payment_status() {
    let mut repo = MockRepository::<Order>::new();
    repo.expect_find_many()
        .withf(|filter, spec| {
            filter.get_str("paymentStatus").ok() == Some("partially_paid")
                && filter.get_object_id("customerId").ok()
                    == ObjectId::parse_str("507f1f77bcf86cd799439011").ok()
                && spec.skip == 10
                && spec.limit == 10
        })
        .returning(|_, _| Ok(vec![order("SO-2026-001")]));
    repo.expect_count().returning(|_| Ok(11));
    let app = handlers::router(OrderService::new(repo));

    let response = app
        .oneshot(
            Request::get(
                "/?paymentStatus=partially_paid&customerId=507f1f77bcf86cd799439011&page=1",
            )
            .body(Body::empty())
            .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["count"], 11);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["results"][0]["orderNumber"], "SO-2026-001");
}

#[tokio::test]
async fn test_list_orders_with_malformed_customer_id_is_400() {
    let mut repo = MockRepository::<Order>::new();
    repo.expect_find_many().never();
    let app = handlers::router(OrderService::new(repo));

    let response = app
        .oneshot(Request::get("/?customerId=abc").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_order_to_taken_number_is_409() {
    let existing = order("SO-2026-001");
    let id = existing.id.clone();
    let mut repo = MockRepository::<Order>::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    repo.expect_find_one()
        .returning(|_| Ok(Some(order("SO-2026-002"))));
    repo.expect_replace().never();
    let app = handlers::router(OrderService::new(repo));

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/{id}"),
            json!({"orderNumber": "SO-2026-002"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Order with this number already exists");
}

#[tokio::test]
async fn test_update_order_status() {
    let existing = order("SO-2026-001");
    let id = existing.id.clone();
    let mut repo = MockRepository::<Order>::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    repo.expect_find_one().never();
    repo.expect_replace().returning(|o| Ok(Some(o)));
    let app = handlers::router(OrderService::new(repo));

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/{id}"),
            json!({"status": "shipped", "paymentStatus": "paid"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["result"]["status"], "shipped");
    assert_eq!(body["result"]["paymentStatus"], "paid");
    assert_eq!(body["result"]["orderNumber"], "SO-2026-001");
}

#[tokio::test]
async fn test_delete_missing_order_is_404() {
    let mut repo = MockRepository::<Order>::new();
    repo.expect_delete().returning(|_| Ok(false));
    let app = handlers::router(OrderService::new(repo));

    let response = app
        .oneshot(
            Request::delete("/507f1f77bcf86cd799439011")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Order not found");
}
