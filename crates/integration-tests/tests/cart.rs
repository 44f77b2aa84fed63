//! Cart, checkout and order history over HTTP.

#![allow(clippy::unwrap_used)]

use corner_store_integration_tests::{ADMIN, TestServer, with_query};
use serde_json::{Value, json};

const EMAIL: &str = "test@example.com";

async fn create_item(server: &TestServer, name: &str, price: &str) -> Value {
    let mut params = ADMIN.to_vec();
    params.extend([("name", name), ("price", price)]);
    let response = server
        .client
        .post(server.url(&with_query("/items", &params)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    response.json().await.unwrap()
}

async fn add_to_cart(server: &TestServer, item_id: &str) -> u16 {
    server
        .client
        .post(server.url(&with_query(
            "/cart",
            &[("email", EMAIL), ("item_id", item_id)],
        )))
        .send()
        .await
        .unwrap()
        .status()
        .as_u16()
}

async fn get_cart(server: &TestServer) -> Value {
    server
        .client
        .get(server.url(&format!("/cart/{EMAIL}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_cart_get_empty() {
    let server = TestServer::start().await;
    assert_eq!(get_cart(&server).await, json!({"email": EMAIL, "items": []}));
}

#[tokio::test]
async fn test_cart_get_invalid_email() {
    let server = TestServer::start().await;
    let response = server
        .client
        .get(server.url("/cart/hello!"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_cart_add_unknown_item() {
    let server = TestServer::start().await;
    let status = add_to_cart(&server, &uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_cart_add_and_remove() {
    let server = TestServer::start().await;
    let item = create_item(&server, "ложка", "1.2").await;
    let id = item["id"].as_str().unwrap();

    assert_eq!(add_to_cart(&server, id).await, 204);
    assert_eq!(get_cart(&server).await["items"], json!([item]));

    let response = server
        .client
        .delete(server.url(&format!("/cart/{EMAIL}/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
    assert_eq!(get_cart(&server).await, json!({"email": EMAIL, "items": []}));

    let response = server
        .client
        .delete(server.url(&format!("/cart/{EMAIL}/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_checkout_cart_is_empty() {
    let server = TestServer::start().await;
    let response = server
        .client
        .post(server.url(&with_query("/checkout", &[("email", EMAIL)])))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 428);
}

#[tokio::test]
async fn test_checkout_ok() {
    let server = TestServer::start().await;
    let spoon = create_item(&server, "ложка", "1.2").await;
    let fork = create_item(&server, "вилка", "0.85").await;
    add_to_cart(&server, spoon["id"].as_str().unwrap()).await;
    add_to_cart(&server, fork["id"].as_str().unwrap()).await;

    let response = server
        .client
        .post(server.url(&with_query("/checkout", &[("email", EMAIL)])))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let order: Value = response.json().await.unwrap();
    assert_eq!(order["email"], EMAIL);
    assert_eq!(order["items"], json!([spoon, fork]));
    assert_eq!(order["total"], json!(2.05));

    assert_eq!(get_cart(&server).await["items"], json!([]));

    let history: Value = server
        .client
        .get(server.url(&format!("/orders/{EMAIL}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history["orders"][0]["id"], order["id"]);
}
