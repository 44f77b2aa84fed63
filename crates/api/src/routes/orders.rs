//! Checkout and order history handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use corner_store_core::Email;

use super::views::{OrderView, OrdersView};
use crate::error::Result;
use crate::services::CheckoutService;
use crate::state::AppState;

/// Query for `POST /checkout`.
#[derive(Debug, Deserialize)]
pub struct CheckoutQuery {
    pub email: Email,
}

/// Place an order for everything in the cart and empty it.
///
/// POST /checkout
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    query: std::result::Result<Query<CheckoutQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<OrderView>)> {
    let Query(query) = query?;
    let order = CheckoutService::new(state.repos())
        .checkout(&query.email)
        .await?;
    Ok((StatusCode::CREATED, Json(OrderView::from(&order))))
}

/// Orders placed for an email, oldest first.
///
/// GET /orders/{email}
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    email: std::result::Result<Path<Email>, PathRejection>,
) -> Result<Json<OrdersView>> {
    let Path(email) = email?;
    let orders = CheckoutService::new(state.repos())
        .orders_for(&email)
        .await?;
    Ok(Json(OrdersView {
        orders: orders.iter().map(OrderView::from).collect(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Method;
    use serde_json::json;

    use crate::routes::testing::{TestApp, query};

    const EMAIL: &str = "test@example.com";

    #[tokio::test]
    async fn test_checkout_empty_cart() {
        let app = TestApp::seeded().await;
        let uri = format!("/checkout?{}", query(&[("email", EMAIL)]));
        let (status, body) = app.send(Method::POST, &uri).await;
        assert_eq!(status, 428);
        assert_eq!(body["detail"], "cart is empty");
    }

    #[tokio::test]
    async fn test_checkout_invalid_email() {
        let app = TestApp::seeded().await;
        let (status, _) = app.send(Method::POST, "/checkout?email=test").await;
        assert_eq!(status, 422);
    }

    #[tokio::test]
    async fn test_checkout() {
        let app = TestApp::seeded().await;
        let item = app.create_item("ложка", "1.2").await;
        let id = item["id"].as_str().unwrap();
        let add = format!("/cart?{}", query(&[("email", EMAIL), ("item_id", id)]));
        app.send(Method::POST, &add).await;
        app.send(Method::POST, &add).await;

        let uri = format!("/checkout?{}", query(&[("email", EMAIL)]));
        let (status, order) = app.send(Method::POST, &uri).await;
        assert_eq!(status, 201);
        assert_eq!(order["email"], EMAIL);
        assert_eq!(order["items"], json!([item, item]));
        assert_eq!(order["total"], json!(2.4));

        let (_, cart) = app.send(Method::GET, &format!("/cart/{EMAIL}")).await;
        assert_eq!(cart["items"], json!([]));

        let (status, history) = app.send(Method::GET, &format!("/orders/{EMAIL}")).await;
        assert_eq!(status, 200);
        assert_eq!(history["orders"].as_array().unwrap().len(), 1);
        assert_eq!(history["orders"][0]["id"], order["id"]);
    }

    #[tokio::test]
    async fn test_orders_empty_history() {
        let app = TestApp::seeded().await;
        let (status, body) = app.send(Method::GET, &format!("/orders/{EMAIL}")).await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({"orders": []}));
    }

    #[tokio::test]
    async fn test_orders_invalid_email() {
        let app = TestApp::seeded().await;
        let (status, body) = app.send(Method::GET, "/orders/test").await;
        assert_eq!(status, 422);
        assert!(body["detail"].is_string());
    }
}
