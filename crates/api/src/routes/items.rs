//! Catalog route handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use corner_store_core::{Email, ItemId, Price, Role};

use super::views::{ItemView, ItemsView};
use crate::error::{Result, set_sentry_user};
use crate::models::{ItemChanges, NewItem};
use crate::services::{AuthService, CatalogService, Credentials};
use crate::state::AppState;

/// Query for `POST /items`.
#[derive(Deserialize)]
pub struct CreateItemQuery {
    pub email: Email,
    pub password: String,
    pub name: String,
    pub description: Option<String>,
    /// Major units.
    pub price: Decimal,
}

/// Query for `PUT /items/{item_id}`. Absent fields are left unchanged.
#[derive(Deserialize)]
pub struct ChangeItemQuery {
    pub email: Email,
    pub password: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

/// List the catalog.
///
/// GET /items
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<ItemsView>> {
    let items = CatalogService::new(state.repos()).list_items().await?;
    Ok(Json(ItemsView::new(&items)))
}

/// Create an item. Requires an admin.
///
/// POST /items
#[instrument(skip(state, query))]
pub async fn create(
    State(state): State<AppState>,
    query: std::result::Result<Query<CreateItemQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ItemView>)> {
    let Query(query) = query?;
    let price = Price::from_major(query.price)?;

    let credentials = Credentials {
        email: query.email,
        password: query.password,
    };
    let user = AuthService::new(state.repos())
        .authorize(&credentials, Role::Admin)
        .await?;
    set_sentry_user(&user.id, user.email.as_str());

    let item = CatalogService::new(state.repos())
        .create_item(NewItem {
            name: query.name,
            description: query.description,
            price,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ItemView::from(&item))))
}

/// Change an item. Requires a manager or admin.
///
/// PUT /items/{item_id}
#[instrument(skip(state, query))]
pub async fn update(
    State(state): State<AppState>,
    item_id: std::result::Result<Path<ItemId>, PathRejection>,
    query: std::result::Result<Query<ChangeItemQuery>, QueryRejection>,
) -> Result<StatusCode> {
    let Path(item_id) = item_id?;
    let Query(query) = query?;
    let price = query.price.map(Price::from_major).transpose()?;

    let credentials = Credentials {
        email: query.email,
        password: query.password,
    };
    let user = AuthService::new(state.repos())
        .authorize(&credentials, Role::Manager)
        .await?;
    set_sentry_user(&user.id, user.email.as_str());

    CatalogService::new(state.repos())
        .change_item(
            item_id,
            ItemChanges {
                name: query.name,
                description: query.description,
                price,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Method;
    use serde_json::json;

    use crate::routes::testing::{TestApp, query};

    const ADMIN: [(&str, &str); 2] = [("email", "admin@example.com"), ("password", "god")];
    const MANAGER: [(&str, &str); 2] = [("email", "ivan@example.com"), ("password", "test")];

    fn create_uri(credentials: [(&str, &str); 2], price: &str) -> String {
        let mut params = credentials.to_vec();
        params.extend([("name", "ложка"), ("price", price)]);
        format!("/items?{}", query(&params))
    }

    #[tokio::test]
    async fn test_create_item() {
        let app = TestApp::seeded().await;
        let (status, body) = app.send(Method::POST, &create_uri(ADMIN, "1.2")).await;
        assert_eq!(status, 201);
        assert_eq!(body["name"], "ложка");
        assert_eq!(body["description"], json!(null));
        assert_eq!(body["price"], json!(1.2));

        let (status, body) = app.send(Method::GET, "/items").await;
        assert_eq!(status, 200);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_item_auth_failures() {
        let app = TestApp::seeded().await;

        let user = [("email", "vasya@example.com"), ("password", "")];
        let (status, body) = app.send(Method::POST, &create_uri(user, "1.2")).await;
        assert_eq!(status, 401);
        assert_eq!(body["detail"], "Unauthorized user");

        let wrong = [("email", "admin@example.com"), ("password", "123")];
        let (status, _) = app.send(Method::POST, &create_uri(wrong, "1.2")).await;
        assert_eq!(status, 401);

        let (status, body) = app.send(Method::POST, &create_uri(MANAGER, "1.2")).await;
        assert_eq!(status, 403);
        assert_eq!(body["detail"], "Forbidden resource");
    }

    #[tokio::test]
    async fn test_create_item_rejects_bad_input() {
        let app = TestApp::seeded().await;
        let (status, body) = app.send(Method::POST, &create_uri(ADMIN, "test")).await;
        assert_eq!(status, 422);
        assert!(body["detail"].is_string());

        let (status, _) = app.send(Method::POST, &create_uri(ADMIN, "-5")).await;
        assert_eq!(status, 422);

        let uri = format!("/items?{}", query(&[("price", "1.2")]));
        let (status, _) = app.send(Method::POST, &uri).await;
        assert_eq!(status, 422);
    }

    #[tokio::test]
    async fn test_change_item() {
        let app = TestApp::seeded().await;
        let (_, created) = app.send(Method::POST, &create_uri(ADMIN, "1.2")).await;
        let id = created["id"].as_str().unwrap();

        let mut params = MANAGER.to_vec();
        params.push(("description", "hello"));
        let uri = format!("/items/{id}?{}", query(&params));
        let (status, _) = app.send(Method::PUT, &uri).await;
        assert_eq!(status, 204);

        let (_, body) = app.send(Method::GET, "/items").await;
        assert_eq!(
            body["items"][0],
            json!({"id": id, "name": "ложка", "description": "hello", "price": 1.2})
        );
    }

    #[tokio::test]
    async fn test_change_item_errors() {
        let app = TestApp::seeded().await;
        let missing = uuid::Uuid::new_v4();

        let uri = format!("/items/{missing}?{}", query(&MANAGER));
        let (status, body) = app.send(Method::PUT, &uri).await;
        assert_eq!(status, 404);
        assert_eq!(body["detail"], "item not found");

        let uri = format!("/items/not-a-uuid?{}", query(&MANAGER));
        let (status, _) = app.send(Method::PUT, &uri).await;
        assert_eq!(status, 422);

        let user = [("email", "vasya@example.com"), ("password", "")];
        let uri = format!("/items/{missing}?{}", query(&user));
        let (status, _) = app.send(Method::PUT, &uri).await;
        assert_eq!(status, 401);
    }

    #[tokio::test]
    async fn test_change_item_rejects_bad_price() {
        let app = TestApp::seeded().await;
        let (_, created) = app.send(Method::POST, &create_uri(ADMIN, "1.2")).await;
        let id = created["id"].as_str().unwrap();

        for price in ["test", "-5"] {
            let mut params = MANAGER.to_vec();
            params.push(("price", price));
            let uri = format!("/items/{id}?{}", query(&params));
            let (status, body) = app.send(Method::PUT, &uri).await;
            assert_eq!(status, 422, "{price}");
            assert!(body["detail"].is_string());
        }

        let (_, body) = app.send(Method::GET, "/items").await;
        assert_eq!(body["items"][0]["price"], json!(1.2));
    }
}
