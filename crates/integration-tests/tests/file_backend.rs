//! The file backend keeps data across server restarts.

#![allow(clippy::unwrap_used)]

use corner_store_integration_tests::{ADMIN, TestServer, temp_data_dir, with_query};
use serde_json::Value;

#[tokio::test]
async fn test_data_survives_restart() {
    let dir = temp_data_dir();

    let created: Value = {
        let server = TestServer::with_data_dir(&dir).await;
        let mut params = ADMIN.to_vec();
        params.extend([("name", "чашка"), ("price", "4.5")]);
        let response = server
            .client
            .post(server.url(&with_query("/items", &params)))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        response.json().await.unwrap()
    };

    let server = TestServer::with_data_dir(&dir).await;
    let body: Value = server
        .client
        .get(server.url("/items"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["items"][0], created);

    // Admin was seeded once; restarting must not duplicate or reset it.
    let response = server
        .client
        .post(server.url(&with_query(
            "/items",
            &[
                ADMIN[0],
                ADMIN[1],
                ("name", "блюдце"),
                ("price", "2"),
            ],
        )))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    drop(server);
    std::fs::remove_dir_all(&dir).unwrap();
}
