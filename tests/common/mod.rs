//! Shared utilities for the integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{body::Body, http::Request, response::Response};
use drinks_api::{DrinksConfig, HttpServer, Shutdown};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const ADMIN_KEY: &str = "admin-api-key-123456";
pub const BARTENDER_KEY: &str = "bartender-api-key-789012";
pub const CUSTOMER_KEY: &str = "customer-api-key-345678";

pub fn valid_drink() -> Value {
    json!({
        "name": "  Paloma  ",
        "category": "Cocktail",
        "alcoholic": "Alcoholic",
        "glass": "Highball glass",
        "instructions": "Build over ice and top with grapefruit soda.",
        "ingredients": [
            { "name": "Tequila", "measure": "2 oz" },
            { "name": "Grapefruit soda" }
        ]
    })
}

pub fn bearer(credential: &str) -> String {
    format!("Bearer {credential}")
}

pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(credential) = auth {
        builder = builder.header("authorization", bearer(credential));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(credential) = auth {
        builder = builder.header("authorization", bearer(credential));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Serve `config` on an ephemeral port. Trigger the returned handle to stop it.
pub async fn spawn_server(config: DrinksConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        server.run(listener, rx).await.unwrap();
    });

    (addr, shutdown)
}
