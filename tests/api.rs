//! Request-level tests driven through the fully layered router.

mod common;

use axum::{body::Body, http::Request, http::StatusCode, Router};
use drinks_api::catalog::CatalogService;
use drinks_api::config::WindowConfig;
use drinks_api::{DrinksConfig, HttpServer};
use serde_json::json;
use tower::ServiceExt;

use common::*;

fn app() -> Router {
    HttpServer::new(DrinksConfig::default()).router()
}

fn app_with(config: DrinksConfig) -> Router {
    HttpServer::new(config).router()
}

#[tokio::test]
async fn test_search_finds_margarita() {
    let response = app()
        .oneshot(get_request("/drinks?search=margarita", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["idDrink"], "11007");
    assert_eq!(body["data"][0]["strDrink"], "Margarita");
    assert_eq!(
        body["message"],
        "Found 1 drinks for search term: \"margarita\""
    );
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_may_be_empty() {
    let response = app()
        .oneshot(get_request("/drinks?search=OLD", None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["strDrink"], "Old Fashioned");

    let response = app()
        .oneshot(get_request("/drinks?search=mojito", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_search_requires_term() {
    for uri in ["/drinks", "/drinks?search="] {
        let response = app().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let body = body_json(response).await;
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["message"], "Search parameter is required");
        assert_eq!(body["example"], "/drinks?search=margarita");
    }

    // Whitespace passes the presence check but not the catalog.
    let response = app()
        .oneshot(get_request("/drinks?search=%20%20", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Search term is required");
}

#[tokio::test]
async fn test_random_drink() {
    let response = app()
        .oneshot(get_request("/drinks/random", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["strDrink"], "Margarita");
}

#[tokio::test]
async fn test_random_drink_on_empty_catalog() {
    let app = HttpServer::with_catalog(DrinksConfig::default(), CatalogService::new(Vec::new())).router();
    let response = app.oneshot(get_request("/drinks/random", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "No drinks available");
}

#[tokio::test]
async fn test_create_drink() {
    let response = app()
        .oneshot(json_request("POST", "/drinks", Some(ADMIN_KEY), &valid_drink()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Drink created successfully");
    assert!(body["data"]["id"].as_str().unwrap().starts_with("drink_"));
    assert_eq!(body["data"]["name"], "Paloma");
    assert_eq!(body["data"]["ingredients"][0]["measure"], "2 oz");
    assert!(body["data"]["ingredients"][1].get("measure").is_none());
    assert!(body["data"]["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_create_allowed_for_bartender() {
    let response = app()
        .oneshot(json_request("POST", "/drinks", Some(BARTENDER_KEY), &valid_drink()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let response = app()
        .oneshot(json_request("POST", "/drinks", None, &valid_drink()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["message"], "Authorization header is required");
    assert!(body["hint"].is_string());

    let response = app()
        .oneshot(json_request("POST", "/drinks", Some("wrong-key"), &valid_drink()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid API key");

    let request = Request::builder()
        .method("POST")
        .uri("/drinks")
        .header("authorization", format!("Token {ADMIN_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(valid_drink().to_string()))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid authorization format");
}

#[tokio::test]
async fn test_create_forbidden_for_customer() {
    let response = app()
        .oneshot(json_request("POST", "/drinks", Some(CUSTOMER_KEY), &valid_drink()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Forbidden");
    assert_eq!(body["message"], "Insufficient permissions. Required: write");
    assert_eq!(body["userPermissions"], json!(["read"]));
}

#[tokio::test]
async fn test_create_reports_every_validation_error() {
    let payload = json!({
        "name": "",
        "category": "Cocktail",
        "alcoholic": "Sometimes",
        "glass": "Coupe",
        "instructions": "Shake.",
        "ingredients": [{ "measure": 2 }]
    });
    let response = app()
        .oneshot(json_request("POST", "/drinks", Some(ADMIN_KEY), &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        body["details"],
        json!([
            "Name is required and must be a non-empty string",
            r#"Alcoholic must be one of: "Alcoholic", "Non alcoholic", "Optional alcohol""#,
            "Ingredient 1: name is required and must be a non-empty string",
            "Ingredient 1: measure must be a string if provided",
        ])
    );
}

#[tokio::test]
async fn test_invalid_json_is_a_validation_failure() {
    let request = Request::builder()
        .method("POST")
        .uri("/drinks")
        .header("authorization", bearer(ADMIN_KEY))
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"].as_array().unwrap().len() >= 6);
}

#[tokio::test]
async fn test_update_keeps_path_id() {
    let response = app()
        .oneshot(json_request(
            "PATCH",
            "/drinks/drink_42",
            Some(BARTENDER_KEY),
            &valid_drink(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Drink updated successfully");
    assert_eq!(body["data"]["id"], "drink_42");
}

#[tokio::test]
async fn test_delete_requires_delete_permission() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/drinks/abc")
                .header("authorization", bearer(ADMIN_KEY))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Drink with ID abc deleted successfully");

    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/drinks/abc")
                .header("authorization", bearer(BARTENDER_KEY))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Insufficient permissions. Required: delete");
}

#[tokio::test]
async fn test_random_is_a_valid_mutation_id() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/drinks/random")
                .header("authorization", bearer(ADMIN_KEY))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Drink with ID random deleted successfully");

    let response = app()
        .oneshot(json_request(
            "PATCH",
            "/drinks/random",
            Some(ADMIN_KEY),
            &valid_drink(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], "random");

    // Still guarded like any other id.
    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/drinks/random")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unregistered_method_is_json_404() {
    for (method, uri) in [("PUT", "/drinks/abc"), ("PUT", "/drinks"), ("POST", "/")] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");

        let body = body_json(response).await;
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], format!("Route {method} {uri} not found"));
    }
}

#[tokio::test]
async fn test_malformed_query_is_json_400() {
    let response = app()
        .oneshot(get_request("/drinks?search=a&search=b", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["example"], "/drinks?search=margarita");
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let mut config = DrinksConfig::default();
    config.security.max_body_size = 64;

    // No content-length header, so the limit trips while the body is read.
    let response = app_with(config)
        .oneshot(json_request("POST", "/drinks", Some(ADMIN_KEY), &valid_drink()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Payload Too Large");
}

#[tokio::test]
async fn test_rate_limit_headers_and_rejection() {
    let mut config = DrinksConfig::default();
    config.rate_limit.search = WindowConfig::new(60_000, 2, "Slow down");
    let app = app_with(config);

    for remaining in ["1", "0"] {
        let response = app
            .clone()
            .oneshot(get_request("/drinks?search=margarita", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-ratelimit-limit"], "2");
        assert_eq!(response.headers()["x-ratelimit-remaining"], remaining);
        assert!(response.headers().contains_key("x-ratelimit-reset"));
    }

    let response = app
        .clone()
        .oneshot(get_request("/drinks?search=margarita", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()["x-ratelimit-remaining"], "0");
    assert!(response.headers().contains_key("retry-after"));

    let body = body_json(response).await;
    assert_eq!(body["error"], "Rate limit exceeded");
    assert_eq!(body["message"], "Slow down");
    assert!(body["retryAfter"].as_u64().unwrap() >= 1);

    // Other limiters keep their own counts.
    let response = app
        .oneshot(get_request("/drinks/random", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limit_runs_before_authentication() {
    let mut config = DrinksConfig::default();
    config.rate_limit.write = WindowConfig::new(60_000, 1, "Too many writes");
    let app = app_with(config);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/drinks", None, &valid_drink()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(json_request("POST", "/drinks", Some(ADMIN_KEY), &valid_drink()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_disabled_rate_limiting_omits_headers() {
    let mut config = DrinksConfig::default();
    config.rate_limit.enabled = false;
    let response = app_with(config)
        .oneshot(get_request("/drinks?search=margarita", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key("x-ratelimit-limit"));
}

#[tokio::test]
async fn test_issue_token() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/auth/token",
            None,
            &json!({ "username": "bartender" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "bartender");
    assert_eq!(body["data"]["apiKey"], BARTENDER_KEY);
    assert_eq!(body["data"]["token"], "mock-jwt-user_2");

    let response = app()
        .oneshot(json_request(
            "POST",
            "/auth/token",
            None,
            &json!({ "username": "nobody" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app()
        .oneshot(json_request("POST", "/auth/token", None, &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users_requires_staff_token() {
    let response = app()
        .oneshot(get_request("/auth/users", Some("mock-jwt-user_1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"][0]["username"], "admin");
    assert!(body["data"][0].get("apiKey").is_none());

    let response = app()
        .oneshot(get_request("/auth/users", Some("mock-jwt-user_3")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Insufficient role. Required: admin or moderator");
    assert_eq!(body["userRole"], "user");

    let response = app()
        .oneshot(get_request("/auth/users", Some(ADMIN_KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid token format");
    assert!(body.get("hint").is_none());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let response = app()
        .oneshot(get_request("/cocktails", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "Route GET /cocktails not found");
}

#[tokio::test]
async fn test_landing_page_and_common_headers() {
    let response = app().oneshot(get_request("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("Drinks API"));
}

#[tokio::test]
async fn test_client_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/drinks/random")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
