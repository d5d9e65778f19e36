use axum::{
    extract::{rejection::QueryRejection, FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::Drink;
use crate::drinks::mutation::{generate_drink_id, DrinkPayload, DrinkRecord};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

pub const SEARCH_EXAMPLE: &str = "/drinks?search=margarita";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Drink id from the last path segment.
///
/// Prefers the `{id}` capture; static siblings such as `/drinks/random`
/// have none, so the raw segment is used there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkId(pub String);

impl<S> FromRequestParts<S> for DrinkId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Ok(Path(id)) = Path::<String>::from_request_parts(parts, state).await {
            return Ok(DrinkId(id));
        }
        parts
            .uri
            .path()
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(|segment| DrinkId(segment.to_string()))
            .ok_or_else(|| ApiError::bad_request("Drink id is required"))
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<Drink>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DrinkResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

/// `GET /drinks?search=<term>`
pub async fn search_drinks(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = query.map_err(|rejection| ApiError::BadRequest {
        message: rejection.body_text(),
        example: Some(SEARCH_EXAMPLE),
    })?;
    let term = match params.search.as_deref() {
        Some(term) if !term.is_empty() => term,
        _ => {
            return Err(ApiError::BadRequest {
                message: "Search parameter is required".to_string(),
                example: Some(SEARCH_EXAMPLE),
            });
        }
    };

    tracing::debug!(term, "Searching drinks");
    let drinks = state.catalog.search(term)?;

    Ok(Json(SearchResponse {
        success: true,
        message: format!("Found {} drinks for search term: \"{}\"", drinks.len(), term),
        total: drinks.len(),
        data: drinks,
    }))
}

/// `GET /drinks/random`
pub async fn random_drink(
    State(state): State<AppState>,
) -> Result<Json<DrinkResponse<Drink>>, ApiError> {
    let drink = state
        .catalog
        .random_drink()
        .ok_or_else(|| ApiError::NotFound("No drinks available".to_string()))?;

    Ok(Json(DrinkResponse {
        success: true,
        message: None,
        data: drink,
    }))
}

/// `POST /drinks`
pub async fn create_drink(
    Extension(payload): Extension<DrinkPayload>,
) -> Result<(StatusCode, Json<DrinkResponse<DrinkRecord>>), ApiError> {
    let id = generate_drink_id().map_err(|e| ApiError::internal("Failed to create drink", e))?;
    let record = DrinkRecord::from_payload(id, &payload, Utc::now());

    tracing::info!(id = %record.id, name = %record.name, created_at = %record.created_at, "Mock drink created");
    metrics::record_mutation("create");

    Ok((
        StatusCode::CREATED,
        Json(DrinkResponse {
            success: true,
            message: Some("Drink created successfully".to_string()),
            data: record,
        }),
    ))
}

/// `PATCH /drinks/{id}`. The id is not checked against anything.
pub async fn update_drink(
    DrinkId(id): DrinkId,
    Extension(payload): Extension<DrinkPayload>,
) -> Json<DrinkResponse<DrinkRecord>> {
    let record = DrinkRecord::from_payload(id, &payload, Utc::now());

    tracing::info!(id = %record.id, name = %record.name, "Mock drink updated");
    metrics::record_mutation("update");

    Json(DrinkResponse {
        success: true,
        message: Some("Drink updated successfully".to_string()),
        data: record,
    })
}

/// `DELETE /drinks/{id}`. Acknowledges without checking existence.
pub async fn delete_drink(DrinkId(id): DrinkId) -> Json<AckResponse> {
    tracing::info!(%id, "Mock drink deleted");
    metrics::record_mutation("delete");

    Json(AckResponse {
        success: true,
        message: format!("Drink with ID {id} deleted successfully"),
    })
}
