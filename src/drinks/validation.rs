//! Drink payload validation.
//!
//! Validation works on the raw JSON so that every problem can be reported
//! at once, including type mismatches a typed deserializer would stop at.

use axum::{
    body::{self, Body},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use serde_json::Value;

use crate::catalog::Alcoholic;
use crate::drinks::mutation::DrinkPayload;
use crate::http::error::ApiError;

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_INSTRUCTIONS_CHARS: usize = 1000;

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn is_absent_or_string(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null) | Some(Value::String(_)))
}

/// Every violation in `payload`; empty means valid.
pub fn validate_drink_payload(payload: &Value) -> Vec<String> {
    let mut errors = Vec::new();
    let field = |name: &str| payload.get(name);

    if non_empty_str(field("name")).is_none() {
        errors.push("Name is required and must be a non-empty string".to_string());
    }

    if non_empty_str(field("category")).is_none() {
        errors.push("Category is required and must be a non-empty string".to_string());
    }

    if field("alcoholic")
        .and_then(Value::as_str)
        .and_then(Alcoholic::parse)
        .is_none()
    {
        errors.push(
            r#"Alcoholic must be one of: "Alcoholic", "Non alcoholic", "Optional alcohol""#
                .to_string(),
        );
    }

    if non_empty_str(field("glass")).is_none() {
        errors.push("Glass type is required and must be a non-empty string".to_string());
    }

    if non_empty_str(field("instructions")).is_none() {
        errors.push("Instructions are required and must be a non-empty string".to_string());
    }

    match field("ingredients").and_then(Value::as_array) {
        Some(ingredients) if !ingredients.is_empty() => {
            for (index, ingredient) in ingredients.iter().enumerate() {
                let n = index + 1;
                if non_empty_str(ingredient.get("name")).is_none() {
                    errors.push(format!(
                        "Ingredient {n}: name is required and must be a non-empty string"
                    ));
                }
                if !is_absent_or_string(ingredient.get("measure")) {
                    errors.push(format!("Ingredient {n}: measure must be a string if provided"));
                }
            }
        }
        _ => errors.push("Ingredients are required and must be a non-empty array".to_string()),
    }

    if !is_absent_or_string(field("image")) {
        errors.push("Image must be a string if provided".to_string());
    }

    if let Some(name) = field("name").and_then(Value::as_str) {
        if name.chars().count() > MAX_NAME_CHARS {
            errors.push(format!("Name must be {MAX_NAME_CHARS} characters or less"));
        }
    }

    if let Some(instructions) = field("instructions").and_then(Value::as_str) {
        if instructions.chars().count() > MAX_INSTRUCTIONS_CHARS {
            errors.push(format!(
                "Instructions must be {MAX_INSTRUCTIONS_CHARS} characters or less"
            ));
        }
    }

    errors
}

/// Whether a body read failed because the body limit layer cut it off.
fn exceeds_body_limit(error: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return true;
        }
        source = err.source();
    }
    false
}

/// Buffers the body, validates it, and attaches the typed [`DrinkPayload`].
pub async fn validate_drink_middleware(request: Request<Body>, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) if exceeds_body_limit(&e) => return ApiError::PayloadTooLarge.into_response(),
        Err(e) => {
            return ApiError::bad_request(format!("Failed to read request body: {e}"))
                .into_response();
        }
    };

    // Unparseable bodies are validated as if empty.
    let value: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    let errors = validate_drink_payload(&value);
    if !errors.is_empty() {
        tracing::debug!(violations = errors.len(), path = %parts.uri.path(), "Drink payload rejected");
        return ApiError::Validation(errors).into_response();
    }

    let payload: DrinkPayload = match serde_json::from_value(value) {
        Ok(payload) => payload,
        Err(e) => return ApiError::Validation(vec![e.to_string()]).into_response(),
    };

    let mut request = Request::from_parts(parts, Body::from(bytes));
    request.extensions_mut().insert(payload);
    next.run(request).await
}
