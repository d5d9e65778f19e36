//! Mock create/update records.
//!
//! Nothing here is persisted. A record is built from the validated payload,
//! echoed back, and dropped.

use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Alcoholic;

/// Length of the random base-36 suffix on generated ids.
const ID_SUFFIX_LEN: usize = 9;

#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("system clock is before the Unix epoch: {0}")]
    Clock(#[from] SystemTimeError),
}

/// Body of `POST /drinks` and `PATCH /drinks/{id}`, after validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DrinkPayload {
    pub name: String,
    pub category: String,
    pub alcoholic: Alcoholic,
    pub glass: String,
    pub instructions: String,
    pub ingredients: Vec<IngredientPayload>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngredientPayload {
    pub name: String,
    #[serde(default)]
    pub measure: Option<String>,
}

/// The echoed-back representation of a created or updated drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub alcoholic: Alcoholic,
    pub glass: String,
    pub instructions: String,
    pub ingredients: Vec<IngredientRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
}

/// Trimmed, with blank strings dropped.
fn trimmed_opt(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl DrinkRecord {
    pub fn from_payload(id: String, payload: &DrinkPayload, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: payload.name.trim().to_string(),
            category: payload.category.trim().to_string(),
            alcoholic: payload.alcoholic,
            glass: payload.glass.trim().to_string(),
            instructions: payload.instructions.trim().to_string(),
            ingredients: payload
                .ingredients
                .iter()
                .map(|ingredient| IngredientRecord {
                    name: ingredient.name.trim().to_string(),
                    measure: trimmed_opt(ingredient.measure.as_deref()),
                })
                .collect(),
            image: trimmed_opt(payload.image.as_deref()),
            created_at: format_timestamp(created_at),
        }
    }
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2026-01-01T00:00:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `drink_<unix ms>_<9 random base-36 chars>`.
pub fn generate_drink_id() -> Result<String, MutationError> {
    let millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
        .collect();
    Ok(format!("drink_{millis}_{suffix}"))
}
