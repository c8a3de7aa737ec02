//! Parsing of loosely-typed user input (path ids, form numbers, dates).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

/// A number that may arrive as a JSON number or as text from a form field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

/// Parse a project id taken from a URL path.
pub fn parse_project_id(raw: &str) -> Result<DbId, CoreError> {
    match raw.trim().parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::Validation("Invalid project ID".into())),
    }
}

/// Parse a task index taken from a form field or URL path.
pub fn parse_task_index(raw: &str) -> Result<usize, CoreError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| CoreError::Validation(format!("Invalid task index '{}'", raw.trim())))
}

/// Parse a weight. Any finite number is accepted, negative included.
pub fn parse_weight(input: &NumberInput) -> Result<f64, CoreError> {
    let value = match input {
        NumberInput::Number(n) => *n,
        NumberInput::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| CoreError::Validation("Weight must be a valid number".into()))?,
    };
    if !value.is_finite() {
        return Err(CoreError::Validation("Weight must be a valid number".into()));
    }
    Ok(value)
}

/// Parse an ISO purchase date: `YYYY-MM-DD`, or a full ISO timestamp whose
/// date part is used.
pub fn parse_purchase_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp.date_naive());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(stamp.date());
    }
    Err(CoreError::Validation(format!(
        "Invalid purchase date '{raw}'. Expected YYYY-MM-DD"
    )))
}
