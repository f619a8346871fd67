use serde::Serialize;

use crate::error::ApiError;

/// Parse a path id; anything other than a positive integer is a 400
pub fn parse_id(raw: &str, what: &str) -> Result<u32, ApiError> {
    match raw.trim().parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(format!("invalid {} id: {}", what, raw))),
    }
}

/// Collect the names of required fields whose value is blank
pub fn blank_fields<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

pub fn require(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    let missing = blank_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::missing_fields(&missing))
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedMessage {
    pub message: String,
}

impl DeletedMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
