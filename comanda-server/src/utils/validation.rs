//! Input validation helpers
//!
//! Centralized text length constants plus the bridge from `validator`
//! derive errors to [`AppError`].

use shared::AppError;
use validator::Validate;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item, ingredient, customer, table location
pub const MAX_NAME_LEN: usize = 200;

/// Notes and special instructions
pub const MAX_NOTE_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Run a payload's derive-based validation, flattening the field errors
/// into one validation message.
pub fn validate_payload(payload: &impl Validate) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let detail = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                format!("{}: {}", field, detail)
            })
            .collect();
        fields.sort();
        if fields.is_empty() {
            // Nested (list) errors carry no top-level field entry
            AppError::validation("invalid payload")
        } else {
            AppError::validation(fields.join("; "))
        }
    })
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}
