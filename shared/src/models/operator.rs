//! Operator context
//!
//! Identity of the staff member performing a request. Authentication itself
//! happens upstream; the gateway forwards the verified identity in
//! `X-Operator-*` headers and the server treats it as trusted input.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Staff role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatorRole {
    Admin,
    Manager,
    Chef,
    Waiter,
    Cashier,
}

impl OperatorRole {
    /// Whether this role may act on orders owned by other waiters
    pub fn can_manage_any_order(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager | Self::Chef | Self::Cashier)
    }
}

impl FromStr for OperatorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "chef" => Ok(Self::Chef),
            "waiter" => Ok(Self::Waiter),
            "cashier" => Ok(Self::Cashier),
            other => Err(format!("Unknown operator role: {}", other)),
        }
    }
}

/// Acting operator, threaded explicitly through service calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatorContext {
    pub operator_id: i64,
    pub operator_name: String,
    pub role: OperatorRole,
}

impl OperatorContext {
    pub fn new(operator_id: i64, operator_name: impl Into<String>, role: OperatorRole) -> Self {
        Self {
            operator_id,
            operator_name: operator_name.into(),
            role,
        }
    }
}

// ===== Axum Integration =====

/// Header carrying the operator id
pub const OPERATOR_ID_HEADER: &str = "x-operator-id";
/// Header carrying the operator display name
pub const OPERATOR_NAME_HEADER: &str = "x-operator-name";
/// Header carrying the operator role
pub const OPERATOR_ROLE_HEADER: &str = "x-operator-role";

/// Operator extractor
///
/// Pulls the verified identity out of the gateway headers. Requests without
/// a complete identity are rejected as unauthenticated.
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for OperatorContext {
    type Rejection = crate::error::AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        use crate::error::AppError;

        // Check if already extracted earlier in the request
        if let Some(ctx) = parts.extensions.get::<OperatorContext>() {
            return Ok(ctx.clone());
        }

        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let operator_id = header(OPERATOR_ID_HEADER)
            .ok_or_else(AppError::not_authenticated)?
            .parse::<i64>()
            .map_err(|_| {
                AppError::with_message(
                    crate::error::ErrorCode::NotAuthenticated,
                    "Malformed operator id header",
                )
            })?;
        let role = header(OPERATOR_ROLE_HEADER)
            .ok_or_else(AppError::not_authenticated)?
            .parse::<OperatorRole>()
            .map_err(|e| {
                AppError::with_message(crate::error::ErrorCode::NotAuthenticated, e)
            })?;
        let operator_name = header(OPERATOR_NAME_HEADER).unwrap_or_else(|| "unknown".to_string());

        let ctx = OperatorContext::new(operator_id, operator_name, role);

        // Store for potential reuse
        parts.extensions.insert(ctx.clone());

        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("chef".parse::<OperatorRole>().unwrap(), OperatorRole::Chef);
        assert_eq!(
            "WAITER".parse::<OperatorRole>().unwrap(),
            OperatorRole::Waiter
        );
        assert!("cook".parse::<OperatorRole>().is_err());
    }

    #[test]
    fn test_waiter_scoping() {
        assert!(!OperatorRole::Waiter.can_manage_any_order());
        assert!(OperatorRole::Chef.can_manage_any_order());
        assert!(OperatorRole::Manager.can_manage_any_order());
    }
}
