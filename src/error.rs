//! Error taxonomy for the storefront service.
//!
//! Every failure a request can surface maps onto one of these variants, and
//! each variant carries the user-facing message in its `Display` form. A
//! failed request never mutates cart state; the storefront stays usable
//! after any single failed checkout attempt.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures reported by the payment gateway client.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway understood the request and refused it. The gateway's own
    /// message is surfaced verbatim to aid debugging.
    #[error("{message}")]
    Rejected {
        message: String,
        details: Option<String>,
    },

    /// The gateway could not be reached at all.
    #[error("payment gateway unreachable: {0}")]
    Transport(String),

    /// The gateway did not answer within the bounded wait.
    #[error("payment gateway request timed out")]
    Timeout,
}

/// Request-level errors for the storefront API.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("your cart is empty")]
    EmptyCart,

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("quantity must be between 1 and {max}, got {got}")]
    InvalidQuantity { got: u32, max: u32 },

    #[error("a checkout is already in progress for this session")]
    CheckoutInFlight,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl StorefrontError {
    fn status(&self) -> StatusCode {
        match self {
            Self::EmptyCart => StatusCode::BAD_REQUEST,
            Self::UnknownProduct(_) => StatusCode::NOT_FOUND,
            Self::InvalidQuantity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::CheckoutInFlight => StatusCode::CONFLICT,
            Self::Gateway(GatewayError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            Self::Gateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            Self::Gateway(GatewayError::Rejected {
                details: Some(details),
                ..
            }) => Some(details),
            _ => None,
        }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.to_string() });
        if let Some(details) = self.details() {
            body["details"] = json!(details);
        }
        (self.status(), Json(body)).into_response()
    }
}
