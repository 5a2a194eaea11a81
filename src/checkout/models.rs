//! Checkout Wire Models
//!
//! The gateway-agnostic payment-session request and the responses the
//! gateway hands back. A request is built fresh from current cart state on
//! every attempt and discarded once the gateway answers.

use serde::{Deserialize, Serialize};

use crate::cart::models::LineItem;
use crate::pricing::Quote;

/// A cart line as transmitted to the payment gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLineItem {
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub unit_price: i64,
    pub quantity: u32,
    pub variant_label: String,
}

impl CheckoutLineItem {
    /// Sanitizes a cart line for transmission: blank image URLs are
    /// dropped and the quantity is floored at one.
    pub fn from_line_item(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            images: item
                .images
                .iter()
                .map(|url| url.trim())
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect(),
            unit_price: item.unit_price,
            quantity: item.quantity.max(1),
            variant_label: item.variant_label.clone(),
        }
    }
}

/// Explicit shipping-rate data sent with every checkout request, so the
/// gateway charges exactly what the cart preview showed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRate {
    pub amount: i64,
    pub display_name: String,
}

impl ShippingRate {
    pub fn from_quote(quote: &Quote) -> Self {
        Self {
            amount: quote.shipping_fee,
            display_name: if quote.free_shipping {
                "Free Express Shipping".to_string()
            } else {
                "Express Shipping".to_string()
            },
        }
    }
}

/// Server-computed discount included in the session request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDiscount {
    pub code: String,
    pub percentage: u8,
    pub amount: i64,
}

/// One payment-session request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub cart: Vec<CheckoutLineItem>,
    pub shipping: ShippingRate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<CheckoutDiscount>,

    pub success_url: String,
    pub cancel_url: String,
}

/// Successful gateway response: a hosted checkout session to redirect to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: String,
    pub redirect_url: String,
}

// =============================================================================
// Connected-account operations
// =============================================================================

/// Onboarding state of a connected gateway account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    pub account_id: String,
    pub details_submitted: bool,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
    pub is_fully_onboarded: bool,
}

/// A freshly created connected account plus its onboarding link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLink {
    pub account_id: String,
    pub redirect_url: String,
}

/// A dashboard login link for an existing connected account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginLink {
    pub redirect_url: String,
}

/// Input for creating a dashboard login link
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginLinkRequest {
    pub account_id: String,
}
