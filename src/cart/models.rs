//! Cart Domain Models
//!
//! Data structures for cart contents, voucher state, and the cart API's
//! request and response bodies.

use serde::{Deserialize, Serialize};

use crate::pricing::Quote;

/// Returns the default quantity (1) for cart lines
fn default_quantity() -> u32 {
    1
}

/// One product+variant entry in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub images: Vec<String>,

    /// Unit price in minor currency units.
    pub unit_price: i64,

    /// Quantity of this line (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    pub variant_label: String,
}

impl LineItem {
    /// Merge identity: two additions of the same product and variant combine
    /// into one line instead of creating a duplicate row.
    pub fn merge_key(&self) -> (&str, &str) {
        (self.product_id.as_str(), self.variant_label.as_str())
    }
}

/// Outcome of the most recent voucher application, persisted with the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub code: String,
    pub is_valid: bool,

    /// Whole-number discount percentage, 0 to 100.
    pub percentage: u8,

    /// Human-readable outcome shown next to the voucher field.
    pub message: String,
}

// =============================================================================
// Request / Response bodies
// =============================================================================

/// Input for adding a catalog product to the cart
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: String,

    /// Defaults to the catalog product's own variant label.
    pub variant_label: Option<String>,

    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Input for overwriting one line's quantity
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
    pub product_id: String,
    pub variant_label: String,
    pub quantity: u32,
}

/// Input for applying a voucher code
#[derive(Debug, Deserialize)]
pub struct VoucherRequest {
    pub code: String,
}

/// The cart as returned to the client, totals freshly computed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub cart_id: String,
    pub items: Vec<LineItem>,
    pub voucher: Option<Voucher>,

    #[serde(flatten)]
    pub quote: Quote,

    /// Grand total formatted for display, e.g. `"59.94"`.
    pub grand_total_display: String,
}
