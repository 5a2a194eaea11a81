//! Cart Store
//!
//! In-memory cart state for one session and its mutation operations. The
//! in-memory state is the single source of truth while the session lives;
//! durable storage is a write-behind mirror maintained by the caller.

use super::models::{LineItem, Voucher};
use crate::catalog::Product;

/// The one voucher code the current promotion accepts, compared
/// case-insensitively. Validation lives here, on the trusted side of the
/// checkout boundary, so the client can never compute its own discount.
pub const VALID_VOUCHER_CODE: &str = "neverstopraving";

/// Discount granted by the valid voucher, in whole percent.
pub const VOUCHER_PERCENTAGE: u8 = 10;

/// Cart contents and voucher state for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub items: Vec<LineItem>,
    pub voucher: Option<Voucher>,
}

impl CartState {
    /// Adds `quantity` units of a catalog product to the cart.
    ///
    /// An existing line with the same `(product_id, variant_label)` absorbs
    /// the quantity; otherwise a new line is appended, preserving insertion
    /// order for display.
    pub fn add_item(&mut self, product: &Product, variant_label: &str, quantity: u32) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.merge_key() == (product.id.as_str(), variant_label))
        {
            existing.quantity += quantity;
            return;
        }

        self.items.push(LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            images: product.images.clone(),
            unit_price: product.unit_price,
            quantity,
            variant_label: variant_label.to_string(),
        });
    }

    /// Removes the line matching `(product_id, variant_label)`.
    ///
    /// Removal is variant-scoped: other variants of the same product stay in
    /// the cart. Returns whether a line was actually removed.
    pub fn remove_item(&mut self, product_id: &str, variant_label: &str) -> bool {
        let before = self.items.len();
        self.items
            .retain(|item| item.merge_key() != (product_id, variant_label));
        self.items.len() != before
    }

    /// Overwrites the quantity of the matching line.
    ///
    /// A quantity of zero removes the line instead of storing it; a line in
    /// the cart always has `quantity >= 1`.
    pub fn set_quantity(&mut self, product_id: &str, variant_label: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(product_id, variant_label);
        }

        match self
            .items
            .iter_mut()
            .find(|item| item.merge_key() == (product_id, variant_label))
        {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Empties the cart and forgets any applied voucher.
    pub fn clear(&mut self) {
        self.items.clear();
        self.voucher = None;
    }

    /// Validates a voucher code and records the outcome on the cart.
    pub fn apply_voucher(&mut self, code: &str) -> Voucher {
        let trimmed = code.trim();

        let voucher = if trimmed.is_empty() {
            Voucher {
                code: String::new(),
                is_valid: false,
                percentage: 0,
                message: "Please enter a voucher code".to_string(),
            }
        } else if trimmed.eq_ignore_ascii_case(VALID_VOUCHER_CODE) {
            Voucher {
                code: trimmed.to_string(),
                is_valid: true,
                percentage: VOUCHER_PERCENTAGE,
                message: format!("{VOUCHER_PERCENTAGE}% discount applied!"),
            }
        } else {
            Voucher {
                code: trimmed.to_string(),
                is_valid: false,
                percentage: 0,
                message: "Invalid voucher code".to_string(),
            }
        };

        self.voucher = Some(voucher.clone());
        voucher
    }

    /// Sum of `unit_price * quantity` over all lines, in minor units.
    pub fn subtotal(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.unit_price * i64::from(item.quantity))
            .sum()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn product(id: &str) -> Product {
        catalog::find(id).expect("test product should exist in the catalog")
    }

    #[test]
    fn repeated_adds_merge_into_one_line() {
        let lemon = product("lemon-squash");
        let mut cart = CartState::default();

        cart.add_item(&lemon, "Lemon Squash", 1);
        cart.add_item(&lemon, "Lemon Squash", 2);

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn distinct_variants_get_distinct_lines() {
        let lemon = product("lemon-squash");
        let mut cart = CartState::default();

        cart.add_item(&lemon, "Lemon Squash", 1);
        cart.add_item(&lemon, "Mystery Mix", 1);

        assert_eq!(cart.items.len(), 2);
    }

    #[test]
    fn removal_is_variant_scoped() {
        let lemon = product("lemon-squash");
        let mut cart = CartState::default();
        cart.add_item(&lemon, "Lemon Squash", 1);
        cart.add_item(&lemon, "Mystery Mix", 2);

        assert!(cart.remove_item("lemon-squash", "Lemon Squash"));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].variant_label, "Mystery Mix");
    }

    #[test]
    fn setting_quantity_to_zero_removes_the_line() {
        let lemon = product("lemon-squash");
        let mut cart = CartState::default();
        cart.add_item(&lemon, "Lemon Squash", 2);

        assert!(cart.set_quantity("lemon-squash", "Lemon Squash", 0));

        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_overwrites_rather_than_adds() {
        let lemon = product("lemon-squash");
        let mut cart = CartState::default();
        cart.add_item(&lemon, "Lemon Squash", 2);

        assert!(cart.set_quantity("lemon-squash", "Lemon Squash", 5));

        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn set_quantity_on_missing_line_reports_false() {
        let mut cart = CartState::default();
        assert!(!cart.set_quantity("lemon-squash", "Lemon Squash", 3));
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        let lemon = product("lemon-squash");
        let orange = product("orange-crush");
        let mut cart = CartState::default();
        cart.add_item(&lemon, "Lemon Squash", 2);
        cart.add_item(&orange, "Orange Crush", 1);

        assert_eq!(cart.subtotal(), 4999 * 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn valid_voucher_is_case_insensitive() {
        let mut cart = CartState::default();
        let voucher = cart.apply_voucher("NeverStopRaving");

        assert!(voucher.is_valid);
        assert_eq!(voucher.percentage, 10);
        assert_eq!(voucher.message, "10% discount applied!");
    }

    #[test]
    fn wrong_code_is_rejected_with_message() {
        let mut cart = CartState::default();
        let voucher = cart.apply_voucher("WRONG");

        assert!(!voucher.is_valid);
        assert_eq!(voucher.percentage, 0);
        assert_eq!(voucher.message, "Invalid voucher code");
    }

    #[test]
    fn empty_code_asks_for_input() {
        let mut cart = CartState::default();
        let voucher = cart.apply_voucher("   ");

        assert!(!voucher.is_valid);
        assert_eq!(voucher.message, "Please enter a voucher code");
    }

    #[test]
    fn clear_drops_items_and_voucher() {
        let lemon = product("lemon-squash");
        let mut cart = CartState::default();
        cart.add_item(&lemon, "Lemon Squash", 1);
        cart.apply_voucher(VALID_VOUCHER_CODE);

        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.voucher.is_none());
        assert_eq!(cart.subtotal(), 0);
    }
}
