//! Pricing & Promotion Engine
//!
//! Pure computation over cart contents: subtotal, voucher discount,
//! shipping fee, and grand total. One rule set feeds both the cart preview
//! and the payment-session request, so the amount the gateway charges is
//! always the amount the customer saw.

use serde::Serialize;

use crate::cart::models::{LineItem, Voucher};

/// Orders whose pre-discount subtotal reaches this amount ship free
/// (minor units).
pub const FREE_SHIPPING_THRESHOLD: i64 = 5000;

/// Flat shipping fee below the threshold: $9.95 in minor units.
pub const FLAT_SHIPPING_FEE: i64 = 995;

/// Derived order totals. Recomputed from cart contents on every read and
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub subtotal: i64,
    pub discount_amount: i64,
    pub shipping_fee: i64,
    pub grand_total: i64,
    pub item_count: u32,
    pub free_shipping: bool,
}

/// Computes totals for the given lines and voucher state.
///
/// Shipping eligibility is evaluated on the subtotal before the discount is
/// taken, so a voucher cannot drop an order back below the free-shipping
/// threshold.
pub fn quote(items: &[LineItem], voucher: Option<&Voucher>) -> Quote {
    let subtotal: i64 = items
        .iter()
        .map(|item| item.unit_price * i64::from(item.quantity))
        .sum();
    let discount_amount = discount_amount(subtotal, voucher);
    let shipping_fee = shipping_fee(subtotal);

    Quote {
        subtotal,
        discount_amount,
        shipping_fee,
        grand_total: subtotal - discount_amount + shipping_fee,
        item_count: items.iter().map(|item| item.quantity).sum(),
        free_shipping: shipping_fee == 0,
    }
}

/// Voucher discount in minor units: `round(subtotal * percentage / 100)`,
/// rounded half up in integer arithmetic.
fn discount_amount(subtotal: i64, voucher: Option<&Voucher>) -> i64 {
    match voucher {
        Some(voucher) if voucher.is_valid => {
            (subtotal * i64::from(voucher.percentage) + 50) / 100
        }
        _ => 0,
    }
}

/// Flat-fee shipping with a free tier. An empty cart has nothing to ship.
pub fn shipping_fee(subtotal: i64) -> i64 {
    if subtotal == 0 || subtotal >= FREE_SHIPPING_THRESHOLD {
        0
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// Formats a minor-unit amount as a major-unit display string.
///
/// `format_price(4999)` returns `"49.99"`.
pub fn format_price(minor_units: i64) -> String {
    format!("{}.{:02}", minor_units / 100, minor_units % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(unit_price: i64, quantity: u32, variant: &str) -> LineItem {
        LineItem {
            product_id: "recovery-pack".to_string(),
            name: "Recovery Pack".to_string(),
            description: String::new(),
            images: vec![],
            unit_price,
            quantity,
            variant_label: variant.to_string(),
        }
    }

    fn valid_voucher(percentage: u8) -> Voucher {
        Voucher {
            code: "neverstopraving".to_string(),
            is_valid: true,
            percentage,
            message: format!("{percentage}% discount applied!"),
        }
    }

    #[test]
    fn single_discounted_item_below_threshold() {
        let items = vec![line(2999, 1, "Lemon")];
        let voucher = valid_voucher(10);

        let quote = quote(&items, Some(&voucher));

        assert_eq!(quote.subtotal, 2999);
        assert_eq!(quote.discount_amount, 300);
        assert_eq!(quote.shipping_fee, 995);
        assert_eq!(quote.grand_total, 3694);
        assert!(!quote.free_shipping);
    }

    #[test]
    fn grand_total_identity_holds() {
        let items = vec![line(4999, 2, "Lemon Squash"), line(4999, 1, "Orange Crush")];
        let voucher = valid_voucher(10);

        let q = quote(&items, Some(&voucher));

        assert_eq!(q.grand_total, q.subtotal - q.discount_amount + q.shipping_fee);
        assert_eq!(q.item_count, 3);
    }

    #[test]
    fn no_voucher_means_no_discount() {
        let q = quote(&[line(4999, 1, "Lemon Squash")], None);
        assert_eq!(q.discount_amount, 0);

        let invalid = Voucher {
            code: "WRONG".to_string(),
            is_valid: false,
            percentage: 0,
            message: "Invalid voucher code".to_string(),
        };
        let q = quote(&[line(4999, 1, "Lemon Squash")], Some(&invalid));
        assert_eq!(q.discount_amount, 0);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let items = vec![line(4999, 2, "Lemon Squash")];
        let voucher = valid_voucher(10);

        let first = quote(&items, Some(&voucher));
        let second = quote(&items, Some(&voucher));

        assert_eq!(first, second);
    }

    #[test]
    fn shipping_is_free_at_the_threshold() {
        assert_eq!(shipping_fee(FREE_SHIPPING_THRESHOLD), 0);
        assert_eq!(shipping_fee(FREE_SHIPPING_THRESHOLD - 1), FLAT_SHIPPING_FEE);
        assert_eq!(shipping_fee(FREE_SHIPPING_THRESHOLD + 1), 0);
    }

    #[test]
    fn empty_cart_quotes_to_zero() {
        let q = quote(&[], None);
        assert_eq!(q.subtotal, 0);
        assert_eq!(q.shipping_fee, 0);
        assert_eq!(q.grand_total, 0);
        assert_eq!(q.item_count, 0);
    }

    #[test]
    fn shipping_eligibility_ignores_the_discount() {
        // 5200 pre-discount crosses the threshold; the 10% voucher would
        // drop it to 4680 but shipping stays free.
        let items = vec![line(5200, 1, "Lemon Squash")];
        let voucher = valid_voucher(10);

        let q = quote(&items, Some(&voucher));

        assert_eq!(q.discount_amount, 520);
        assert_eq!(q.shipping_fee, 0);
        assert!(q.free_shipping);
    }

    #[test]
    fn discount_rounds_half_up() {
        // 10% of 1005 is 100.5, which rounds to 101.
        let q = quote(&[line(1005, 1, "Lemon Squash")], Some(&valid_voucher(10)));
        assert_eq!(q.discount_amount, 101);
    }

    #[test]
    fn prices_format_with_two_decimals() {
        assert_eq!(format_price(4999), "49.99");
        assert_eq!(format_price(995), "9.95");
        assert_eq!(format_price(10000), "100.00");
        assert_eq!(format_price(5), "0.05");
    }
}
