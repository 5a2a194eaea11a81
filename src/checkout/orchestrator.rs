//! Checkout Orchestration
//!
//! Transforms a snapshot of the session's cart into a payment-session
//! request, submits it once, and tracks the per-session submission state
//! machine. Every failure leaves the cart untouched; a retry recomputes
//! the request from current cart state rather than resending a stale one.

use tracing::{info, warn};

use super::models::{CheckoutDiscount, CheckoutLineItem, CheckoutRequest, CheckoutSession, ShippingRate};
use crate::cart::helpers::format_item_summary;
use crate::cart::state::AppState;
use crate::cart::store::CartState;
use crate::config::Config;
use crate::error::StorefrontError;
use crate::pricing::{self, format_price, Quote};

/// Per-session checkout progress.
///
/// `RedirectPending` means the browser has been handed the gateway URL; the
/// cart survives until the success redirect confirms payment, so a customer
/// who backs out keeps their items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    Idle,
    Submitting,
    RedirectPending,
}

/// Builds the gateway request from a cart snapshot.
///
/// The shipping rate and discount come from the same pricing engine the
/// cart preview uses, so the charged amount always matches the previewed
/// total.
pub fn build_request(config: &Config, cart: &CartState, quote: &Quote) -> CheckoutRequest {
    let discount = cart
        .voucher
        .as_ref()
        .filter(|voucher| voucher.is_valid)
        .map(|voucher| CheckoutDiscount {
            code: voucher.code.clone(),
            percentage: voucher.percentage,
            amount: quote.discount_amount,
        });

    CheckoutRequest {
        cart: cart.items.iter().map(CheckoutLineItem::from_line_item).collect(),
        shipping: ShippingRate::from_quote(quote),
        discount,
        success_url: config.success_url(),
        cancel_url: config.cancel_url(),
    }
}

/// Submits the session's cart to the payment gateway.
///
/// At most one submission may be in flight per session; a concurrent
/// attempt is rejected instead of creating a second payment session. A
/// gateway failure returns the phase to `Idle` with the cart intact.
pub async fn submit(
    state: &AppState,
    session_id: &str,
) -> Result<CheckoutSession, StorefrontError> {
    let cart = state.cart_snapshot(session_id).await;
    if cart.is_empty() {
        return Err(StorefrontError::EmptyCart);
    }

    if !state.begin_checkout(session_id) {
        return Err(StorefrontError::CheckoutInFlight);
    }

    let quote = pricing::quote(&cart.items, cart.voucher.as_ref());
    let request = build_request(&state.config, &cart, &quote);
    info!(
        session_id,
        items = %format_item_summary(&cart.items),
        grand_total = %format_price(quote.grand_total),
        "submitting checkout"
    );

    match state.gateway.create_checkout_session(&request).await {
        Ok(session) => {
            state.set_phase(session_id, CheckoutPhase::RedirectPending);
            info!(session_id, checkout_session = %session.session_id, "checkout session created");
            Ok(session)
        }
        Err(err) => {
            state.set_phase(session_id, CheckoutPhase::Idle);
            warn!(session_id, error = %err, "checkout submission failed");
            Err(err.into())
        }
    }
}

/// Confirms payment after the gateway's success redirect. Only now are the
/// cart and its durable mirror dropped.
pub async fn confirm_success(state: &AppState, session_id: &str) {
    state.drop_cart(session_id).await;
    state.set_phase(session_id, CheckoutPhase::Idle);
    info!(session_id, "checkout confirmed, cart cleared");
}

/// Handles the gateway's cancel redirect: the cart is kept for another try.
pub async fn cancel(state: &AppState, session_id: &str) {
    state.set_phase(session_id, CheckoutPhase::Idle);
    info!(session_id, "checkout cancelled, cart preserved");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::store::VALID_VOUCHER_CODE;
    use crate::catalog;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    fn test_config() -> Config {
        Config {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            gateway_url: "http://gateway.invalid".to_string(),
            public_url: "https://shop.example".to_string(),
            data_dir: PathBuf::from("/tmp/storefront-orchestrator-tests"),
        }
    }

    fn cart_with_voucher() -> CartState {
        let mut cart = CartState::default();
        let product = catalog::find("lemon-squash").unwrap();
        cart.add_item(&product, "Lemon Squash", 1);
        cart.apply_voucher(VALID_VOUCHER_CODE);
        cart
    }

    #[test]
    fn request_carries_pricing_engine_shipping_and_discount() {
        let cart = cart_with_voucher();
        let quote = pricing::quote(&cart.items, cart.voucher.as_ref());

        let request = build_request(&test_config(), &cart, &quote);

        assert_eq!(request.cart.len(), 1);
        assert_eq!(request.shipping.amount, 995);
        assert_eq!(request.shipping.display_name, "Express Shipping");
        let discount = request.discount.expect("valid voucher should be forwarded");
        assert_eq!(discount.percentage, 10);
        assert_eq!(discount.amount, 500);
        assert_eq!(request.success_url, "https://shop.example/checkout/success");
        assert_eq!(request.cancel_url, "https://shop.example/checkout/cancel");
    }

    #[test]
    fn free_shipping_is_labelled_as_such() {
        let mut cart = CartState::default();
        let product = catalog::find("lemon-squash").unwrap();
        cart.add_item(&product, "Lemon Squash", 2);
        let quote = pricing::quote(&cart.items, cart.voucher.as_ref());

        let request = build_request(&test_config(), &cart, &quote);

        assert_eq!(request.shipping.amount, 0);
        assert_eq!(request.shipping.display_name, "Free Express Shipping");
        assert!(request.discount.is_none());
    }

    #[test]
    fn invalid_voucher_is_not_forwarded() {
        let mut cart = cart_with_voucher();
        cart.apply_voucher("WRONG");
        let quote = pricing::quote(&cart.items, cart.voucher.as_ref());

        let request = build_request(&test_config(), &cart, &quote);

        assert!(request.discount.is_none());
        assert_eq!(quote.discount_amount, 0);
    }
}
