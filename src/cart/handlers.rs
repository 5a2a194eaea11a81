//! REST API handlers for catalog and cart operations
//!
//! Cart mutations resolve the session, apply the change through the shared
//! state, and return the full cart with freshly computed totals so the
//! client never recomputes prices itself.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use super::helpers::{resolve_session_id, session_cookie};
use super::models::{AddItemRequest, CartView, SetQuantityRequest, VoucherRequest};
use super::state::SharedState;
use super::store::CartState;
use crate::catalog;
use crate::error::StorefrontError;
use crate::pricing;

/// Most units of one variant a single order may hold.
pub const MAX_LINE_QUANTITY: u32 = 5;

/// Creates routes for catalog and cart operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/cart", get(view_cart))
        .route("/cart/items", post(add_item).put(set_quantity))
        .route("/cart/items/:product_id/:variant_label", delete(remove_item))
        .route("/cart/voucher", post(apply_voucher))
}

/// Endpoint: GET /products
/// Lists the catalog.
async fn list_products() -> Json<Vec<catalog::Product>> {
    Json(catalog::all())
}

/// Endpoint: GET /cart
/// Returns the session's cart and totals.
async fn view_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart = state.cart_snapshot(&session_id).await;
    with_session_cookie(cart_view(&session_id, &cart), &session_id, is_new_session)
}

/// Endpoint: POST /cart/items
/// Adds a catalog product to the cart, merging with any existing line for
/// the same product and variant.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemRequest>,
) -> Result<Response, StorefrontError> {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    if payload.quantity < 1 || payload.quantity > MAX_LINE_QUANTITY {
        return Err(StorefrontError::InvalidQuantity {
            got: payload.quantity,
            max: MAX_LINE_QUANTITY,
        });
    }

    let product = catalog::find(&payload.product_id)
        .ok_or_else(|| StorefrontError::UnknownProduct(payload.product_id.clone()))?;
    let variant_label = payload
        .variant_label
        .unwrap_or_else(|| product.variant_label.clone());

    let view = state
        .with_cart(&session_id, |cart| {
            cart.add_item(&product, &variant_label, payload.quantity);
            cart_view(&session_id, cart)
        })
        .await;

    Ok(with_session_cookie(view, &session_id, is_new_session))
}

/// Endpoint: PUT /cart/items
/// Overwrites the quantity of one line. Zero removes the line outright; a
/// missing line is a no-op so the operation stays idempotent.
async fn set_quantity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<SetQuantityRequest>,
) -> Result<Response, StorefrontError> {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    if payload.quantity > MAX_LINE_QUANTITY {
        return Err(StorefrontError::InvalidQuantity {
            got: payload.quantity,
            max: MAX_LINE_QUANTITY,
        });
    }

    let view = state
        .with_cart(&session_id, |cart| {
            cart.set_quantity(&payload.product_id, &payload.variant_label, payload.quantity);
            cart_view(&session_id, cart)
        })
        .await;

    Ok(with_session_cookie(view, &session_id, is_new_session))
}

/// Endpoint: DELETE /cart/items/:product_id/:variant_label
/// Removes one line. Scoped to the variant: other variants of the same
/// product stay in the cart.
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((product_id, variant_label)): Path<(String, String)>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    let view = state
        .with_cart(&session_id, |cart| {
            cart.remove_item(&product_id, &variant_label);
            cart_view(&session_id, cart)
        })
        .await;

    with_session_cookie(view, &session_id, is_new_session)
}

/// Endpoint: POST /cart/voucher
/// Validates the code server-side and stores the outcome with the cart.
async fn apply_voucher(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<VoucherRequest>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    let view = state
        .with_cart(&session_id, |cart| {
            cart.apply_voucher(&payload.code);
            cart_view(&session_id, cart)
        })
        .await;

    with_session_cookie(view, &session_id, is_new_session)
}

/// Assembles the response body for a cart, recomputing totals from scratch.
fn cart_view(session_id: &str, cart: &CartState) -> CartView {
    let quote = pricing::quote(&cart.items, cart.voucher.as_ref());
    CartView {
        cart_id: session_id.to_string(),
        items: cart.items.clone(),
        voucher: cart.voucher.clone(),
        quote,
        grand_total_display: pricing::format_price(quote.grand_total),
    }
}

fn with_session_cookie(view: CartView, session_id: &str, is_new_session: bool) -> Response {
    let mut response = Json(view).into_response();
    if is_new_session {
        let cookie_val = session_cookie(session_id);
        response
            .headers_mut()
            .insert(axum::http::header::SET_COOKIE, cookie_val.parse().unwrap());
    }
    response
}
