//! REST handlers for checkout and connected-account operations

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::models::{AccountLink, AccountStatus, CheckoutSession, LoginLink, LoginLinkRequest};
use super::orchestrator;
use crate::cart::helpers::resolve_session_id;
use crate::cart::state::SharedState;
use crate::error::StorefrontError;

/// Creates routes for checkout and admin operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/checkout", post(create_checkout))
        .route("/checkout/success", get(checkout_success))
        .route("/checkout/cancel", get(checkout_cancel))
        .route("/admin/account-status/:account_id", get(account_status))
        .route("/admin/connect-account", post(connect_account))
        .route("/admin/login-link", post(login_link))
}

/// Endpoint: POST /checkout
/// Creates a hosted payment session for the session's current cart and
/// returns the redirect target.
async fn create_checkout(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<CheckoutSession>, StorefrontError> {
    let (session_id, _) = resolve_session_id(&headers);
    let session = orchestrator::submit(&state, &session_id).await?;
    Ok(Json(session))
}

/// Endpoint: GET /checkout/success
/// Confirmed success redirect from the gateway; only now is the cart
/// cleared.
async fn checkout_success(State(state): State<SharedState>, headers: HeaderMap) -> Json<Value> {
    let (session_id, _) = resolve_session_id(&headers);
    orchestrator::confirm_success(&state, &session_id).await;
    Json(json!({ "status": "complete" }))
}

/// Endpoint: GET /checkout/cancel
/// The customer backed out of payment; the cart is preserved for another
/// attempt.
async fn checkout_cancel(State(state): State<SharedState>, headers: HeaderMap) -> Json<Value> {
    let (session_id, _) = resolve_session_id(&headers);
    orchestrator::cancel(&state, &session_id).await;
    Json(json!({ "status": "cancelled" }))
}

/// Endpoint: GET /admin/account-status/:account_id
async fn account_status(
    State(state): State<SharedState>,
    Path(account_id): Path<String>,
) -> Result<Json<AccountStatus>, StorefrontError> {
    let status = state.gateway.account_status(&account_id).await?;
    Ok(Json(status))
}

/// Endpoint: POST /admin/connect-account
/// Creates a connected account and returns its onboarding link.
async fn connect_account(
    State(state): State<SharedState>,
) -> Result<Json<AccountLink>, StorefrontError> {
    let link = state.gateway.create_account_link().await?;
    Ok(Json(link))
}

/// Endpoint: POST /admin/login-link
async fn login_link(
    State(state): State<SharedState>,
    Json(payload): Json<LoginLinkRequest>,
) -> Result<Json<LoginLink>, StorefrontError> {
    let link = state.gateway.create_login_link(&payload.account_id).await?;
    Ok(Json(link))
}
