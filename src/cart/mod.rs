//! Cart Domain Module
//!
//! This module contains the cart side of the storefront, including:
//! - Domain models (LineItem, Voucher, request and response bodies)
//! - The cart store and its mutation operations
//! - Session and formatting helpers
//! - Shared application state
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;
pub mod store;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use state::{AppState, SharedState};
pub use store::CartState;
