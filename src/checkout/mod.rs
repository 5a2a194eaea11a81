//! Checkout Domain Module
//!
//! This module contains the checkout side of the storefront, including:
//! - Wire models for payment-session requests and responses
//! - The payment gateway client seam and its HTTP implementation
//! - The checkout orchestrator and its per-session state machine
//! - REST API handlers

pub mod gateway;
pub mod handlers;
pub mod models;
pub mod orchestrator;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use orchestrator::CheckoutPhase;
