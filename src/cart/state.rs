//! Application State
//!
//! Shared state for the running service: resident carts per session, the
//! per-session checkout phase, the durable storage mirror, and the payment
//! gateway client.
//!
//! Mutations go through [`AppState::with_cart`] so that two rapid requests
//! for the same session serialize on the in-memory entry instead of racing
//! a read-modify-write against storage.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::warn;

use super::store::CartState;
use crate::checkout::gateway::PaymentGateway;
use crate::checkout::orchestrator::CheckoutPhase;
use crate::config::Config;
use crate::storage::CartStorage;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state.
pub struct AppState {
    /// Resident carts keyed by session id. DashMap allows concurrent access
    /// without external Mutexes.
    carts: DashMap<String, CartState>,

    /// Checkout state machine per session.
    phases: DashMap<String, CheckoutPhase>,

    /// Write-behind durable mirror of the resident carts.
    pub storage: CartStorage,

    /// Payment gateway client used by the checkout orchestrator.
    pub gateway: Arc<dyn PaymentGateway>,

    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, gateway: Arc<dyn PaymentGateway>) -> Self {
        let storage = CartStorage::new(config.data_dir.clone());
        Self {
            carts: DashMap::new(),
            phases: DashMap::new(),
            storage,
            gateway,
            config,
        }
    }

    /// Makes the session's cart resident, reading the durable mirror on
    /// first touch. Corrupt or missing storage falls back to an empty cart.
    async fn ensure_loaded(&self, session_id: &str) {
        if self.carts.contains_key(session_id) {
            return;
        }
        let loaded = self.storage.load(session_id).await;
        self.carts.entry(session_id.to_string()).or_insert(loaded);
    }

    /// Returns a snapshot of the session's cart.
    pub async fn cart_snapshot(&self, session_id: &str) -> CartState {
        self.ensure_loaded(session_id).await;
        self.carts
            .get(session_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Applies a mutation to the session's cart, then mirrors the result to
    /// durable storage.
    ///
    /// The map entry serializes concurrent mutations; the mirror write
    /// happens after the entry lock is released. A failed mirror write is
    /// logged and the mutation stands, since the resident cart is the
    /// source of truth.
    pub async fn with_cart<T>(
        &self,
        session_id: &str,
        mutate: impl FnOnce(&mut CartState) -> T,
    ) -> T {
        self.ensure_loaded(session_id).await;

        let (result, snapshot) = {
            let mut entry = self.carts.entry(session_id.to_string()).or_default();
            let result = mutate(entry.value_mut());
            (result, entry.value().clone())
        };

        if let Err(err) = self.storage.save(session_id, &snapshot).await {
            warn!(session_id, error = %err, "failed to mirror cart to storage");
        }
        result
    }

    /// Drops the session's cart from memory and from the durable mirror.
    pub async fn drop_cart(&self, session_id: &str) {
        self.carts.remove(session_id);
        if let Err(err) = self.storage.remove(session_id).await {
            warn!(session_id, error = %err, "failed to remove stored cart");
        }
    }

    /// Current checkout phase for the session.
    pub fn phase(&self, session_id: &str) -> CheckoutPhase {
        self.phases
            .get(session_id)
            .map(|phase| *phase.value())
            .unwrap_or(CheckoutPhase::Idle)
    }

    pub fn set_phase(&self, session_id: &str, phase: CheckoutPhase) {
        self.phases.insert(session_id.to_string(), phase);
    }

    /// Attempts the `Idle -> Submitting` transition. Returns `false` when a
    /// submission is already in flight, which rejects double submits.
    pub fn begin_checkout(&self, session_id: &str) -> bool {
        let mut entry = self
            .phases
            .entry(session_id.to_string())
            .or_insert(CheckoutPhase::Idle);
        if *entry == CheckoutPhase::Submitting {
            return false;
        }
        *entry = CheckoutPhase::Submitting;
        true
    }
}
