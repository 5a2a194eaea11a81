//! Durable Session Storage
//!
//! Mirrors each session's cart to disk as two string-keyed JSON entries,
//! one for the line items and one for the voucher state. The resident cart
//! remains the source of truth; storage only restores state across
//! restarts. Prices round-trip as integers, never floating point.
//!
//! A missing or malformed entry is recovered by falling back to empty
//! state; the failure is logged locally and never shown to the user.

use std::io;
use std::path::PathBuf;

use tracing::warn;

use crate::cart::models::{LineItem, Voucher};
use crate::cart::store::CartState;

const CART_SUFFIX: &str = "cart.json";
const VOUCHER_SUFFIX: &str = "voucher.json";

/// File-backed key-value store for per-session cart state.
pub struct CartStorage {
    root: PathBuf,
}

impl CartStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn entry_path(&self, session_id: &str, suffix: &str) -> PathBuf {
        self.root.join(format!("{session_id}.{suffix}"))
    }

    /// Loads the session's mirrored state.
    pub async fn load(&self, session_id: &str) -> CartState {
        let items: Vec<LineItem> = self
            .read_entry(session_id, CART_SUFFIX)
            .await
            .unwrap_or_default();
        let voucher: Option<Voucher> = self.read_entry(session_id, VOUCHER_SUFFIX).await;
        CartState { items, voucher }
    }

    async fn read_entry<T: serde::de::DeserializeOwned>(
        &self,
        session_id: &str,
        suffix: &str,
    ) -> Option<T> {
        let path = self.entry_path(session_id, suffix);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(?path, error = %err, "failed to read storage entry");
                return None;
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(?path, error = %err, "discarding malformed storage entry");
                None
            }
        }
    }

    /// Mirrors both entries for a session.
    pub async fn save(&self, session_id: &str, cart: &CartState) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;

        let items = serde_json::to_vec(&cart.items)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        tokio::fs::write(self.entry_path(session_id, CART_SUFFIX), items).await?;

        match &cart.voucher {
            Some(voucher) => {
                let raw = serde_json::to_vec(voucher)
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
                tokio::fs::write(self.entry_path(session_id, VOUCHER_SUFFIX), raw).await?;
            }
            None => remove_if_present(self.entry_path(session_id, VOUCHER_SUFFIX)).await?,
        }
        Ok(())
    }

    /// Deletes both entries for a session.
    pub async fn remove(&self, session_id: &str) -> io::Result<()> {
        remove_if_present(self.entry_path(session_id, CART_SUFFIX)).await?;
        remove_if_present(self.entry_path(session_id, VOUCHER_SUFFIX)).await
    }
}

async fn remove_if_present(path: PathBuf) -> io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}
