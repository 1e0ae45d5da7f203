//! Cart persistence.
//!
//! The ledger in [`models`](super::models) is pure; this module is the
//! side-effecting wrapper around it. A [`CartSession`] writes a snapshot
//! through its [`CartStorage`] after every mutation and rehydrates at open.
//! Reads are fail-open: corrupt or unreadable snapshots degrade to an empty
//! cart rather than blocking the customer.

use std::{fs, io, path::PathBuf};

use thiserror::Error;

use super::models::{Cart, CartLine, VariantKey};

/// Errors writing a cart snapshot.
///
/// Reads never error; see [`CartStorage::load`].
#[derive(Debug, Error)]
pub enum CartStorageError {
    #[error("failed to write cart snapshot")]
    Io(#[from] io::Error),

    #[error("failed to encode cart snapshot")]
    Encode(#[from] serde_json::Error),
}

/// Durable client-local storage for cart snapshots.
pub trait CartStorage {
    /// Rehydrate the last snapshot.
    ///
    /// Fail-open by contract: a missing, unreadable, or unparseable
    /// snapshot is discarded and an empty cart returned.
    fn load(&self) -> Cart;

    /// Persist a snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error when encoding or writing fails.
    fn save(&self, cart: &Cart) -> Result<(), CartStorageError>;
}

/// JSON-file snapshot storage.
#[derive(Debug, Clone)]
pub struct JsonCartStorage {
    path: PathBuf,
}

impl JsonCartStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for JsonCartStorage {
    fn load(&self) -> Cart {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) => {
                if error.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), %error, "unreadable cart snapshot discarded");
                }
                return Cart::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cart) => cart,
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "corrupt cart snapshot discarded");
                Cart::new()
            }
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStorageError> {
        let encoded = serde_json::to_string(cart)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}

/// A cart bound to its storage for the lifetime of a browsing session.
///
/// Mirrors the ledger operations, persisting after each one. One session
/// owns one cart; there is no concurrent mutation by construction.
#[derive(Debug)]
pub struct CartSession<S: CartStorage> {
    cart: Cart,
    storage: S,
}

impl<S: CartStorage> CartSession<S> {
    /// Open a session, rehydrating the stored snapshot (fail-open).
    pub fn open(storage: S) -> Self {
        let cart = storage.load();
        Self { cart, storage }
    }

    /// Current snapshot; what checkout reads.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// # Errors
    ///
    /// Returns an error when persisting the snapshot fails; the in-memory
    /// cart still carries the mutation.
    pub fn add_line(&mut self, line: CartLine) -> Result<(), CartStorageError> {
        self.cart.add_line(line);
        self.storage.save(&self.cart)
    }

    /// # Errors
    ///
    /// Returns an error when persisting the snapshot fails.
    pub fn remove_line(&mut self, key: &VariantKey) -> Result<(), CartStorageError> {
        self.cart.remove_line(key);
        self.storage.save(&self.cart)
    }

    /// # Errors
    ///
    /// Returns an error when persisting the snapshot fails.
    pub fn update_quantity(
        &mut self,
        key: &VariantKey,
        quantity: u32,
    ) -> Result<(), CartStorageError> {
        self.cart.update_quantity(key, quantity);
        self.storage.save(&self.cart)
    }

    /// Empty the cart, as on successful checkout.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting the snapshot fails.
    pub fn clear(&mut self) -> Result<(), CartStorageError> {
        self.cart.clear();
        self.storage.save(&self.cart)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::products::models::ProductUuid;

    use super::*;

    fn gown_line(quantity: u32) -> CartLine {
        CartLine {
            product_uuid: ProductUuid::from_uuid(uuid::uuid!(
                "0191f1e2-9a44-7d10-8d4e-55f0d1c2b377"
            )),
            product_name: "Evening Gown - Champagne".to_string(),
            unit_price: 3_299_00,
            image: "/collection_womenswear.png".to_string(),
            size: "S".to_string(),
            color: "Champagne".to_string(),
            quantity,
        }
    }

    #[test]
    fn session_rehydrates_what_a_previous_session_persisted() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");

        let mut session = CartSession::open(JsonCartStorage::new(&path));
        session.add_line(gown_line(1))?;
        session.add_line(gown_line(1))?;

        let reopened = CartSession::open(JsonCartStorage::new(&path));

        assert_eq!(reopened.cart(), session.cart());
        assert_eq!(reopened.cart().count(), 2);

        Ok(())
    }

    #[test]
    fn missing_snapshot_opens_an_empty_cart() -> TestResult {
        let dir = tempfile::tempdir()?;

        let session = CartSession::open(JsonCartStorage::new(dir.path().join("cart.json")));

        assert!(session.cart().is_empty());

        Ok(())
    }

    #[test]
    fn corrupt_snapshot_is_discarded_not_fatal() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");
        fs::write(&path, "{not json")?;

        let session = CartSession::open(JsonCartStorage::new(&path));

        assert!(session.cart().is_empty());

        Ok(())
    }

    #[test]
    fn every_mutation_is_persisted_immediately() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");
        let storage = JsonCartStorage::new(&path);

        let mut session = CartSession::open(storage.clone());
        session.add_line(gown_line(2))?;
        session.update_quantity(&gown_line(2).variant(), 5)?;

        assert_eq!(storage.load().count(), 5);

        session.clear()?;

        assert!(storage.load().is_empty());

        Ok(())
    }
}
