//! Immutable key store with a discovery toggle.

use crate::error::{MockCognitoError, Result};
use crate::jwks::key::{Jwks, KeyRecord, KeySet};
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Holds the configured key records for the lifetime of a mock instance.
///
/// Keys never change after construction. The only mutable state is the
/// discovery flag, which the HTTP layer reads on every request.
#[derive(Debug)]
pub struct KeyStore {
    records: Vec<KeyRecord>,
    discovery_enabled: AtomicBool,
}

impl KeyStore {
    /// Builds a store, rejecting an empty set or duplicate key ids.
    pub fn new(keys: KeySet) -> Result<Self> {
        if keys.keys.is_empty() {
            return Err(MockCognitoError::config("key store requires at least one key"));
        }

        let mut seen = HashSet::new();
        for record in &keys.keys {
            if !seen.insert(record.kid()) {
                return Err(MockCognitoError::config(format!(
                    "duplicate key id: {}",
                    record.kid()
                )));
            }
        }

        Ok(KeyStore {
            records: keys.keys,
            discovery_enabled: AtomicBool::new(true),
        })
    }

    /// Public projection of every record, regardless of the discovery flag.
    pub fn public_document(&self) -> Jwks {
        Jwks {
            keys: self.records.iter().map(KeyRecord::public_projection).collect(),
        }
    }

    /// The document the discovery endpoint serves.
    pub fn discovery_document(&self) -> Result<Jwks> {
        if self.is_discovery_enabled() {
            Ok(self.public_document())
        } else {
            Err(MockCognitoError::DiscoveryDisabled)
        }
    }

    /// Picks a full key pair uniformly at random.
    pub fn select_signing_key(&self) -> Result<&KeyRecord> {
        let pairs: Vec<&KeyRecord> = self.records.iter().filter(|r| r.is_key_pair()).collect();
        pairs
            .choose(&mut rand::thread_rng())
            .copied()
            .ok_or(MockCognitoError::NoKeysAvailable)
    }

    pub fn toggle_discovery(&self, enabled: bool) {
        let previous = self.discovery_enabled.swap(enabled, Ordering::AcqRel);
        if previous != enabled {
            info!(enabled, "Discovery endpoint toggled");
        }
    }

    pub fn enable_discovery(&self) {
        self.toggle_discovery(true);
    }

    pub fn disable_discovery(&self) {
        self.toggle_discovery(false);
    }

    pub fn is_discovery_enabled(&self) -> bool {
        self.discovery_enabled.load(Ordering::Acquire)
    }

    /// Full key pairs in the `{"keys": [...]}` shape.
    pub fn private_keys(&self) -> KeySet {
        KeySet::new(
            self.records
                .iter()
                .filter(|r| r.is_key_pair())
                .cloned()
                .collect(),
        )
    }

    pub fn records(&self) -> &[KeyRecord] {
        &self.records
    }
}
