//! The embeddable mock: one key store, one issuer, optional routes.

use crate::config::MockCognitoConfig;
use crate::error::Result;
use crate::http::{self, AppState, Routes};
use crate::jwks::{Jwks, KeySet, KeyStore};
use crate::jwt::{ClaimSet, SignOptions, TokenIssuer};
use axum::Router;
use std::sync::Arc;
use tracing::info;

/// A self-contained mock Cognito user pool.
///
/// Instances are independent: each owns its keys and its discovery flag,
/// so parallel tests can run separate mocks in one process.
#[derive(Clone)]
pub struct MockCognito {
    store: Arc<KeyStore>,
    issuer: TokenIssuer,
    routes: Routes,
}

impl MockCognito {
    /// Validates the configuration and builds the key store.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a missing issuer, an empty key set
    /// or duplicate key ids.
    pub fn new(config: MockCognitoConfig) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(KeyStore::new(config.keys)?);
        let issuer = TokenIssuer::new(config.issuer, config.audience, Arc::clone(&store));

        info!(
            issuer = issuer.issuer(),
            audience = issuer.audience(),
            keys = store.records().len(),
            "Mock Cognito initialized"
        );

        Ok(Self {
            store,
            issuer,
            routes: Routes {
                well_known: config.mount_well_known,
                token: config.mount_token_route,
            },
        })
    }

    pub fn issuer(&self) -> &str {
        self.issuer.issuer()
    }

    pub fn audience(&self) -> &str {
        self.issuer.audience()
    }

    /// Signs an ID token with default claims overridden by `claims`.
    pub fn sign(&self, claims: ClaimSet, options: &SignOptions) -> Result<String> {
        self.issuer.issue(claims, options)
    }

    pub fn enable_well_known(&self) {
        self.store.enable_discovery();
    }

    pub fn disable_well_known(&self) {
        self.store.disable_discovery();
    }

    pub fn public_keys(&self) -> Jwks {
        self.store.public_document()
    }

    pub fn private_keys(&self) -> KeySet {
        self.store.private_keys()
    }

    pub fn key_store(&self) -> Arc<KeyStore> {
        Arc::clone(&self.store)
    }

    /// Router sharing this instance's key store and discovery flag.
    pub fn router(&self) -> Router {
        let state = AppState {
            store: Arc::clone(&self.store),
            issuer: self.issuer.clone(),
        };
        http::router(state, self.routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MockCognitoError;

    #[test]
    fn test_empty_keys_fail_fast() {
        let config = MockCognitoConfig::new("iss").with_keys(KeySet::default());
        assert!(matches!(
            MockCognito::new(config),
            Err(MockCognitoError::Config(_))
        ));
    }

    #[test]
    fn test_private_and_public_keys_align() {
        let mock = MockCognito::new(MockCognitoConfig::new("iss")).unwrap();
        let private = mock.private_keys();
        let public = mock.public_keys();

        assert_eq!(private.keys.len(), public.keys.len());
        assert_eq!(private.public_projection(), public);
    }

    #[test]
    fn test_instances_have_independent_toggles() {
        let a = MockCognito::new(MockCognitoConfig::new("a")).unwrap();
        let b = MockCognito::new(MockCognitoConfig::new("b")).unwrap();

        a.disable_well_known();
        assert!(!a.key_store().is_discovery_enabled());
        assert!(b.key_store().is_discovery_enabled());
    }
}
