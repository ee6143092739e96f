//! ID token issuance.

use crate::error::Result;
use crate::jwks::{material, KeyStore};
use crate::jwt::claims::{ClaimSet, ClaimsBuilder};
use crate::jwt::options::SignOptions;
use crate::metrics;
use jsonwebtoken::{encode, Header};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Signs Cognito-shaped ID tokens with keys from a [`KeyStore`].
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    issuer: String,
    audience: String,
    store: Arc<KeyStore>,
}

impl TokenIssuer {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>, store: Arc<KeyStore>) -> Self {
        TokenIssuer {
            issuer: issuer.into(),
            audience: audience.into(),
            store,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Merges `overrides` over the default claims and signs the result.
    #[instrument(skip_all, fields(overrides = overrides.len()))]
    pub fn issue(&self, overrides: ClaimSet, options: &SignOptions) -> Result<String> {
        let claims = ClaimsBuilder::new(self.issuer.as_str(), self.audience.as_str())
            .overrides(overrides)
            .build();

        self.sign_claims(&claims, options).inspect_err(|err| {
            warn!(error = %err, "Token signing failed");
            metrics::record_signing_failure(err.code());
        })
    }

    /// Signs an already complete claim set without adding defaults.
    pub fn sign_claims(&self, claims: &ClaimSet, options: &SignOptions) -> Result<String> {
        let key = self.store.select_signing_key()?;
        let encoding_key = material::encoding_key(key)?;

        let algorithm = match options.algorithm {
            Some(algorithm) => algorithm,
            None => material::algorithm(key.alg())?,
        };
        let kid = options
            .key_id
            .clone()
            .unwrap_or_else(|| key.kid().to_string());

        debug!(kid = %kid, algorithm = ?algorithm, "Signing token");

        let mut header = Header::new(algorithm);
        header.kid = Some(kid);
        let token = encode(&header, claims, &encoding_key)?;

        metrics::record_token_issued(&format!("{algorithm:?}"));
        Ok(token)
    }
}
