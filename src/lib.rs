//! Mock Cognito library.
//!
//! Issues RS256 ID tokens shaped like Amazon Cognito's and serves the
//! matching JSON Web Key Set, so integration tests can verify tokens
//! without reaching a real identity provider.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod http;
pub mod jwks;
pub mod jwt;
pub mod metrics;
pub mod mock;

// Re-exports for convenience
pub use config::{Config, MockCognitoConfig};
pub use error::{MockCognitoError, Result};
pub use jwks::{Jwk, Jwks, KeyRecord, KeySet, KeyStore};
pub use jwt::{ClaimSet, SignOptions, TokenIssuer};
pub use mock::MockCognito;
