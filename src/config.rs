//! Configuration for the mock issuer.
//!
//! [`MockCognitoConfig`] is what an embedding test builds directly.
//! [`Config`] wraps it with listener settings and is loaded from the
//! environment by the binary.

use crate::error::{MockCognitoError, Result};
use crate::jwks::{default_key_set, KeySet};
use crate::jwt::claims::DEFAULT_AUDIENCE;
use std::env;
use std::path::Path;

/// Issuer settings consumed when a mock instance is created.
#[derive(Debug, Clone)]
pub struct MockCognitoConfig {
    /// Value of the `iss` claim
    pub issuer: String,
    /// Value of the `aud` claim
    pub audience: String,
    /// Mount `GET /.well-known/jwks.json`
    pub mount_well_known: bool,
    /// Mount `POST /mock/token`
    pub mount_token_route: bool,
    /// Signing and published keys
    pub keys: KeySet,
}

impl MockCognitoConfig {
    pub fn new(issuer: impl Into<String>) -> Self {
        MockCognitoConfig {
            issuer: issuer.into(),
            audience: DEFAULT_AUDIENCE.to_string(),
            mount_well_known: true,
            mount_token_route: false,
            keys: default_key_set(),
        }
    }

    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    #[must_use]
    pub fn with_mount_well_known(mut self, mount: bool) -> Self {
        self.mount_well_known = mount;
        self
    }

    #[must_use]
    pub fn with_mount_token_route(mut self, mount: bool) -> Self {
        self.mount_token_route = mount;
        self
    }

    #[must_use]
    pub fn with_keys(mut self, keys: KeySet) -> Self {
        self.keys = keys;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.issuer.trim().is_empty() {
            return Err(MockCognitoError::config("issuer is required"));
        }
        if self.keys.keys.is_empty() {
            return Err(MockCognitoError::config("at least one key is required"));
        }
        Ok(())
    }
}

/// Process configuration for the standalone server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Issuer settings
    pub cognito: MockCognitoConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or invalid.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&lookup, "PORT", 9229)?;

        let issuer = lookup("MOCK_COGNITO_ISSUER")
            .ok_or_else(|| MockCognitoError::config("MOCK_COGNITO_ISSUER is required"))?;
        let audience =
            lookup("MOCK_COGNITO_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string());
        let mount_well_known = parse_var(&lookup, "MOCK_COGNITO_MOUNT_WELL_KNOWN", true)?;
        let mount_token_route = parse_var(&lookup, "MOCK_COGNITO_MOUNT_TOKEN_ROUTE", true)?;

        let keys = match lookup("MOCK_COGNITO_KEYS_FILE") {
            Some(path) => load_key_file(Path::new(&path))?,
            None => default_key_set(),
        };

        let cognito = MockCognitoConfig::new(issuer)
            .with_audience(audience)
            .with_mount_well_known(mount_well_known)
            .with_mount_token_route(mount_token_route)
            .with_keys(keys);
        cognito.validate()?;

        Ok(Self {
            host,
            port,
            cognito,
        })
    }
}

/// Reads a JSON Web Key Set of full key pairs from disk.
pub fn load_key_file(path: &Path) -> Result<KeySet> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        MockCognitoError::config(format!("Cannot read keys file {}: {}", path.display(), e))
    })?;
    KeySet::from_json(&contents)
}

/// Parse a variable with default value.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(val) => val
            .parse()
            .map_err(|e| MockCognitoError::config(format!("Invalid {}: {}", name, e))),
        None => Ok(default),
    }
}
