use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MockCognitoError>;

#[derive(Error, Debug)]
pub enum MockCognitoError {
    #[error("No signing keys available")]
    NoKeysAvailable,

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Discovery document disabled")]
    DiscoveryDisabled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MockCognitoError {
    pub fn signing(msg: impl Into<String>) -> Self {
        MockCognitoError::Signing(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        MockCognitoError::Config(msg.into())
    }

    /// Stable code for HTTP error bodies and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            MockCognitoError::NoKeysAvailable => NO_KEYS_AVAILABLE,
            MockCognitoError::Signing(_) => SIGNING_ERROR,
            MockCognitoError::DiscoveryDisabled => DISCOVERY_DISABLED,
            MockCognitoError::Config(_) => CONFIG_ERROR,
            MockCognitoError::Serialization(_) => SERIALIZATION_ERROR,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for MockCognitoError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        MockCognitoError::Signing(err.to_string())
    }
}

impl From<serde_json::Error> for MockCognitoError {
    fn from(err: serde_json::Error) -> Self {
        MockCognitoError::Serialization(err.to_string())
    }
}

// Error codes for HTTP responses
pub const NO_KEYS_AVAILABLE: &str = "NO_KEYS_AVAILABLE";
pub const SIGNING_ERROR: &str = "SIGNING_ERROR";
pub const DISCOVERY_DISABLED: &str = "DISCOVERY_DISABLED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
