use jsonwebtoken::Algorithm;

/// Header overrides for a single signing call.
///
/// Unset fields follow the selected key: its `alg` and its `kid`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignOptions {
    pub algorithm: Option<Algorithm>,
    pub key_id: Option<String>,
}

impl SignOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    #[must_use]
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }
}
