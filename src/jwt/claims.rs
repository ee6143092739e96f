use serde_json::{json, Value};

/// Claim name to value. Overrides merge into defaults key by key.
pub type ClaimSet = serde_json::Map<String, Value>;

/// Cognito's default ID token lifetime.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;
pub const DEFAULT_AUDIENCE: &str = "24jrs1hc1wc2s2992h315athfa";
pub const DEFAULT_PREFERRED_USERNAME: &str = "mock.cognito";
pub const DEFAULT_EMAIL: &str = "mock.cognito@example.com";
pub const TOKEN_USE_ID: &str = "id";
pub const USERNAME_CLAIM: &str = "cognito:username";

/// Builds a Cognito-shaped ID token claim set.
pub struct ClaimsBuilder {
    issuer: String,
    audience: String,
    issued_at: Option<i64>,
    ttl_seconds: i64,
    overrides: ClaimSet,
}

impl ClaimsBuilder {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        ClaimsBuilder {
            issuer: issuer.into(),
            audience: audience.into(),
            issued_at: None,
            ttl_seconds: DEFAULT_TOKEN_TTL_SECS,
            overrides: ClaimSet::new(),
        }
    }

    /// Pins `iat` and `auth_time` instead of reading the clock.
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.issued_at = Some(timestamp);
        self
    }

    pub fn ttl_seconds(mut self, ttl: i64) -> Self {
        self.ttl_seconds = ttl;
        self
    }

    pub fn overrides(mut self, overrides: ClaimSet) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn claim(mut self, key: impl Into<String>, value: Value) -> Self {
        self.overrides.insert(key.into(), value);
        self
    }

    /// Defaults first, then overrides. No ordering checks on time claims.
    pub fn build(self) -> ClaimSet {
        // JWT uses whole seconds
        let now = self
            .issued_at
            .unwrap_or_else(|| chrono::Utc::now().timestamp());

        let mut claims = ClaimSet::new();
        claims.insert("iss".into(), json!(self.issuer));
        claims.insert("aud".into(), json!(self.audience));
        claims.insert("event_id".into(), json!(new_id()));
        claims.insert("token_use".into(), json!(TOKEN_USE_ID));
        claims.insert("auth_time".into(), json!(now));
        claims.insert("exp".into(), json!(now.saturating_add(self.ttl_seconds)));
        claims.insert("iat".into(), json!(now));
        claims.insert("sub".into(), json!(new_id()));
        claims.insert("email_verified".into(), json!(true));
        claims.insert("preferred_username".into(), json!(DEFAULT_PREFERRED_USERNAME));
        claims.insert("email".into(), json!(DEFAULT_EMAIL));
        claims.insert(USERNAME_CLAIM.into(), json!(new_id()));

        merge(claims, self.overrides)
    }
}

/// Shallow merge: every override key replaces the default wholesale.
pub fn merge(mut defaults: ClaimSet, overrides: ClaimSet) -> ClaimSet {
    defaults.extend(overrides);
    defaults
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
