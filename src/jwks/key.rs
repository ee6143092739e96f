//! JSON Web Key records.
//!
//! A [`KeyRecord`] is either a public key (modulus and exponent only) or a
//! full RSA key pair. The public half of any record is its [`Jwk`]
//! projection, which is what the discovery document publishes.

use crate::error::{MockCognitoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Public RSA JSON Web Key as published in the discovery document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub n: String,
    pub e: String,
    pub alg: String,
    pub kid: String,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
}

impl Jwk {
    /// Builds a verification key from the published modulus and exponent.
    pub fn decoding_key(&self) -> Result<jsonwebtoken::DecodingKey> {
        crate::jwks::material::decoding_key(self)
    }
}

/// Private RSA parameters, base64url encoded as in RFC 7518 section 6.3.2.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct RsaPrivateParams {
    pub d: String,
    pub p: String,
    pub q: String,
    pub dp: String,
    pub dq: String,
    pub qi: String,
}

impl fmt::Debug for RsaPrivateParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RsaPrivateParams([REDACTED])")
    }
}

/// A public key, or a full key pair when private parameters are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeyRecordRepr", into = "KeyRecordRepr")]
pub struct KeyRecord {
    public: Jwk,
    private: Option<RsaPrivateParams>,
}

impl KeyRecord {
    pub fn public_key(public: Jwk) -> Self {
        KeyRecord {
            public,
            private: None,
        }
    }

    pub fn key_pair(public: Jwk, private: RsaPrivateParams) -> Self {
        KeyRecord {
            public,
            private: Some(private),
        }
    }

    pub fn kid(&self) -> &str {
        &self.public.kid
    }

    pub fn kty(&self) -> &str {
        &self.public.kty
    }

    pub fn alg(&self) -> &str {
        &self.public.alg
    }

    pub fn public(&self) -> &Jwk {
        &self.public
    }

    pub fn private_params(&self) -> Option<&RsaPrivateParams> {
        self.private.as_ref()
    }

    pub fn is_key_pair(&self) -> bool {
        self.private.is_some()
    }

    /// Public projection with identical `kid`, `kty`, `alg`, `n` and `e`.
    pub fn public_projection(&self) -> Jwk {
        self.public.clone()
    }
}

/// Flat wire form of a [`KeyRecord`].
///
/// Private members are either all present or all absent.
#[derive(Serialize, Deserialize)]
struct KeyRecordRepr {
    kty: String,
    n: String,
    e: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    p: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    qi: Option<String>,
    alg: String,
    kid: String,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    key_use: Option<String>,
}

impl TryFrom<KeyRecordRepr> for KeyRecord {
    type Error = MockCognitoError;

    fn try_from(repr: KeyRecordRepr) -> Result<Self> {
        let public = Jwk {
            kty: repr.kty,
            n: repr.n,
            e: repr.e,
            alg: repr.alg,
            kid: repr.kid,
            key_use: repr.key_use,
        };

        match (repr.d, repr.p, repr.q, repr.dp, repr.dq, repr.qi) {
            (None, None, None, None, None, None) => Ok(KeyRecord::public_key(public)),
            (Some(d), Some(p), Some(q), Some(dp), Some(dq), Some(qi)) => Ok(KeyRecord::key_pair(
                public,
                RsaPrivateParams { d, p, q, dp, dq, qi },
            )),
            _ => Err(MockCognitoError::config(format!(
                "key {} has partial private parameters (need d, p, q, dp, dq, qi)",
                public.kid
            ))),
        }
    }
}

impl From<KeyRecord> for KeyRecordRepr {
    fn from(record: KeyRecord) -> Self {
        let private = record.private.as_ref();
        KeyRecordRepr {
            d: private.map(|k| k.d.clone()),
            p: private.map(|k| k.p.clone()),
            q: private.map(|k| k.q.clone()),
            dp: private.map(|k| k.dp.clone()),
            dq: private.map(|k| k.dq.clone()),
            qi: private.map(|k| k.qi.clone()),
            kty: record.public.kty,
            n: record.public.n,
            e: record.public.e,
            alg: record.public.alg,
            kid: record.public.kid,
            key_use: record.public.key_use,
        }
    }
}

/// JSON Web Key Set of public keys (the discovery document).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    pub fn find_key(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// JSON Web Key Set of full records, in the same `{"keys": [...]}` shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    pub keys: Vec<KeyRecord>,
}

impl KeySet {
    pub fn new(keys: Vec<KeyRecord>) -> Self {
        KeySet { keys }
    }

    /// Parses a key set, e.g. one loaded from a keys file.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MockCognitoError::config(format!("invalid key set: {e}")))
    }

    pub fn public_projection(&self) -> Jwks {
        Jwks {
            keys: self.keys.iter().map(KeyRecord::public_projection).collect(),
        }
    }
}
