//! Key material reconstruction from JWK parameters.
//!
//! The JWT encoder wants PKCS#1 DER for RSA signing keys, so a full key
//! pair is rebuilt from its big-endian components and re-encoded.

use crate::error::{MockCognitoError, Result};
use crate::jwks::key::{Jwk, KeyRecord};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::{BigUint, RsaPrivateKey};
use std::str::FromStr;

/// Parses a JWK `alg` value into a JWT algorithm.
pub fn algorithm(alg: &str) -> Result<Algorithm> {
    Algorithm::from_str(alg)
        .map_err(|_| MockCognitoError::signing(format!("unsupported algorithm: {alg}")))
}

/// Rebuilds the RSA signing key of a full key pair.
pub fn encoding_key(record: &KeyRecord) -> Result<EncodingKey> {
    if record.kty() != "RSA" {
        return Err(MockCognitoError::signing(format!(
            "unsupported key type {} for key {}",
            record.kty(),
            record.kid()
        )));
    }

    let private = record.private_params().ok_or_else(|| {
        MockCognitoError::signing(format!("key {} has no private parameters", record.kid()))
    })?;

    let public = record.public();
    let n = component("n", &public.n)?;
    let e = component("e", &public.e)?;
    let d = component("d", &private.d)?;
    let p = component("p", &private.p)?;
    let q = component("q", &private.q)?;
    let dp = component("dp", &private.dp)?;
    let dq = component("dq", &private.dq)?;
    let qi = component("qi", &private.qi)?;

    let zero = BigUint::from(0u32);
    let one = BigUint::from(1u32);
    if n == zero || e == zero || d == zero {
        return Err(MockCognitoError::signing(format!(
            "key {} has a zero RSA parameter",
            record.kid()
        )));
    }
    if p <= one || q <= one {
        return Err(MockCognitoError::signing(format!(
            "key {} has a prime factor below 2",
            record.kid()
        )));
    }

    if &d % (&p - &one) != dp || &d % (&q - &one) != dq || (&qi * &q) % &p != one {
        return Err(MockCognitoError::signing(format!(
            "key {} has inconsistent CRT parameters",
            record.kid()
        )));
    }

    let key = RsaPrivateKey::from_components(n, e, d, vec![p, q])
        .map_err(|err| MockCognitoError::signing(format!("invalid RSA key {}: {err}", record.kid())))?;
    key.validate()
        .map_err(|err| MockCognitoError::signing(format!("invalid RSA key {}: {err}", record.kid())))?;

    let der = key
        .to_pkcs1_der()
        .map_err(|err| MockCognitoError::signing(format!("PKCS#1 encoding failed: {err}")))?;

    Ok(EncodingKey::from_rsa_der(der.as_bytes()))
}

/// Builds an RSA verification key from the published modulus and exponent.
pub fn decoding_key(jwk: &Jwk) -> Result<DecodingKey> {
    if jwk.kty != "RSA" {
        return Err(MockCognitoError::signing(format!(
            "unsupported key type {} for key {}",
            jwk.kty, jwk.kid
        )));
    }
    Ok(DecodingKey::from_rsa_components(&jwk.n, &jwk.e)?)
}

/// Decodes one base64url JWK member into an unsigned integer.
fn component(name: &str, encoded: &str) -> Result<BigUint> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded.trim_end_matches('='))
        .map_err(|err| MockCognitoError::signing(format!("invalid base64url in {name}: {err}")))?;

    if bytes.is_empty() {
        return Err(MockCognitoError::signing(format!("empty RSA parameter {name}")));
    }

    Ok(BigUint::from_bytes_be(&bytes))
}
