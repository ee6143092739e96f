//! End-to-end signing and verification against the published keys.

use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use mock_cognito::jwks::{default_key_pair, DEFAULT_KID};
use mock_cognito::{ClaimSet, KeyRecord, KeySet, MockCognito, MockCognitoConfig, MockCognitoError, SignOptions};
use serde_json::{json, Value};

const ISSUER: &str = "https://cognito-idp.us-east-1.amazonaws.com/us-east-1_mock";

fn rotation_key() -> KeyRecord {
    serde_json::from_str(include_str!("fixtures/rotation_key.json")).unwrap()
}

fn validation(mock: &MockCognito) -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&[mock.issuer()]);
    validation.set_audience(&[mock.audience()]);
    validation
}

/// Verifies a token with the published key named by its header.
fn verify(mock: &MockCognito, token: &str) -> Result<Value, jsonwebtoken::errors::Error> {
    let kid = decode_header(token)?.kid.expect("token header has kid");
    let jwks = mock.public_keys();
    let jwk = jwks.find_key(&kid).expect("kid is published");
    let key = jwk.decoding_key().unwrap();
    decode::<Value>(token, &key, &validation(mock)).map(|data| data.claims)
}

#[test]
fn test_custom_claim_round_trip() {
    let mock = MockCognito::new(MockCognitoConfig::new(ISSUER)).unwrap();

    let mut overrides = ClaimSet::new();
    let joined = [Some(1), None, Some(3)]
        .iter()
        .map(|v| v.map(|n: i32| n.to_string()).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");
    overrides.insert("custom:a".into(), json!(joined));

    let token = mock.sign(overrides, &SignOptions::default()).unwrap();
    let claims = verify(&mock, &token).unwrap();

    assert_eq!(claims["custom:a"], "1,,3");
    let parts: Vec<&str> = claims["custom:a"].as_str().unwrap().split(',').collect();
    assert_eq!(parts, vec!["1", "", "3"]);
    assert_eq!(claims["aud"], mock.audience());
    assert_eq!(claims["iss"], mock.issuer());
    assert_eq!(claims["token_use"], "id");
    assert_eq!(claims["preferred_username"], "mock.cognito");
    assert!(claims["cognito:username"].is_string());
}

#[test]
fn test_default_token_verifies() {
    let mock = MockCognito::new(MockCognitoConfig::new(ISSUER).with_audience("client-abc")).unwrap();
    let token = mock.sign(ClaimSet::new(), &SignOptions::default()).unwrap();

    let header = decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::RS256);
    assert_eq!(header.kid.as_deref(), Some(DEFAULT_KID));

    let claims = verify(&mock, &token).unwrap();
    assert_eq!(claims["aud"], "client-abc");
    assert_eq!(
        claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap(),
        3600
    );
}

#[test]
fn test_wrong_audience_rejected() {
    let mock = MockCognito::new(MockCognitoConfig::new(ISSUER)).unwrap();
    let mut overrides = ClaimSet::new();
    overrides.insert("aud".into(), json!("someone-else"));

    let token = mock.sign(overrides, &SignOptions::default()).unwrap();
    assert!(verify(&mock, &token).is_err());
}

#[test]
fn test_verification_requires_matching_kid() {
    let keys = KeySet::new(vec![default_key_pair(), rotation_key()]);
    let mock = MockCognito::new(MockCognitoConfig::new(ISSUER).with_keys(keys)).unwrap();
    let jwks = mock.public_keys();
    assert_eq!(jwks.keys.len(), 2);

    let mut seen = std::collections::HashSet::new();
    for _ in 0..40 {
        let token = mock.sign(ClaimSet::new(), &SignOptions::default()).unwrap();
        let kid = decode_header(&token).unwrap().kid.unwrap();
        seen.insert(kid.clone());

        assert!(verify(&mock, &token).is_ok());

        let other = jwks.keys.iter().find(|k| k.kid != kid).unwrap();
        let wrong_key = other.decoding_key().unwrap();
        assert!(decode::<Value>(&token, &wrong_key, &validation(&mock)).is_err());
    }

    // Both pairs are eligible for selection.
    assert_eq!(seen.len(), 2);
}

#[test]
fn test_injected_key_signs() {
    let keys = KeySet::new(vec![rotation_key()]);
    let mock = MockCognito::new(MockCognitoConfig::new(ISSUER).with_keys(keys)).unwrap();

    let token = mock.sign(ClaimSet::new(), &SignOptions::default()).unwrap();
    assert_eq!(decode_header(&token).unwrap().kid.as_deref(), Some("rotation-test-2"));
    assert!(verify(&mock, &token).is_ok());
}

#[test]
fn test_sign_options_override_kid() {
    let mock = MockCognito::new(MockCognitoConfig::new(ISSUER)).unwrap();
    let options = SignOptions::new().with_key_id("not-published");

    let token = mock.sign(ClaimSet::new(), &options).unwrap();
    assert_eq!(decode_header(&token).unwrap().kid.as_deref(), Some("not-published"));
    assert!(mock.public_keys().find_key("not-published").is_none());
}

#[test]
fn test_malformed_key_surfaces_signing_error() {
    let mut broken: Value = serde_json::to_value(default_key_pair()).unwrap();
    broken["d"] = json!("AQAB");
    let record: KeyRecord = serde_json::from_value(broken).unwrap();
    let mock = MockCognito::new(MockCognitoConfig::new(ISSUER).with_keys(KeySet::new(vec![record]))).unwrap();

    let err = mock.sign(ClaimSet::new(), &SignOptions::default()).unwrap_err();
    assert!(matches!(err, MockCognitoError::Signing(_)));
}

#[test]
fn test_degenerate_primes_are_errors_not_panics() {
    for (member, value) in [("p", "AA"), ("q", "AQ"), ("p", "AAAB")] {
        let mut broken: Value = serde_json::to_value(default_key_pair()).unwrap();
        broken[member] = json!(value);
        let record: KeyRecord = serde_json::from_value(broken).unwrap();
        let mock = MockCognito::new(MockCognitoConfig::new(ISSUER).with_keys(KeySet::new(vec![record]))).unwrap();

        let err = mock.sign(ClaimSet::new(), &SignOptions::default()).unwrap_err();
        assert!(matches!(err, MockCognitoError::Signing(_)), "{member}={value}");
    }
}

#[test]
fn test_public_only_store_has_no_signing_key() {
    let public = KeyRecord::public_key(default_key_pair().public_projection());
    let mock = MockCognito::new(MockCognitoConfig::new(ISSUER).with_keys(KeySet::new(vec![public]))).unwrap();

    assert_eq!(mock.public_keys().keys.len(), 1);
    let err = mock.sign(ClaimSet::new(), &SignOptions::default()).unwrap_err();
    assert!(matches!(err, MockCognitoError::NoKeysAvailable));
}

#[test]
fn test_private_keys_serialize_as_jwks() {
    let mock = MockCognito::new(MockCognitoConfig::new(ISSUER)).unwrap();
    let value = serde_json::to_value(mock.private_keys()).unwrap();

    let key = &value["keys"][0];
    for member in ["kty", "n", "e", "d", "p", "q", "dp", "dq", "qi", "alg", "kid"] {
        assert!(key.get(member).is_some(), "missing {member}");
    }
}
