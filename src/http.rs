//! HTTP routes around the key store and issuer.

use crate::error::MockCognitoError;
use crate::jwks::{Jwks, KeyStore};
use crate::jwt::{ClaimSet, SignOptions, TokenIssuer};
use crate::metrics;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const WELL_KNOWN_JWKS_PATH: &str = "/.well-known/jwks.json";
pub const TOKEN_PATH: &str = "/mock/token";

/// Shared handler state. Cloning shares the same key store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<KeyStore>,
    pub issuer: TokenIssuer,
}

/// Which routes to mount.
#[derive(Debug, Clone, Copy)]
pub struct Routes {
    pub well_known: bool,
    pub token: bool,
}

pub fn router(state: AppState, routes: Routes) -> Router {
    let mut router = Router::new();
    if routes.well_known {
        router = router.route(WELL_KNOWN_JWKS_PATH, get(well_known_jwks));
    }
    if routes.token {
        router = router.route(TOKEN_PATH, post(issue_token));
    }
    router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn well_known_jwks(State(state): State<AppState>) -> Result<Json<Jwks>, MockCognitoError> {
    match state.store.discovery_document() {
        Ok(jwks) => {
            metrics::record_discovery_request("served");
            Ok(Json(jwks))
        }
        Err(err) => {
            metrics::record_discovery_request("disabled");
            Err(err)
        }
    }
}

async fn issue_token(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, MockCognitoError> {
    let overrides = if body.iter().all(u8::is_ascii_whitespace) {
        ClaimSet::new()
    } else {
        match serde_json::from_slice::<Value>(&body)? {
            Value::Object(map) => map,
            _ => {
                return Err(MockCognitoError::Serialization(
                    "claim overrides must be a JSON object".to_string(),
                ))
            }
        }
    };

    let token = state.issuer.issue(overrides, &SignOptions::default())?;
    Ok(Json(json!({ "id_token": token })))
}

impl IntoResponse for MockCognitoError {
    fn into_response(self) -> Response {
        let status = match &self {
            MockCognitoError::DiscoveryDisabled => return StatusCode::NOT_FOUND.into_response(),
            MockCognitoError::Serialization(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({ "error": self.code(), "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}
