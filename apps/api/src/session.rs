//! Demo sessions and per-session onboarding storage.
//!
//! Stands in for the browser-local storage the hosted product uses: wizard
//! progress and trial answers live under four fixed keys, scoped to a demo
//! session bearer token. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub const ONBOARDING_STEP_KEY: &str = "relay-onboarding-step";
pub const TRIAL_DATA_KEY: &str = "relay-trial-data";
pub const DEMO_MODE_KEY: &str = "relay-demo-mode";
pub const DEMO_ROLE_KEY: &str = "relay-demo-role";

/// The only keys the storage surface accepts.
pub const STORAGE_KEYS: &[&str] = &[
    ONBOARDING_STEP_KEY,
    TRIAL_DATA_KEY,
    DEMO_MODE_KEY,
    DEMO_ROLE_KEY,
];

pub fn is_storage_key(key: &str) -> bool {
    STORAGE_KEYS.contains(&key)
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoSession {
    pub token: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

struct SessionEntry {
    role: String,
    storage: HashMap<String, Value>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, role: &str) -> DemoSession {
        let session = DemoSession {
            token: Uuid::new_v4(),
            role: role.to_string(),
            created_at: Utc::now(),
        };
        self.inner.write().insert(
            session.token,
            SessionEntry {
                role: session.role.clone(),
                storage: HashMap::new(),
            },
        );
        session
    }

    pub fn authenticate(&self, token: &Uuid) -> bool {
        self.inner.read().contains_key(token)
    }

    pub fn role(&self, token: &Uuid) -> Option<String> {
        self.inner.read().get(token).map(|s| s.role.clone())
    }

    /// `None` means the session does not exist; the inner option is whether
    /// the key has been written.
    pub fn get_storage(&self, token: &Uuid, key: &str) -> Option<Option<Value>> {
        self.inner
            .read()
            .get(token)
            .map(|s| s.storage.get(key).cloned())
    }

    /// Returns false when the session does not exist.
    pub fn put_storage(&self, token: &Uuid, key: &str, value: Value) -> bool {
        match self.inner.write().get_mut(token) {
            Some(session) => {
                session.storage.insert(key.to_string(), value);
                true
            }
            None => false,
        }
    }
}

/// Pulls the session token out of an `Authorization: Bearer <uuid>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
}

// ────────────────────────────────────────────────────────────────────────────
// Route handlers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DemoSessionRequest {
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "csm".to_string()
}

/// POST /api/session/demo
pub async fn handle_create_demo_session(
    State(state): State<AppState>,
    Json(req): Json<DemoSessionRequest>,
) -> Json<DemoSession> {
    let session = state.sessions.create(&req.role);
    info!("Created demo session for role {}", session.role);
    Json(session)
}

/// GET /api/session/storage/:key
pub async fn handle_get_storage(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    if !is_storage_key(&key) {
        return Err(AppError::Validation(format!("Unknown storage key: {key}")));
    }
    let value = state
        .sessions
        .get_storage(&token, &key)
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(value.unwrap_or(Value::Null)))
}

/// PUT /api/session/storage/:key
pub async fn handle_put_storage(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> Result<StatusCode, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    if !is_storage_key(&key) {
        return Err(AppError::Validation(format!("Unknown storage key: {key}")));
    }
    if state.sessions.put_storage(&token, &key, value) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_create_and_authenticate() {
        let store = SessionStore::new();
        let session = store.create("manager");

        assert!(store.authenticate(&session.token));
        assert_eq!(store.role(&session.token).as_deref(), Some("manager"));
        assert!(!store.authenticate(&Uuid::new_v4()));
    }

    #[test]
    fn test_storage_round_trip() {
        let store = SessionStore::new();
        let session = store.create("csm");

        assert_eq!(
            store.get_storage(&session.token, ONBOARDING_STEP_KEY),
            Some(None)
        );
        assert!(store.put_storage(&session.token, ONBOARDING_STEP_KEY, serde_json::json!(3)));
        assert_eq!(
            store.get_storage(&session.token, ONBOARDING_STEP_KEY),
            Some(Some(serde_json::json!(3)))
        );
    }

    #[test]
    fn test_storage_rejects_unknown_session() {
        let store = SessionStore::new();
        assert!(!store.put_storage(&Uuid::new_v4(), DEMO_MODE_KEY, Value::Bool(true)));
        assert_eq!(store.get_storage(&Uuid::new_v4(), DEMO_MODE_KEY), None);
    }

    #[test]
    fn test_storage_keys_are_the_fixed_four() {
        for key in [
            "relay-onboarding-step",
            "relay-trial-data",
            "relay-demo-mode",
            "relay-demo-role",
        ] {
            assert!(is_storage_key(key));
        }
        assert!(!is_storage_key("relay-theme"));
    }

    #[test]
    fn test_bearer_token_parsing() {
        let token = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        assert_eq!(bearer_token(&headers), Some(token));
    }

    #[test]
    fn test_bearer_token_rejects_malformed_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer not-a-uuid"),
        );
        assert_eq!(bearer_token(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic abc123"),
        );
        assert_eq!(bearer_token(&headers), None);
    }
}
