#![forbid(unsafe_code)]
//! Bearer-token identity: issue and verify signed subject tokens, and the
//! request extractors that resolve them.
//!
//! Token shape: `<userNo>.<ROLE>.<expiresAtUnix>.<sig>` where `sig` is the
//! lowercase hex HMAC-SHA256 of the first three fields.

use crate::error::ApiError;
use crate::state::AppState;
use crate::support::now_unix_secs;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use cp_core::{Role, Subject, UserNo};
use sha2::{Digest, Sha256};
use std::convert::Infallible;
use std::fmt;
use std::fmt::Write as _;

pub const MIN_SECRET_LEN: usize = 16;
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;

const HMAC_BLOCK_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("token secret must be at least 16 bytes")]
    SecretTooShort,
    #[error("malformed token")]
    Malformed,
    #[error("token signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

#[derive(Clone)]
pub struct IdentityConfig {
    secret: Vec<u8>,
    ttl_secs: u64,
}

impl IdentityConfig {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_secs: u64) -> Result<Self, IdentityError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(IdentityError::SecretTooShort);
        }
        Ok(Self { secret, ttl_secs })
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct IdentityProvider {
    config: IdentityConfig,
}

impl IdentityProvider {
    pub fn new(config: IdentityConfig) -> Self {
        Self { config }
    }

    pub fn issue(&self, subject: &Subject, now_unix: i64) -> String {
        let ttl = i64::try_from(self.config.ttl_secs).unwrap_or(i64::MAX);
        let expires_at = now_unix.saturating_add(ttl);
        let payload = format!(
            "{}.{}.{}",
            subject.user_no,
            subject.role.as_str(),
            expires_at
        );
        let sig = self.sign(payload.as_bytes());
        format!("{payload}.{sig}")
    }

    pub fn verify(&self, token: &str, now_unix: i64) -> Result<Subject, IdentityError> {
        let (payload, sig) = token.rsplit_once('.').ok_or(IdentityError::Malformed)?;
        let expected = self.sign(payload.as_bytes());
        if !constant_time_eq(expected.as_bytes(), sig.as_bytes()) {
            return Err(IdentityError::BadSignature);
        }

        let mut fields = payload.split('.');
        let (Some(user_no), Some(role), Some(expires_at), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(IdentityError::Malformed);
        };
        let user_no = UserNo::parse(user_no).map_err(|_| IdentityError::Malformed)?;
        let role = Role::parse(role).ok_or(IdentityError::Malformed)?;
        let expires_at: i64 = expires_at.parse().map_err(|_| IdentityError::Malformed)?;
        if expires_at <= now_unix {
            return Err(IdentityError::Expired);
        }
        Ok(Subject::new(user_no, role))
    }

    fn sign(&self, data: &[u8]) -> String {
        let mac = hmac_sha256(&self.config.secret, data);
        let mut out = String::with_capacity(mac.len() * 2);
        for b in mac {
            let _ = write!(&mut out, "{:02x}", b);
        }
        out
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut key_block = [0u8; HMAC_BLOCK_SIZE];
    if key.len() > HMAC_BLOCK_SIZE {
        let hashed = Sha256::digest(key);
        key_block[..hashed.len()].copy_from_slice(&hashed);
    } else {
        key_block[..key.len()].copy_from_slice(key);
    }

    let mut ipad = [0x36u8; HMAC_BLOCK_SIZE];
    let mut opad = [0x5cu8; HMAC_BLOCK_SIZE];
    for i in 0..HMAC_BLOCK_SIZE {
        ipad[i] ^= key_block[i];
        opad[i] ^= key_block[i];
    }

    let mut inner = Sha256::new();
    inner.update(ipad);
    inner.update(data);
    let inner_hash = inner.finalize();

    let mut outer = Sha256::new();
    outer.update(opad);
    outer.update(inner_hash);

    let mut mac = [0u8; 32];
    mac.copy_from_slice(&outer.finalize());
    mac
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Extracts the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

/// Read-path identity. A missing or rejected token yields an anonymous viewer.
#[derive(Debug, Clone)]
pub struct Viewer(pub Option<Subject>);

/// Write-path identity. A missing or rejected token fails with Unauthorized.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Subject);

#[async_trait]
impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(Viewer(None));
        };
        match state.identity.verify(token, now_unix_secs()) {
            Ok(subject) => Ok(Viewer(Some(subject))),
            Err(err) => {
                tracing::warn!(error = %err, "credential rejected; treating viewer as anonymous");
                Ok(Viewer(None))
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;
        state
            .identity
            .verify(token, now_unix_secs())
            .map(Authenticated)
            .map_err(|err| {
                tracing::warn!(error = %err, "credential rejected");
                ApiError::unauthorized(err.to_string())
            })
    }
}
