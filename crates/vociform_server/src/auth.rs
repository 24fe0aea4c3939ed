//! Bearer token authentication.
//!
//! Tokens are validated, not minted: the service accepts HS256 JWTs
//! issued by the identity provider and trusts the `sub` claim as the
//! user id.

use crate::{ApiError, AppState};
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;
use vociform_error::{AuthError, AuthErrorKind};

/// Key material for verifying inbound tokens.
#[derive(Clone)]
pub struct AuthKeys {
    decoding: DecodingKey,
    validation: Validation,
}

impl AuthKeys {
    /// Build verification keys from the shared HS256 secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify a token and extract the subject user id.
    ///
    /// # Errors
    ///
    /// Returns an error when the signature, expiry, or subject is
    /// invalid.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| AuthError::new(AuthErrorKind::InvalidToken(e.to_string())))?;
        data.claims
            .sub
            .parse()
            .map_err(|_| AuthError::new(AuthErrorKind::MalformedSubject(data.claims.sub)))
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: usize,
}

/// The authenticated caller, extracted from the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AuthError::new(AuthErrorKind::MissingToken))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::new(AuthErrorKind::MissingToken))?;

        let user_id = state.auth.verify(token)?;
        Ok(AuthUser(user_id))
    }
}
