use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use axum::{
    async_trait,
    extract::{FromRequestParts, Json},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};
use serde_json::json;

use crate::domain::{DomainError, Viewer};
use crate::infrastructure::AppState;
use crate::infrastructure::config::JwtConfig;

/// Header prefixes accepted in front of a token
const TOKEN_PREFIXES: [&str; 2] = ["JWT ", "Bearer "];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub exp: usize,
    /// Issue time of the first token in a refresh chain
    pub orig_iat: i64,
}

pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DomainError::Internal(e.to_string()))?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, DomainError> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| DomainError::Internal(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn create_jwt(config: &JwtConfig, username: &str) -> Result<String, DomainError> {
    create_jwt_in_chain(config, username, Utc::now().timestamp())
}

/// Sign a token that keeps `orig_iat` from an earlier token
pub fn create_jwt_in_chain(
    config: &JwtConfig,
    username: &str,
    orig_iat: i64,
) -> Result<String, DomainError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::minutes(config.expiration_minutes))
        .ok_or_else(|| DomainError::Internal("token expiry out of range".to_string()))?
        .timestamp();

    let claims = Claims {
        sub: username.to_owned(),
        exp: expiration as usize,
        orig_iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| DomainError::Internal(e.to_string()))
}

pub fn decode_jwt(config: &JwtConfig, token: &str) -> Result<Claims, DomainError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        DomainError::Authentication("Invalid or expired token".to_string())
    })
}

/// Extract the raw token from an `Authorization` header value
pub fn token_from_header(value: &str) -> Option<&str> {
    TOKEN_PREFIXES
        .iter()
        .find_map(|prefix| value.strip_prefix(prefix))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Turn an optional `Authorization` header into the requester.
/// No header means anonymous; anything unusable is an authentication error.
pub async fn resolve_viewer(state: &AppState, header: Option<&str>) -> Result<Viewer, DomainError> {
    let Some(header) = header else {
        return Ok(Viewer::Anonymous);
    };

    let token = token_from_header(header).ok_or_else(|| {
        DomainError::Authentication("Invalid Authorization header format".to_string())
    })?;
    let claims = decode_jwt(&state.jwt, token)?;

    match state.user_repo.find_by_username(&claims.sub).await? {
        Some(user) => Ok(Viewer::User(user)),
        None => {
            tracing::warn!("Token for unknown user: {}", claims.sub);
            Err(DomainError::Authentication("User does not exist".to_string()))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Viewer {
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid Authorization header format" })),
                )
            })?),
            None => None,
        };

        resolve_viewer(state, header).await.map_err(|e| match e {
            DomainError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": msg })))
            }
            other => {
                tracing::error!("Failed to resolve viewer: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_header_prefixes() {
        assert_eq!(token_from_header("JWT abc.def"), Some("abc.def"));
        assert_eq!(token_from_header("Bearer abc.def"), Some("abc.def"));
        assert_eq!(token_from_header("Basic abc"), None);
        assert_eq!(token_from_header("Bearer "), None);
    }

    #[test]
    fn test_jwt_round_trip_and_wrong_secret() {
        let config = JwtConfig::new("unit-test-secret");
        let token = create_jwt(&config, "sdq").expect("token");

        let claims = decode_jwt(&config, &token).expect("claims");
        assert_eq!(claims.sub, "sdq");

        let other = JwtConfig::new("another-secret");
        assert!(matches!(
            decode_jwt(&other, &token),
            Err(DomainError::Authentication(_))
        ));
    }
}
