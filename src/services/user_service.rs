//! User Service - registration, lookups and token issuing

use serde::Serialize;

use crate::auth::{create_jwt, create_jwt_in_chain, decode_jwt, hash_password, verify_password};
use crate::config::JwtConfig;
use crate::domain::{DomainError, NewUser, USERNAME_MAX_LEN, UserRepository, Viewer};
use crate::models::User;

/// Decoded token contents returned by `verify_token`
#[derive(Debug, Clone, Serialize)]
pub struct TokenPayload {
    pub username: String,
    pub exp: usize,
    pub orig_iat: i64,
}

/// Input for registering a user
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl RegisterUser {
    fn validate(&self) -> Result<(), DomainError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(DomainError::Validation("Username must not be blank".into()));
        }
        if username.chars().count() > USERNAME_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "Username must be at most {} characters",
                USERNAME_MAX_LEN
            )));
        }
        if self.password.is_empty() {
            return Err(DomainError::Validation("Password must not be blank".into()));
        }
        if !is_plausible_email(&self.email) {
            return Err(DomainError::Validation(format!(
                "Enter a valid email address: {}",
                self.email
            )));
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

pub async fn list_users(users: &dyn UserRepository) -> Result<Vec<User>, DomainError> {
    users.find_all().await
}

pub async fn get_user(users: &dyn UserRepository, id: i32) -> Result<User, DomainError> {
    users.find_by_id(id).await?.ok_or(DomainError::NotFound("User"))
}

pub fn me(viewer: &Viewer) -> Result<User, DomainError> {
    viewer
        .require_user("Anonymous user not allowed")
        .cloned()
}

pub async fn create_user(
    users: &dyn UserRepository,
    input: RegisterUser,
) -> Result<User, DomainError> {
    input.validate()?;

    let password_hash = hash_password(&input.password)?;
    let user = users
        .create(NewUser {
            username: input.username.trim().to_string(),
            email: input.email,
            password_hash,
        })
        .await?;

    tracing::info!("User registered: {}", user.username);
    Ok(user)
}

/// Exchange credentials for a signed token
pub async fn token_auth(
    users: &dyn UserRepository,
    jwt: &JwtConfig,
    username: &str,
    password: &str,
) -> Result<String, DomainError> {
    tracing::info!("Login attempt for user: {}", username);
    let invalid = || DomainError::Authentication("Please enter valid credentials".to_string());

    let Some(credentials) = users.find_credentials(username).await? else {
        tracing::warn!("User not found: {}", username);
        return Err(invalid());
    };

    if !verify_password(password, &credentials.password_hash)? {
        tracing::warn!("Password verification failed for user: {}", username);
        return Err(invalid());
    }

    create_jwt(jwt, &credentials.user.username)
}

pub fn verify_token(jwt: &JwtConfig, token: &str) -> Result<TokenPayload, DomainError> {
    let claims = decode_jwt(jwt, token)?;
    Ok(TokenPayload {
        username: claims.sub,
        exp: claims.exp,
        orig_iat: claims.orig_iat,
    })
}

/// Issue a fresh token for a valid one, as long as the chain started within
/// the refresh window.
pub fn refresh_token(jwt: &JwtConfig, token: &str) -> Result<String, DomainError> {
    let claims = decode_jwt(jwt, token)?;

    let refresh_deadline = claims.orig_iat + jwt.refresh_days * 24 * 60 * 60;
    if chrono::Utc::now().timestamp() > refresh_deadline {
        return Err(DomainError::Authentication(
            "Refresh has expired".to_string(),
        ));
    }

    create_jwt_in_chain(jwt, &claims.sub, claims.orig_iat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_check() {
        assert!(is_plausible_email("sdq@example.com"));
        assert!(!is_plausible_email("sdq"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("sdq@localhost"));
    }

    #[test]
    fn test_refresh_keeps_original_issue_time() {
        let jwt = JwtConfig::new("refresh-secret");
        let token = create_jwt_in_chain(&jwt, "sdq", 1_000).expect("token");

        // orig_iat far in the past: refresh window closed
        assert!(matches!(
            refresh_token(&jwt, &token),
            Err(DomainError::Authentication(_))
        ));

        let now = chrono::Utc::now().timestamp();
        let token = create_jwt_in_chain(&jwt, "sdq", now).expect("token");
        let refreshed = refresh_token(&jwt, &token).expect("refreshed");
        let payload = verify_token(&jwt, &refreshed).expect("payload");
        assert_eq!(payload.username, "sdq");
        assert_eq!(payload.orig_iat, now);
    }
}
