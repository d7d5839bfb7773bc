use std::env;

use crate::domain::DomainError;

/// Signing settings for issued tokens
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_minutes: i64,
    pub refresh_days: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes: 60,
            refresh_days: 7,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub profile: String,
    pub jwt: JwtConfig,
}

impl Config {
    /// Read configuration from the environment. `profile` overrides `PROFILE`.
    pub fn from_env(profile: Option<String>) -> Result<Self, DomainError> {
        let profile = profile
            .or_else(|| env::var("PROFILE").ok())
            .unwrap_or_else(|| "default".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            if profile == "default" {
                "sqlite://tracks.db?mode=rwc".to_string()
            } else {
                format!("sqlite://tracks_{}.db?mode=rwc", profile)
            }
        });

        let secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                "secret".to_string()
            }
            _ => {
                return Err(DomainError::Internal(
                    "JWT_SECRET environment variable must be set in production".to_string(),
                ));
            }
        };

        let defaults = JwtConfig::new(secret);
        let jwt = JwtConfig {
            expiration_minutes: parse_var("JWT_EXPIRATION_MINUTES")
                .unwrap_or(defaults.expiration_minutes),
            refresh_days: parse_var("JWT_REFRESH_DAYS").unwrap_or(defaults.refresh_days),
            ..defaults
        };

        Ok(Self {
            database_url,
            port: parse_var("PORT").unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            profile,
            jwt,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
