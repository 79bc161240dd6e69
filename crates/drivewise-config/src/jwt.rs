use anyhow::{Context, bail};
use std::env;

/// Signing configuration for bearer tokens.
///
/// The secret has no default: a missing or blank `JWT_SECRET` is a startup
/// error so a deployment can never run with a well-known key.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, access_token_expiry: i64) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        Ok(Self {
            secret,
            access_token_expiry: crate::env_or("JWT_ACCESS_EXPIRY", 3600), // 1 hour
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_values() {
        let config = JwtConfig::new("s3cr3t", 120);
        assert_eq!(config.secret, "s3cr3t");
        assert_eq!(config.access_token_expiry, 120);
    }
}
