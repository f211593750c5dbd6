//! Signed token verification and issuing
//!
//! Tokens are compact HMAC-signed JWTs. The validator accepts exactly the
//! configured algorithm and requires an `exp` claim; an `nbf` claim, when
//! present, is enforced too. There is no leeway on either bound. The issuer mints short-lived demo tokens for tests and the CLI.

use crate::config::SecurityConfig;
use crate::error::{AuthError, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Decoded claims, keyed by claim name
pub type ClaimSet = serde_json::Map<String, serde_json::Value>;

/// Lifetime of issued tokens
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(5 * 60);

/// Value of the `msg` claim in issued tokens
pub const DEMO_MESSAGE_TAG: &str = "devops-test";

#[derive(Debug, Serialize)]
struct DemoClaims<'a> {
    exp: u64,
    msg: &'a str,
}

/// Verifies tokens against the configured secret and algorithm
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a validator for the given configuration
    pub fn new(config: &SecurityConfig) -> Self {
        let mut validation = Validation::new(config.jwt_algorithm.into());
        validation.leeway = 0;
        validation.validate_nbf = true;

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and return its claims.
    ///
    /// Every failure, including an absent token, collapses into
    /// [`AuthError::InvalidJwt`]. The underlying reason is only logged.
    pub fn validate(&self, token: Option<&str>) -> Result<ClaimSet> {
        let token = token.ok_or_else(|| {
            debug!("JWT header missing");
            AuthError::InvalidJwt
        })?;

        decode::<ClaimSet>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(reason = %e, "JWT rejected");
                AuthError::InvalidJwt
            })
    }
}

/// Mints demo tokens carrying `exp` and `msg`
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    header: Header,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer for the given configuration
    pub fn new(config: &SecurityConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            header: Header::new(config.jwt_algorithm.into()),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Override the token lifetime
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token expiring `ttl` from now
    pub fn issue(&self) -> Result<String> {
        self.issue_at(jsonwebtoken::get_current_timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix seconds)
    pub fn issue_at(&self, now: u64) -> Result<String> {
        let claims = DemoClaims {
            exp: now.saturating_add(self.ttl.as_secs()),
            msg: DEMO_MESSAGE_TAG,
        };
        encode(&self.header, &claims, &self.key).map_err(AuthError::TokenSigning)
    }
}
