//! Security configuration
//!
//! The shared API key and the token signing secret are process-wide values
//! fixed at startup. They come from the environment or from a TOML file:
//!
//! ```toml
//! [security]
//! api_key = "2f5ae96c-b558-4c7b-a590-a501ae1c3f6c"
//! jwt_secret = "change-me"
//! jwt_algorithm = "HS256"
//! ```

use crate::error::{AuthError, Result};
use jsonwebtoken::Algorithm;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Environment variable holding the shared API key
pub const ENV_API_KEY: &str = "DEVOPS_API_KEY";
/// Environment variable holding the token signing secret
pub const ENV_JWT_SECRET: &str = "DEVOPS_JWT_SECRET";
/// Environment variable holding the signing algorithm name
pub const ENV_JWT_ALGORITHM: &str = "DEVOPS_JWT_ALGORITHM";

/// HMAC signing algorithms accepted for tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum SigningAlgorithm {
    /// HMAC with SHA-256
    #[default]
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,
}

impl SigningAlgorithm {
    /// Name as it appears in the token header
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningAlgorithm::HS256 => "HS256",
            SigningAlgorithm::HS384 => "HS384",
            SigningAlgorithm::HS512 => "HS512",
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "HS256" => Ok(SigningAlgorithm::HS256),
            "HS384" => Ok(SigningAlgorithm::HS384),
            "HS512" => Ok(SigningAlgorithm::HS512),
            other => Err(AuthError::Config(format!(
                "unsupported signing algorithm '{}' (expected HS256, HS384 or HS512)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for SigningAlgorithm {
    type Error = AuthError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SigningAlgorithm> for Algorithm {
    fn from(alg: SigningAlgorithm) -> Self {
        match alg {
            SigningAlgorithm::HS256 => Algorithm::HS256,
            SigningAlgorithm::HS384 => Algorithm::HS384,
            SigningAlgorithm::HS512 => Algorithm::HS512,
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secrets and algorithm used by the authentication gate
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SecurityConfig {
    /// Shared secret expected in the API key header
    pub api_key: String,

    /// HMAC key used to sign and verify tokens
    pub jwt_secret: String,

    /// Token signing algorithm
    #[serde(default)]
    pub jwt_algorithm: SigningAlgorithm,
}

#[derive(Deserialize)]
struct ConfigFile {
    security: SecurityConfig,
}

impl SecurityConfig {
    /// Create a configuration from explicit values
    pub fn new(
        api_key: impl Into<String>,
        jwt_secret: impl Into<String>,
        jwt_algorithm: SigningAlgorithm,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            jwt_secret: jwt_secret.into(),
            jwt_algorithm,
        }
    }

    /// Values for local development and tests. Never use in production.
    pub fn local_dev() -> Self {
        Self::new(
            "2f5ae96c-b558-4c7b-a590-a501ae1c3f6c",
            "LOCAL_DEV_SECRET",
            SigningAlgorithm::HS256,
        )
    }

    /// Read the configuration from `DEVOPS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .ok_or_else(|| AuthError::Config(format!("{} is not set", ENV_API_KEY)))?;
        let jwt_secret = lookup(ENV_JWT_SECRET)
            .ok_or_else(|| AuthError::Config(format!("{} is not set", ENV_JWT_SECRET)))?;
        let jwt_algorithm = match lookup(ENV_JWT_ALGORITHM) {
            Some(name) => name.parse()?,
            None => SigningAlgorithm::default(),
        };

        let config = Self::new(api_key, jwt_secret, jwt_algorithm);
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document with a `[security]` table
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        file.security.validate()?;
        Ok(file.security)
    }

    /// Load a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Reject configurations the gate cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(AuthError::Config("api_key must not be empty".into()));
        }
        if self.jwt_secret.is_empty() {
            return Err(AuthError::Config("jwt_secret must not be empty".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("api_key", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults_algorithm() {
        let config = SecurityConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "key"),
            (ENV_JWT_SECRET, "secret"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.jwt_secret, "secret");
        assert_eq!(config.jwt_algorithm, SigningAlgorithm::HS256);
    }

    #[test]
    fn test_from_lookup_missing_secret() {
        let err = SecurityConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "key")])).unwrap_err();
        assert!(err.to_string().contains(ENV_JWT_SECRET));
    }

    #[test]
    fn test_from_lookup_rejects_empty_key() {
        let err = SecurityConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, ""),
            (ENV_JWT_SECRET, "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));
    }

    #[test]
    fn test_from_lookup_rejects_asymmetric_algorithm() {
        let err = SecurityConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "key"),
            (ENV_JWT_SECRET, "secret"),
            (ENV_JWT_ALGORITHM, "RS256"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("RS256"));
    }

    #[test]
    fn test_from_toml_str() {
        let config = SecurityConfig::from_toml_str(
            r#"
            [security]
            api_key = "abc"
            jwt_secret = "def"
            jwt_algorithm = "HS512"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.jwt_algorithm, SigningAlgorithm::HS512);
    }

    #[test]
    fn test_from_toml_str_bad_algorithm() {
        let result = SecurityConfig::from_toml_str(
            r#"
            [security]
            api_key = "abc"
            jwt_secret = "def"
            jwt_algorithm = "none"
            "#,
        );
        assert!(matches!(result, Err(AuthError::ConfigParse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[security]\napi_key = \"k\"\njwt_secret = \"s\"").unwrap();

        let config = SecurityConfig::load(file.path()).unwrap();
        assert_eq!(config, SecurityConfig::new("k", "s", SigningAlgorithm::HS256));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SecurityConfig::load("/nonexistent/devops.toml");
        assert!(matches!(result, Err(AuthError::Io(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", SecurityConfig::local_dev());
        assert!(!debug.contains("LOCAL_DEV_SECRET"));
        assert!(!debug.contains("2f5ae96c"));
        assert!(debug.contains("HS256"));
    }
}
