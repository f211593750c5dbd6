//! Error types for request authentication

use thiserror::Error;

/// Main error type for gateway core operations
#[derive(Error, Debug)]
pub enum AuthError {
    /// Shared-secret header missing or not equal to the configured key
    #[error("Invalid API Key")]
    InvalidApiKey,

    /// Token missing, malformed, badly signed or expired
    #[error("Invalid JWT")]
    InvalidJwt,

    /// Token could not be signed
    #[error("Token signing failed: {0}")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthError {
    /// Whether this error should be reported to clients as 401 Unauthorized
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AuthError::InvalidApiKey | AuthError::InvalidJwt)
    }
}

/// Result type alias for gateway core operations
pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_messages() {
        assert_eq!(AuthError::InvalidApiKey.to_string(), "Invalid API Key");
        assert_eq!(AuthError::InvalidJwt.to_string(), "Invalid JWT");
    }

    #[test]
    fn test_unauthorized_classification() {
        assert!(AuthError::InvalidApiKey.is_unauthorized());
        assert!(AuthError::InvalidJwt.is_unauthorized());
        assert!(!AuthError::Config("missing".into()).is_unauthorized());
    }

    #[test]
    fn test_config_parse_conversion() {
        let err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let auth_err: AuthError = err.into();
        assert!(matches!(auth_err, AuthError::ConfigParse(_)));
        assert!(auth_err.to_string().starts_with("Configuration parse error"));
    }
}
