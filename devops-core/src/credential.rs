//! Shared-secret credential check

use crate::error::{AuthError, Result};
use subtle::ConstantTimeEq;
use tracing::debug;

/// Check a supplied API key against the configured one.
///
/// The match is exact: case-sensitive, no trimming. An absent header is a
/// mismatch.
pub fn validate_api_key(supplied: Option<&str>, expected: &str) -> Result<()> {
    match supplied {
        Some(key) if constant_time_compare(key, expected) => Ok(()),
        Some(_) => {
            debug!("API key mismatch");
            Err(AuthError::InvalidApiKey)
        }
        None => {
            debug!("API key header missing");
            Err(AuthError::InvalidApiKey)
        }
    }
}

/// Byte-wise equality whose running time does not depend on where the
/// inputs first differ. Length differences short-circuit.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
