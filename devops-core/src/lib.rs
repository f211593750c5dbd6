//! DevOps Core - Request authentication and message formatting
//!
//! This crate holds everything the gateway does besides HTTP plumbing:
//! shared-secret checks, JWT verification and issuing, and the message
//! template applied to authenticated requests.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod credential;
pub mod error;
pub mod message;
pub mod token;

pub use config::{SecurityConfig, SigningAlgorithm};
pub use credential::validate_api_key;
pub use error::{AuthError, Result};
pub use message::{format_message, MessageRequest, MessageResponse};
pub use token::{ClaimSet, TokenIssuer, TokenValidator, DEFAULT_TOKEN_TTL, DEMO_MESSAGE_TAG};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
