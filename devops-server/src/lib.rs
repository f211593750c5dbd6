//! DevOps Gateway HTTP Server
//!
//! Exposes the `/DevOps` message endpoint behind the API key and JWT gate,
//! plus the health endpoints.

pub mod api;
pub mod app;
pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod logging;
pub mod state;

pub use api::{MessageRequest, MessageResponse, StatusResponse};
pub use app::router;
pub use auth::Authenticated;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
