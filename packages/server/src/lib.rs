//! HTTP demo server and CLI for bearer-token and cookie-session login.

pub mod cli;
pub mod commands;
pub mod error;
pub mod extract;
pub mod logging;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::AppState;
