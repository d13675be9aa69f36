#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Two-player chess relay.
//!
//! Players connect over a websocket, create or join a game, and exchange
//! moves. The relay owns the authoritative position, enforces turn order
//! and applies the chaos variant rule before broadcasting each move.

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod routes;
pub mod state;
pub mod ws;

pub use config::ServerConfig;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    relay_test_support::logging::init();
}
