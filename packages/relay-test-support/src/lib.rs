//! Relay test support utilities
//!
//! Shared helpers for unit and integration tests of the relay. Currently this
//! is the one-time logging initialisation used by every test binary.

pub mod logging;
