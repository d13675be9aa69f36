//! Error codes for the relay.
//!
//! Every rejection the broker reports and every process-level failure carries
//! one of these. They appear in structured logs and in HTTP error bodies; the
//! websocket wire protocol only carries the human-readable message.

use core::fmt;

/// Centralized error codes. Each variant maps to a canonical
/// SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Session lookup
    /// No live session with the requested id
    SessionNotFound,
    /// Session already has both players
    SessionFull,
    /// Connection is already playing in a live session
    AlreadyInGame,
    /// Connection has never created or joined a session
    NotInGame,

    // Move validation
    /// Rules engine rejected the move
    IllegalMove,
    /// Move submitted by the side not to move
    WrongTurn,

    // Transport
    /// Inbound frame could not be decoded into a command
    MalformedCommand,

    // Process
    /// Invalid configuration
    ConfigError,
    /// I/O failure (bind, accept)
    IoError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::SessionFull => "SESSION_FULL",
            Self::AlreadyInGame => "ALREADY_IN_GAME",
            Self::NotInGame => "NOT_IN_GAME",
            Self::IllegalMove => "ILLEGAL_MOVE",
            Self::WrongTurn => "WRONG_TURN",
            Self::MalformedCommand => "MALFORMED_COMMAND",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
