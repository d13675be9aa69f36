//! Broker-level error type.
//!
//! Every variant is recoverable: the broker reports it to the connection that
//! sent the offending command and carries on. None of them ends a session.

use chess_rules::{Color, RulesError};
use thiserror::Error;

use crate::domain::session::SessionId;
use crate::errors::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error("session {0} already has two players")]
    SessionFull(SessionId),
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("wrong turn: {expected} is to move")]
    WrongTurn { expected: Color },
    #[error("malformed command: {0}")]
    MalformedCommand(String),
    #[error("connection already bound to session {0}")]
    AlreadyInGame(SessionId),
    #[error("connection is not bound to a session")]
    NotInGame,
}

impl DomainError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedCommand(detail.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SessionNotFound(_) => ErrorCode::SessionNotFound,
            Self::SessionFull(_) => ErrorCode::SessionFull,
            Self::IllegalMove(_) => ErrorCode::IllegalMove,
            Self::WrongTurn { .. } => ErrorCode::WrongTurn,
            Self::MalformedCommand(_) => ErrorCode::MalformedCommand,
            Self::AlreadyInGame(_) => ErrorCode::AlreadyInGame,
            Self::NotInGame => ErrorCode::NotInGame,
        }
    }

    /// Text sent to the client in the `error` event.
    ///
    /// A missing session reads the same as a full one.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) | Self::SessionFull(_) => "Game not found or is full.",
            Self::IllegalMove(_) => "Invalid move.",
            Self::WrongTurn { .. } => "It is not your turn.",
            Self::MalformedCommand(_) => "Malformed command.",
            Self::AlreadyInGame(_) => "You are already in a game.",
            Self::NotInGame => "You are not in a game.",
        }
    }
}

impl From<RulesError> for DomainError {
    fn from(err: RulesError) -> Self {
        Self::IllegalMove(err.to_string())
    }
}
