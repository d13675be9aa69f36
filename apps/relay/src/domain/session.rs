use chess_rules::{AppliedMove, Color, MoveSpec, Position};
use uuid::Uuid;

use crate::domain::chaos;
use crate::errors::DomainError;

/// Session identifier, issued by the registry. Never reused within a process.
pub type SessionId = u64;

/// Connection identifier, one per websocket.
pub type ConnId = Uuid;

/// Variant rules chosen at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantFlags {
    pub hardcore_start: bool,
    pub chaos_mutation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    AwaitingOpponent,
    Active,
    Terminated,
}

/// Result of a move the session accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedMove {
    pub applied: AppliedMove,
    /// The moved piece was turned into a pawn by the chaos rule.
    pub chaos_downgrade: bool,
}

/// One two-player game. Slot 0 (creator) plays white, slot 1 (joiner) black.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    position: Position,
    creator: ConnId,
    joiner: Option<ConnId>,
    flags: VariantFlags,
    status: SessionStatus,
}

impl GameSession {
    pub(crate) fn new(
        id: SessionId,
        position: Position,
        creator: ConnId,
        flags: VariantFlags,
    ) -> Self {
        Self {
            id,
            position,
            creator,
            joiner: None,
            flags,
            status: SessionStatus::AwaitingOpponent,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn fen(&self) -> String {
        self.position.fen()
    }

    pub fn flags(&self) -> VariantFlags {
        self.flags
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn creator(&self) -> ConnId {
        self.creator
    }

    pub fn joiner(&self) -> Option<ConnId> {
        self.joiner
    }

    /// Bound connections in slot order.
    pub fn players(&self) -> impl Iterator<Item = ConnId> + '_ {
        std::iter::once(self.creator).chain(self.joiner)
    }

    pub fn color_of(&self, conn: ConnId) -> Option<Color> {
        if conn == self.creator {
            Some(Color::White)
        } else if self.joiner == Some(conn) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn opponent_of(&self, conn: ConnId) -> Option<ConnId> {
        if conn == self.creator {
            self.joiner
        } else if self.joiner == Some(conn) {
            Some(self.creator)
        } else {
            None
        }
    }

    /// Seat `conn` as black. Only a session waiting for its second player
    /// accepts; anything else is `SessionFull` and leaves the session as is.
    pub fn join(&mut self, conn: ConnId) -> Result<Color, DomainError> {
        if self.status != SessionStatus::AwaitingOpponent || self.joiner.is_some() {
            return Err(DomainError::SessionFull(self.id));
        }
        self.joiner = Some(conn);
        self.status = SessionStatus::Active;
        Ok(Color::Black)
    }

    /// Play a move for `mover`. The side to move comes from the position
    /// itself; a rejected move leaves the position untouched.
    pub fn apply_move(
        &mut self,
        mover: Color,
        spec: &MoveSpec,
    ) -> Result<AcceptedMove, DomainError> {
        if self.status == SessionStatus::Terminated {
            return Err(DomainError::SessionNotFound(self.id));
        }
        let expected = self.position.turn();
        if mover != expected {
            return Err(DomainError::WrongTurn { expected });
        }

        let applied = self.position.apply_move(spec)?;
        let chaos_downgrade =
            self.flags.chaos_mutation && chaos::apply_chaos_mutation(&mut self.position, &applied);

        Ok(AcceptedMove {
            applied,
            chaos_downgrade,
        })
    }

    pub fn terminate(&mut self) {
        self.status = SessionStatus::Terminated;
    }
}
