use std::collections::HashMap;

use chess_rules::{Position, RulesError};

use crate::domain::session::{ConnId, GameSession, SessionId, VariantFlags};

/// Alternate start: the queens are replaced by a second pair of rooks.
pub const HARDCORE_FEN: &str = "rnbrkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBRKBNR w KQkq - 0 1";

/// Owns every live session. Only the broker mutates it.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, GameSession>,
    next_id: SessionId,
    hardcore_start: Position,
}

impl SessionRegistry {
    /// Fails only if the built-in hardcore position does not load.
    pub fn new() -> Result<Self, RulesError> {
        Ok(Self {
            sessions: HashMap::new(),
            next_id: 1,
            hardcore_start: Position::from_fen(HARDCORE_FEN)?,
        })
    }

    /// Allocate the next id and store a fresh session with `creator` in slot 0.
    pub fn create(&mut self, flags: VariantFlags, creator: ConnId) -> &mut GameSession {
        let id = self.next_id;
        self.next_id += 1;

        let position = if flags.hardcore_start {
            self.hardcore_start.clone()
        } else {
            Position::standard()
        };
        self.sessions
            .entry(id)
            .or_insert_with(|| GameSession::new(id, position, creator, flags))
    }

    pub fn get(&self, id: SessionId) -> Option<&GameSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut GameSession> {
        self.sessions.get_mut(&id)
    }

    /// Idempotent.
    pub fn remove(&mut self, id: SessionId) -> Option<GameSession> {
        self.sessions.remove(&id)
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Id the next `create` will hand out.
    pub fn next_id(&self) -> SessionId {
        self.next_id
    }
}
