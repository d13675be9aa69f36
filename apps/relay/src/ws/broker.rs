//! The session broker as a plain state machine.
//!
//! `GameBroker` takes one decoded command at a time and returns the messages
//! to deliver. It does no I/O; `hub::BrokerActor` owns it and does the
//! delivery, which keeps every command serialized through one mailbox.

use std::collections::HashMap;

use chess_rules::{Color, MoveSpec, RulesError};
use tracing::{debug, info};

use crate::domain::{ConnId, SessionId, SessionRegistry, VariantFlags};
use crate::errors::DomainError;
use crate::ws::protocol::{ClientMsg, GameInfo, ServerMsg};

/// A message addressed to one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub to: ConnId,
    pub msg: ServerMsg,
}

impl Outbound {
    pub fn new(to: ConnId, msg: ServerMsg) -> Self {
        Self { to, msg }
    }
}

/// Seat a connection holds for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub game_id: SessionId,
    pub color: Color,
}

#[derive(Debug)]
pub struct GameBroker {
    registry: SessionRegistry,
    bindings: HashMap<ConnId, Binding>,
}

impl GameBroker {
    pub fn new() -> Result<Self, RulesError> {
        Ok(Self::with_registry(SessionRegistry::new()?))
    }

    pub fn with_registry(registry: SessionRegistry) -> Self {
        Self {
            registry,
            bindings: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn binding(&self, conn: ConnId) -> Option<Binding> {
        self.bindings.get(&conn).copied()
    }

    /// Process one command from `conn`. Failures become an `error` event for
    /// `conn` alone.
    pub fn handle(&mut self, conn: ConnId, msg: ClientMsg) -> Vec<Outbound> {
        let result = match msg {
            ClientMsg::CreateGame(cmd) => self.create_game(conn, cmd.into()),
            ClientMsg::JoinGame(cmd) => self.join_game(conn, cmd.game_id),
            ClientMsg::Move(cmd) => self.make_move(conn, &cmd.mv),
        };
        result.unwrap_or_else(|err| Self::reject(conn, &err))
    }

    /// Error event for a command that failed before or inside the broker.
    pub fn reject(conn: ConnId, err: &DomainError) -> Vec<Outbound> {
        debug!(
            conn_id = %conn,
            code = %err.code(),
            error = %err,
            "[BROKER] command rejected"
        );
        vec![Outbound::new(conn, ServerMsg::error(err))]
    }

    /// Binding whose session is still registered.
    fn live_binding(&self, conn: ConnId) -> Option<Binding> {
        self.binding(conn)
            .filter(|binding| self.registry.contains(binding.game_id))
    }

    fn create_game(
        &mut self,
        conn: ConnId,
        flags: VariantFlags,
    ) -> Result<Vec<Outbound>, DomainError> {
        if let Some(binding) = self.live_binding(conn) {
            return Err(DomainError::AlreadyInGame(binding.game_id));
        }

        let session = self.registry.create(flags, conn);
        let game_id = session.id();
        let info = GameInfo::for_player(session, Color::White);
        self.bindings.insert(
            conn,
            Binding {
                game_id,
                color: Color::White,
            },
        );

        info!(
            conn_id = %conn,
            game_id,
            hardcore = flags.hardcore_start,
            chaos = flags.chaos_mutation,
            "[BROKER] game created"
        );
        Ok(vec![Outbound::new(conn, ServerMsg::GameCreated(info))])
    }

    fn join_game(
        &mut self,
        conn: ConnId,
        game_id: SessionId,
    ) -> Result<Vec<Outbound>, DomainError> {
        if let Some(binding) = self.live_binding(conn) {
            return Err(DomainError::AlreadyInGame(binding.game_id));
        }

        let session = self
            .registry
            .get_mut(game_id)
            .ok_or(DomainError::SessionNotFound(game_id))?;
        let color = session.join(conn)?;
        let info = GameInfo::for_player(session, color);
        let creator = session.creator();
        self.bindings.insert(conn, Binding { game_id, color });

        info!(conn_id = %conn, game_id, "[BROKER] opponent joined");
        Ok(vec![
            Outbound::new(conn, ServerMsg::GameJoined(info)),
            Outbound::new(creator, ServerMsg::OpponentJoined),
        ])
    }

    fn make_move(
        &mut self,
        conn: ConnId,
        spec: &MoveSpec,
    ) -> Result<Vec<Outbound>, DomainError> {
        let binding = self.binding(conn).ok_or(DomainError::NotInGame)?;
        let session = self
            .registry
            .get_mut(binding.game_id)
            .ok_or(DomainError::SessionNotFound(binding.game_id))?;

        let accepted = session.apply_move(binding.color, spec)?;
        let fen = session.fen();

        info!(
            conn_id = %conn,
            game_id = binding.game_id,
            san = %accepted.applied.san,
            chaos_downgrade = accepted.chaos_downgrade,
            "[BROKER] move applied"
        );
        if let Some(outcome) = session.position().outcome() {
            info!(
                game_id = binding.game_id,
                ?outcome,
                "[BROKER] game reached a terminal position"
            );
        }

        let event = ServerMsg::GameMove {
            mv: accepted.applied,
            fen,
        };
        Ok(session
            .players()
            .map(|player| Outbound::new(player, event.clone()))
            .collect())
    }

    /// Connection closed. Ends the session it was bound to, if still live,
    /// and tells the other player.
    pub fn disconnect(&mut self, conn: ConnId) -> Vec<Outbound> {
        let Some(binding) = self.bindings.remove(&conn) else {
            return Vec::new();
        };
        let Some(mut session) = self.registry.remove(binding.game_id) else {
            return Vec::new();
        };
        session.terminate();

        let opponent = session.opponent_of(conn);
        info!(
            conn_id = %conn,
            game_id = binding.game_id,
            had_opponent = opponent.is_some(),
            "[BROKER] player left, game ended"
        );

        opponent
            .map(|other| Outbound::new(other, ServerMsg::OpponentLeft))
            .into_iter()
            .collect()
    }
}
