//! Wire format: every frame is a JSON object `{ "type": ..., "payload": ... }`.

use chess_rules::{AppliedMove, Color, MoveSpec};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{GameSession, SessionId, VariantFlags};
use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateGame {
    pub hardcore: bool,
    pub chaos: bool,
}

impl From<CreateGame> for VariantFlags {
    fn from(cmd: CreateGame) -> Self {
        VariantFlags {
            hardcore_start: cmd.hardcore,
            chaos_mutation: cmd.chaos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGame {
    pub game_id: SessionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MakeMove {
    #[serde(rename = "move")]
    pub mv: MoveSpec,
}

/// Commands a client can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMsg {
    CreateGame(CreateGame),
    JoinGame(JoinGame),
    Move(MakeMove),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

impl ClientMsg {
    /// Decode a text frame. Bad JSON, an unknown `type` and a payload of the
    /// wrong shape are all `MalformedCommand`.
    pub fn decode(text: &str) -> Result<Self, DomainError> {
        let envelope: Envelope = serde_json::from_str(text)
            .map_err(|err| DomainError::malformed(format!("invalid envelope: {err}")))?;

        match envelope.kind.as_str() {
            "createGame" => {
                // The payload is optional here; absent means a standard game.
                if envelope.payload.is_null() {
                    Ok(Self::CreateGame(CreateGame::default()))
                } else {
                    payload(envelope.payload).map(Self::CreateGame)
                }
            }
            "joinGame" => payload(envelope.payload).map(Self::JoinGame),
            "move" => payload(envelope.payload).map(Self::Move),
            other => Err(DomainError::malformed(format!("unknown type {other:?}"))),
        }
    }
}

fn payload<T: DeserializeOwned>(value: Value) -> Result<T, DomainError> {
    serde_json::from_value(value)
        .map_err(|err| DomainError::malformed(format!("invalid payload: {err}")))
}

/// Seat assignment sent when a player enters a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub game_id: SessionId,
    pub player_color: Color,
    pub fen: String,
    pub is_hardcore: bool,
    pub is_chaos: bool,
}

impl GameInfo {
    pub fn for_player(session: &GameSession, player_color: Color) -> Self {
        let flags = session.flags();
        Self {
            game_id: session.id(),
            player_color,
            fen: session.fen(),
            is_hardcore: flags.hardcore_start,
            is_chaos: flags.chaos_mutation,
        }
    }
}

/// Events the relay sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerMsg {
    GameCreated(GameInfo),
    GameJoined(GameInfo),
    OpponentJoined,
    GameMove {
        #[serde(rename = "move")]
        mv: AppliedMove,
        fen: String,
    },
    OpponentLeft,
    Error(String),
}

impl ServerMsg {
    pub fn error(err: &DomainError) -> Self {
        Self::Error(err.client_message().to_string())
    }
}
