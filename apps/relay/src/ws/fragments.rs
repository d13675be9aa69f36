//! Reassembly of text messages that arrive as continuation frames.

use actix_http::ws::Item;
use bytes::{Bytes, BytesMut};

use crate::errors::DomainError;

/// Upper bound on a reassembled command.
pub const MAX_FRAGMENTED_BYTES: usize = 64 * 1024;

/// What a continuation frame produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Assembled {
    /// More frames are needed, or the rest of a refused message is being skipped.
    Pending,
    Text(String),
    Rejected(DomainError),
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Text(BytesMut),
    /// A refused message is still streaming in; drop frames until its last one.
    Skipping,
}

#[derive(Debug)]
pub struct FragmentBuffer {
    state: State,
    limit: usize,
}

impl Default for FragmentBuffer {
    fn default() -> Self {
        Self::new(MAX_FRAGMENTED_BYTES)
    }
}

impl FragmentBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            state: State::Idle,
            limit,
        }
    }

    pub fn push(&mut self, item: Item) -> Assembled {
        match item {
            Item::FirstText(bytes) => {
                let interrupted = !matches!(self.state, State::Idle);
                self.state = State::Text(BytesMut::new());
                match self.append(&bytes) {
                    Some(rejected) => rejected,
                    None if interrupted => Assembled::Rejected(DomainError::malformed(
                        "fragmented message started before the previous one finished",
                    )),
                    None => Assembled::Pending,
                }
            }
            Item::FirstBinary(_) => {
                self.state = State::Skipping;
                Assembled::Rejected(DomainError::malformed("binary frames are not supported"))
            }
            Item::Continue(bytes) => match self.state {
                State::Idle => orphan(),
                State::Skipping => Assembled::Pending,
                State::Text(_) => self.append(&bytes).unwrap_or(Assembled::Pending),
            },
            Item::Last(bytes) => {
                let refused = self.append(&bytes);
                match (std::mem::take(&mut self.state), refused) {
                    (_, Some(refused)) => refused,
                    (State::Idle, None) => orphan(),
                    (State::Skipping, None) => Assembled::Pending,
                    (State::Text(buf), None) => decode_utf8(buf.freeze()),
                }
            }
        }
    }

    /// Appends to the text in progress. Over the limit the message is
    /// refused and its remaining frames are skipped.
    fn append(&mut self, bytes: &[u8]) -> Option<Assembled> {
        let State::Text(buf) = &mut self.state else {
            return None;
        };
        if buf.len() + bytes.len() > self.limit {
            self.state = State::Skipping;
            return Some(Assembled::Rejected(DomainError::malformed(format!(
                "fragmented message exceeds {} bytes",
                self.limit
            ))));
        }
        buf.extend_from_slice(bytes);
        None
    }
}

fn orphan() -> Assembled {
    Assembled::Rejected(DomainError::malformed(
        "continuation frame without a first frame",
    ))
}

fn decode_utf8(bytes: Bytes) -> Assembled {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => Assembled::Text(text),
        Err(_) => Assembled::Rejected(DomainError::malformed("text message is not valid UTF-8")),
    }
}
