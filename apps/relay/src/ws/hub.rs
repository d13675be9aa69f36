use std::collections::HashMap;

use actix::prelude::*;
use tracing::{debug, info};

use crate::domain::ConnId;
use crate::error::AppError;
use crate::errors::DomainError;
use crate::ws::broker::{GameBroker, Outbound};
use crate::ws::protocol::{ClientMsg, ServerMsg};

/// An event for one websocket session.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct Deliver(pub ServerMsg);

#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub conn_id: ConnId,
    pub recipient: Recipient<Deliver>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub conn_id: ConnId,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Command {
    pub conn_id: ConnId,
    pub msg: ClientMsg,
}

/// A frame the session could not decode, reported through the broker so it
/// stays ordered with the connection's other replies.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Rejected {
    pub conn_id: ConnId,
    pub error: DomainError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokerStats {
    pub active_sessions: usize,
    pub active_connections: usize,
}

#[derive(Message)]
#[rtype(result = "BrokerStats")]
pub struct Stats;

/// Owns the broker and the delivery handles of every open connection.
/// Its mailbox is the single serialized path all commands go through.
pub struct BrokerActor {
    broker: GameBroker,
    connections: HashMap<ConnId, Recipient<Deliver>>,
}

impl BrokerActor {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self::with_broker(GameBroker::new()?))
    }

    pub fn with_broker(broker: GameBroker) -> Self {
        Self {
            broker,
            connections: HashMap::new(),
        }
    }

    fn deliver(&self, outbound: Vec<Outbound>) {
        for Outbound { to, msg } in outbound {
            match self.connections.get(&to) {
                Some(recipient) => recipient.do_send(Deliver(msg)),
                None => debug!(conn_id = %to, "[BROKER] dropping event for closed connection"),
            }
        }
    }
}

impl Actor for BrokerActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[BROKER] started");
    }
}

impl Handler<Connect> for BrokerActor {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        self.connections.insert(msg.conn_id, msg.recipient);
        debug!(
            conn_id = %msg.conn_id,
            connections = self.connections.len(),
            "[BROKER] connection registered"
        );
    }
}

impl Handler<Disconnect> for BrokerActor {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        self.connections.remove(&msg.conn_id);
        let outbound = self.broker.disconnect(msg.conn_id);
        self.deliver(outbound);
    }
}

impl Handler<Command> for BrokerActor {
    type Result = ();

    fn handle(&mut self, msg: Command, _ctx: &mut Self::Context) -> Self::Result {
        let outbound = self.broker.handle(msg.conn_id, msg.msg);
        self.deliver(outbound);
    }
}

impl Handler<Rejected> for BrokerActor {
    type Result = ();

    fn handle(&mut self, msg: Rejected, _ctx: &mut Self::Context) -> Self::Result {
        let outbound = GameBroker::reject(msg.conn_id, &msg.error);
        self.deliver(outbound);
    }
}

impl Handler<Stats> for BrokerActor {
    type Result = MessageResult<Stats>;

    fn handle(&mut self, _msg: Stats, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(BrokerStats {
            active_sessions: self.broker.registry().len(),
            active_connections: self.connections.len(),
        })
    }
}
