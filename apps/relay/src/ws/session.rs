use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ConnId;
use crate::errors::DomainError;
use crate::state::app_state::AppState;
use crate::ws::fragments::{Assembled, FragmentBuffer};
use crate::ws::hub::{BrokerActor, Command, Connect, Deliver, Disconnect, Rejected};
use crate::ws::protocol::{ClientMsg, ServerMsg};

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(
        Uuid::new_v4(),
        app_state.broker(),
        app_state.config().heartbeat_interval,
        app_state.config().client_timeout,
    );
    ws::start(session, &req, stream)
}

/// One connected player. Decodes frames into commands for the broker and
/// writes the broker's events back out.
pub struct WsSession {
    conn_id: ConnId,
    broker: Addr<BrokerActor>,
    heartbeat_interval: Duration,
    client_timeout: Duration,
    last_heartbeat: Instant,
    fragments: FragmentBuffer,
}

impl WsSession {
    fn new(
        conn_id: ConnId,
        broker: Addr<BrokerActor>,
        heartbeat_interval: Duration,
        client_timeout: Duration,
    ) -> Self {
        Self {
            conn_id,
            broker,
            heartbeat_interval,
            client_timeout,
            last_heartbeat: Instant::now(),
            fragments: FragmentBuffer::default(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn dispatch(&self, text: &str) {
        match ClientMsg::decode(text) {
            Ok(msg) => self.broker.do_send(Command {
                conn_id: self.conn_id,
                msg,
            }),
            Err(err) => self.reject(err),
        }
    }

    fn reject(&self, error: DomainError) {
        warn!(
            conn_id = %self.conn_id,
            code = %error.code(),
            error = %error,
            "[WS SESSION] rejected frame"
        );
        self.broker.do_send(Rejected {
            conn_id: self.conn_id,
            error,
        });
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        let timeout = self.client_timeout;
        ctx.run_interval(self.heartbeat_interval, move |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > timeout {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");

        self.broker.do_send(Connect {
            conn_id: self.conn_id,
            recipient: ctx.address().recipient::<Deliver>(),
        });
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.broker.do_send(Disconnect {
            conn_id: self.conn_id,
        });
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.dispatch(&text);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.reject(DomainError::malformed("binary frames are not supported"));
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(item)) => {
                self.last_heartbeat = Instant::now();
                match self.fragments.push(item) {
                    Assembled::Pending => {}
                    Assembled::Text(text) => self.dispatch(&text),
                    Assembled::Rejected(err) => self.reject(err),
                }
            }
            Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Deliver> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Deliver, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
