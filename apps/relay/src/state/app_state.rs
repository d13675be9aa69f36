use actix::{Actor, Addr};

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::ws::hub::BrokerActor;

/// Shared by every worker: the broker's address and the settings sessions read.
#[derive(Clone)]
pub struct AppState {
    broker: Addr<BrokerActor>,
    config: ServerConfig,
}

impl AppState {
    /// Start the broker actor. Must run inside an actix system.
    pub fn start(config: ServerConfig) -> Result<Self, AppError> {
        let broker = BrokerActor::new()?.start();
        Ok(Self { broker, config })
    }

    pub fn broker(&self) -> Addr<BrokerActor> {
        self.broker.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
