pub mod broker;
pub mod fragments;
pub mod hub;
pub mod protocol;
pub mod session;


pub use broker::{GameBroker, Outbound};
pub use hub::{BrokerActor, BrokerStats, Stats};
pub use protocol::{ClientMsg, ServerMsg};
