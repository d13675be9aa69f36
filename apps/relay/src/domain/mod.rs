pub mod chaos;
pub mod registry;
pub mod session;


pub use registry::{SessionRegistry, HARDCORE_FEN};
pub use session::{AcceptedMove, ConnId, GameSession, SessionId, SessionStatus, VariantFlags};
