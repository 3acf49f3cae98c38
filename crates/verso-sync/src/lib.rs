pub mod config;
pub mod debounce;
pub mod session;
pub mod synchronizer;

pub use config::SyncConfig;
pub use debounce::{Debouncer, SinkState};
pub use session::EditingSession;
pub use synchronizer::{LoadOutcome, PersistenceSynchronizer, SinkStatus};
