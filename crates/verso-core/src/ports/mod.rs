pub mod export;
pub mod local_store;
pub mod meter;
pub mod observer;
pub mod remote_store;
pub mod session;

pub use export::{ExportError, ExportedDocument, Exporter};
pub use local_store::{LocalStore, LocalStoreError};
pub use meter::{LineAnalysis, MeterAnalyzer, MeterError, MeterReport, WordAnalysis};
pub use observer::{DocumentObserver, DocumentSnapshot};
pub use remote_store::{RemoteError, RemoteStore};
pub use session::{SessionProvider, StaticSession};
