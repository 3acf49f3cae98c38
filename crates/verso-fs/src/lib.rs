pub mod export;
pub mod io;

pub use export::{PageLayout, TextExporter, write_document};
pub use io::atomic_write_str;
