pub mod document_store;
pub mod edit;
pub mod export;
pub mod meter;

pub use document_store::DocumentStore;
pub use edit::{Edit, EditEffect, StropheField, VerseField};
