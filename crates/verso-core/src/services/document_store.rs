use std::sync::Arc;

use tracing::debug;

use crate::domain::song::Song;
use crate::errors::EditError;
use crate::ports::observer::{DocumentObserver, DocumentSnapshot};
use crate::services::edit::{Edit, EditEffect, apply_edit};

/// Único poseedor en memoria de la canción de la sesión.
///
/// Toda mutación pasa por [`DocumentStore::apply`]: la edición se aplica a
/// una copia y solo se confirma si tuvo éxito. Tras cada cambio confirmado
/// sube la versión y se avisa a los observadores con la instantánea nueva.
pub struct DocumentStore {
  song: Arc<Song>,
  version: u64,
  observers: Vec<Arc<dyn DocumentObserver>>,
}

impl Default for DocumentStore {
  fn default() -> Self {
    Self::new(Song::default())
  }
}

impl DocumentStore {
  pub fn new(song: Song) -> Self {
    Self { song: Arc::new(song), version: 0, observers: Vec::new() }
  }

  pub fn subscribe(&mut self, observer: Arc<dyn DocumentObserver>) {
    self.observers.push(observer);
  }

  pub fn song(&self) -> &Song {
    &self.song
  }

  pub fn version(&self) -> u64 {
    self.version
  }

  pub fn snapshot(&self) -> DocumentSnapshot {
    DocumentSnapshot { version: self.version, song: Arc::clone(&self.song) }
  }

  /// Aplica una edición. Con error, el documento anterior se conserva.
  pub fn apply(&mut self, edit: Edit) -> Result<EditEffect, EditError> {
    let mut next = Song::clone(&self.song);
    let effect = apply_edit(&mut next, edit)?;
    // invariantes entre entidades (ids únicos, versos relacionados existentes)
    next.validate()?;

    if let EditEffect::Unchanged(reason) = effect {
      debug!(?reason, "edit left the document unchanged");
      return Ok(effect);
    }

    self.song = Arc::new(next);
    self.version += 1;
    debug!(version = self.version, "document committed");
    self.notify();
    Ok(effect)
  }

  /// Sustituye el documento por uno cargado de persistencia, sin avisar:
  /// el cargado ya coincide con la copia guardada.
  pub fn hydrate(&mut self, song: Song) {
    self.song = Arc::new(song);
    debug!(version = self.version, "document hydrated");
  }

  fn notify(&self) {
    let snapshot = self.snapshot();
    for observer in &self.observers {
      observer.document_changed(&snapshot);
    }
  }
}
