use std::sync::Arc;

use tracing::info;
use verso_core::domain::ids::ProjectId;
use verso_core::domain::song::Song;
use verso_core::errors::{EditError, SaveProjectError};
use verso_core::ports::DocumentSnapshot;
use verso_core::services::{DocumentStore, Edit, EditEffect};

use crate::synchronizer::{LoadOutcome, PersistenceSynchronizer};

/// Una sesión de edición: el documento y su sincronizador.
///
/// Al empezar se carga el documento local (si lo hay) antes de suscribir el
/// sincronizador, así que la carga no dispara guardados. Al terminar (o al
/// soltar la sesión) se cancelan los guardados pendientes.
pub struct EditingSession {
  store: DocumentStore,
  sync: Arc<PersistenceSynchronizer>,
}

impl EditingSession {
  pub async fn start(sync: Arc<PersistenceSynchronizer>) -> (Self, LoadOutcome) {
    let mut store = DocumentStore::default();
    let outcome = sync.load_initial(&mut store).await;
    store.subscribe(sync.clone());
    info!(?outcome, "editing session loaded");
    (Self { store, sync }, outcome)
  }

  pub fn apply(&mut self, edit: Edit) -> Result<EditEffect, EditError> {
    self.store.apply(edit)
  }

  pub fn song(&self) -> &Song {
    self.store.song()
  }

  pub fn snapshot(&self) -> DocumentSnapshot {
    self.store.snapshot()
  }

  pub fn synchronizer(&self) -> &PersistenceSynchronizer {
    &self.sync
  }

  /// Guardado explícito del proyecto actual.
  pub async fn save_project(&self) -> Result<ProjectId, SaveProjectError> {
    self.sync.save_project(self.store.song()).await
  }

  /// Termina la sesión; equivale a soltarla.
  pub fn end(self) {}
}

impl Drop for EditingSession {
  fn drop(&mut self) {
    self.sync.end_session();
  }
}
