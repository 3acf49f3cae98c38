use std::sync::Arc;

use crate::domain::song::Song;

/// Instantánea inmutable publicada tras cada cambio confirmado.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
  /// Crece en uno por cada edición confirmada.
  pub version: u64,
  pub song: Arc<Song>,
}

/// Suscriptor de cambios del `DocumentStore`.
///
/// Se invoca de forma síncrona dentro de `apply`; debe volver rápido
/// (programar trabajo, no hacerlo).
pub trait DocumentObserver: Send + Sync {
  fn document_changed(&self, snapshot: &DocumentSnapshot);
}
