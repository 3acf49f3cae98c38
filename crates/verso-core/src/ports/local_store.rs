use crate::domain::persisted::PersistedDocument;

#[derive(Debug, thiserror::Error)]
pub enum LocalStoreError {
  #[error("storage error: {0}")]
  Storage(String),

  #[error("corrupt document: {0}")]
  Corrupt(String),
}

/// Almacén local de baja latencia: un único documento por instalación.
///
/// Síncrono. Sus errores nunca cruzan el sincronizador: se registran y el
/// siguiente cambio reintenta.
pub trait LocalStore: Send + Sync {
  fn save(&self, doc: &PersistedDocument) -> Result<(), LocalStoreError>;

  /// `Ok(None)` si nunca se guardó nada.
  fn load(&self) -> Result<Option<PersistedDocument>, LocalStoreError>;
}
