use async_trait::async_trait;

use crate::domain::ids::UserId;
use crate::domain::persisted::{PersistedDocument, ProjectRecord};

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
  #[error("transport error: {0}")]
  Transport(String),

  #[error("remote rejected the write with status {0}")]
  Status(u16),

  #[error("unauthorized")]
  Unauthorized,
}

/// Almacén remoto clave-valor. Su diseño interno queda fuera del núcleo.
#[async_trait]
pub trait RemoteStore: Send + Sync {
  /// Documento "en curso" del usuario; se sobrescribe en cada guardado.
  async fn save_for_user(&self, user: &UserId, doc: &PersistedDocument) -> Result<(), RemoteError>;

  /// Proyecto con nombre propio, creado por la acción explícita de guardar.
  async fn save_project(&self, project: &ProjectRecord) -> Result<(), RemoteError>;
}
