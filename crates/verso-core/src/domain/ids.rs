use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identificador estable de una estrofe.
///
/// Se asigna una sola vez al crear la estrofe y nunca se reutiliza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StropheId(Uuid);

impl StropheId {
  /// Genera un nuevo identificador único.
  pub fn new() -> Self {
    StropheId(Uuid::new_v4())
  }

  pub fn from_uuid(u: Uuid) -> Self {
    StropheId(u)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for StropheId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for StropheId {
  fn from(u: Uuid) -> Self {
    StropheId(u)
  }
}

impl fmt::Display for StropheId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador estable de un verso.
///
/// Es el único handle válido para reordenar y buscar versos: dos versos
/// pueden tener exactamente las mismas palabras, así que el texto nunca
/// sirve como identidad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VerseId(Uuid);

impl VerseId {
  /// Genera un nuevo identificador único.
  pub fn new() -> Self {
    VerseId(Uuid::new_v4())
  }

  pub fn from_uuid(u: Uuid) -> Self {
    VerseId(u)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for VerseId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for VerseId {
  fn from(u: Uuid) -> Self {
    VerseId(u)
  }
}

impl fmt::Display for VerseId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador de un proyecto guardado explícitamente en el store remoto.
///
/// Cada "guardar proyecto" genera uno nuevo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(Uuid);

impl ProjectId {
  pub fn new() -> Self {
    ProjectId(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for ProjectId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for ProjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Usuario autenticado. El formato lo decide el proveedor de sesión.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
  pub fn new(id: impl Into<String>) -> Self {
    UserId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
