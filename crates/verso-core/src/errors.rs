use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ids::{StropheId, VerseId};
use crate::domain::vocab::MusicSection;

/// Error genérico del núcleo de Verso.
///
/// Las capas superiores (CLI, UI, bins de prueba) deberían mapear este error
/// a mensajes de usuario o logs.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Edit(#[from] EditError),

  #[error(transparent)]
  Persistence(#[from] PersistenceFailure),

  #[error("authenticated session required")]
  AuthRequired,
}

/// Construcción de entidad mal formada. Se rechaza antes de entrar al store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("missing required field `{0}`")]
  MissingField(&'static str),

  #[error("invalid rhyme tag `{0}` (expected A, B, C or D)")]
  InvalidTag(String),

  #[error("unknown dramatic architecture `{0}`")]
  UnknownArchitecture(String),

  #[error("unknown episode sub-label `{0}`")]
  UnknownEpisode(String),

  #[error("architectureDesc is only valid for \"Episódios\" (got architecture `{0}`)")]
  EpisodeOutsideEpisodes(String),

  #[error("unknown music section `{0}`")]
  UnknownSection(String),

  #[error("music section `{0}` appears more than once")]
  DuplicateSection(MusicSection),

  #[error("unknown shot type `{0}`")]
  UnknownShotType(String),

  #[error("invalid colour `{0}` (expected #rrggbb)")]
  InvalidColor(String),

  #[error("duplicate id `{0}` in document")]
  DuplicateId(String),

  #[error("verse {verse} references unknown related verse {related}")]
  DanglingRelatedVerse { verse: VerseId, related: VerseId },
}

/// Rechazo de una edición en el `DocumentStore`.
///
/// Cuando ocurre, el documento anterior se conserva intacto.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("strophe {0} not found")]
  StropheNotFound(StropheId),

  #[error("verse {0} not found")]
  VerseNotFound(VerseId),

  #[error("word index {index} out of range for verse {verse} ({len} words)")]
  WordOutOfRange { verse: VerseId, index: usize, len: usize },

  #[error("music section `{0}` already in the structure")]
  DuplicateSection(MusicSection),
}

/// Destino de persistencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sink {
  Local,
  Remote,
}

impl fmt::Display for Sink {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Sink::Local => write!(f, "local"),
      Sink::Remote => write!(f, "remote"),
    }
  }
}

/// Fallo de escritura/lectura en uno de los sinks.
///
/// Nunca revierte el estado en memoria: el documento es la fuente de verdad
/// y los sinks son espejos best-effort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{sink} persistence failed: {cause}")]
pub struct PersistenceFailure {
  pub sink: Sink,
  pub cause: String,
}

impl PersistenceFailure {
  pub fn local(cause: impl fmt::Display) -> Self {
    Self { sink: Sink::Local, cause: cause.to_string() }
  }

  pub fn remote(cause: impl fmt::Display) -> Self {
    Self { sink: Sink::Remote, cause: cause.to_string() }
  }
}

/// Resultado fallido de la acción explícita "guardar proyecto".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveProjectError {
  #[error("authenticated session required")]
  AuthRequired,

  #[error(transparent)]
  Failed(#[from] PersistenceFailure),
}

impl From<SaveProjectError> for CoreError {
  fn from(err: SaveProjectError) -> Self {
    match err {
      SaveProjectError::AuthRequired => CoreError::AuthRequired,
      SaveProjectError::Failed(f) => CoreError::Persistence(f),
    }
  }
}
