use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::ProjectId;
use crate::domain::music_structure::MusicStructure;
use crate::domain::song::{Song, SongInfo};
use crate::domain::strophe::Strophe;
use crate::errors::ValidationError;

/// Registro persistido del documento local.
///
/// Claves en camelCase y `updatedAt` en RFC 3339. Se deserializa validando
/// igual que [`Song`], así que un documento corrupto nunca llega al store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDocument {
  pub song_info: SongInfo,
  pub strophes: Vec<Strophe>,
  pub music_structure: MusicStructure,
  pub updated_at: DateTime<Utc>,
}

impl PersistedDocument {
  pub fn from_song(song: &Song, updated_at: DateTime<Utc>) -> Self {
    Self {
      song_info: song.song_info.clone(),
      strophes: song.strophes.clone(),
      music_structure: song.music_structure.clone(),
      updated_at,
    }
  }

  /// Reconstruye la canción comprobando los invariantes entre entidades.
  pub fn into_song(self) -> Result<Song, ValidationError> {
    let song = Song {
      song_info: self.song_info,
      strophes: self.strophes,
      music_structure: self.music_structure,
    };
    song.validate()?;
    Ok(song)
  }
}

/// Proyecto guardado explícitamente por el usuario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
  pub id: ProjectId,
  pub document: PersistedDocument,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl ProjectRecord {
  /// Proyecto nuevo: id fresco y `created_at == updated_at == now`.
  pub fn new(song: &Song, now: DateTime<Utc>) -> Self {
    Self {
      id: ProjectId::new(),
      document: PersistedDocument::from_song(song, now),
      created_at: now,
      updated_at: now,
    }
  }
}
