use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ids::{StropheId, VerseId};
use crate::domain::music_structure::MusicStructure;
use crate::domain::strophe::Strophe;
use crate::domain::verse::Verse;
use crate::errors::ValidationError;

/// Créditos de la canción.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SongInfo {
  pub title: String,
  /// Intérprete principal.
  pub artist: String,
  /// Artistas invitados.
  pub featuring: BTreeSet<String>,
  pub producer: String,
}

/// La Canción: raíz del documento que se edita en una sesión.
///
/// Se deserializa validando (ids únicos, referencias entre versos
/// existentes), así que un `Song` siempre es consistente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SongRecord")]
pub struct Song {
  pub song_info: SongInfo,
  pub strophes: Vec<Strophe>,
  pub music_structure: MusicStructure,
}

/// Posición de un verso dentro del documento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseLocation {
  pub strophe: usize,
  pub verse: usize,
}

impl Default for Song {
  /// Documento inicial: una única estrofe "Prólogo" vacía.
  fn default() -> Self {
    Self::empty_with(vec![Strophe::default()])
  }
}

impl Song {
  pub fn empty_with(strophes: Vec<Strophe>) -> Self {
    Self { song_info: SongInfo::default(), strophes, music_structure: MusicStructure::new() }
  }

  pub fn strophe(&self, id: StropheId) -> Option<&Strophe> {
    self.strophes.iter().find(|s| s.id == id)
  }

  pub fn strophe_index(&self, id: StropheId) -> Option<usize> {
    self.strophes.iter().position(|s| s.id == id)
  }

  /// Localiza un verso recorriendo las estrofes en orden; gana la primera coincidencia.
  pub fn locate_verse(&self, id: VerseId) -> Option<VerseLocation> {
    self.strophes.iter().enumerate().find_map(|(si, s)| {
      s.verse_index(id).map(|vi| VerseLocation { strophe: si, verse: vi })
    })
  }

  pub fn verse(&self, id: VerseId) -> Option<&Verse> {
    self.locate_verse(id).map(|loc| &self.strophes[loc.strophe].verses[loc.verse])
  }

  pub fn verse_mut(&mut self, id: VerseId) -> Option<&mut Verse> {
    let loc = self.locate_verse(id)?;
    Some(&mut self.strophes[loc.strophe].verses[loc.verse])
  }

  /// Todos los versos en orden de lectura (estrofe por estrofe).
  pub fn verses(&self) -> impl Iterator<Item = &Verse> {
    self.strophes.iter().flat_map(|s| s.verses.iter())
  }

  pub fn verse_count(&self) -> usize {
    self.strophes.iter().map(|s| s.verses.len()).sum()
  }

  /// Resuelve los versos relacionados de `id` a su posición de lectura
  /// actual (1-based), ordenadas. Se calcula cada vez: reordenar no rompe
  /// las relaciones.
  pub fn related_positions(&self, id: VerseId) -> Vec<usize> {
    let Some(related) = self.verse(id).and_then(|v| v.camera_settings.as_ref()).map(|c| &c.related_verses)
    else {
      return Vec::new();
    };

    self
      .verses()
      .enumerate()
      .filter(|(_, v)| related.contains(&v.id))
      .map(|(i, _)| i + 1)
      .collect()
  }

  /// Quita `id` de todos los conjuntos `related_verses`.
  pub fn forget_related(&mut self, id: VerseId) {
    for verse in self.strophes.iter_mut().flat_map(|s| s.verses.iter_mut()) {
      if let Some(camera) = verse.camera_settings.as_mut() {
        camera.related_verses.remove(&id);
      }
    }
  }

  /// Comprueba los invariantes que cruzan entidades.
  pub fn validate(&self) -> Result<(), ValidationError> {
    let mut seen: HashSet<Uuid> = HashSet::new();

    for strophe in &self.strophes {
      if !seen.insert(strophe.id.as_uuid()) {
        return Err(ValidationError::DuplicateId(strophe.id.to_string()));
      }
      for verse in &strophe.verses {
        if !seen.insert(verse.id.as_uuid()) {
          return Err(ValidationError::DuplicateId(verse.id.to_string()));
        }
      }
    }

    for verse in self.verses() {
      let Some(camera) = &verse.camera_settings else { continue };
      if let Some(related) = camera.related_verses.iter().find(|r| self.locate_verse(**r).is_none()) {
        return Err(ValidationError::DanglingRelatedVerse { verse: verse.id, related: *related });
      }
    }

    Ok(())
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SongRecord {
  #[serde(default)]
  song_info: SongInfo,
  #[serde(default)]
  strophes: Vec<Strophe>,
  #[serde(default)]
  music_structure: MusicStructure,
}

impl TryFrom<SongRecord> for Song {
  type Error = ValidationError;

  fn try_from(r: SongRecord) -> Result<Self, Self::Error> {
    let song = Song { song_info: r.song_info, strophes: r.strophes, music_structure: r.music_structure };
    song.validate()?;
    Ok(song)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::vocab::RhymeTag;

  fn two_strophes() -> Song {
    let mut s1 = Strophe::default();
    s1.verses.push(Verse::from_line("um", RhymeTag::A));
    s1.verses.push(Verse::from_line("dois", RhymeTag::B));
    let mut s2 = Strophe::default();
    s2.verses.push(Verse::from_line("três", RhymeTag::A));
    Song::empty_with(vec![s1, s2])
  }

  #[test]
  fn test_default_song_has_one_prologue() {
    let song = Song::default();
    assert_eq!(song.strophes.len(), 1);
    assert_eq!(song.strophes[0].architecture().label(), "Prólogo");
    assert!(song.music_structure.is_empty());
  }

  #[test]
  fn test_duplicate_verse_ids_fail_validation() {
    let mut song = two_strophes();
    let dup = song.strophes[0].verses[0].clone();
    song.strophes[1].verses.push(dup);
    assert!(matches!(song.validate(), Err(ValidationError::DuplicateId(_))));
  }

  #[test]
  fn test_related_positions_follow_current_order() {
    let mut song = two_strophes();
    let first = song.strophes[0].verses[0].id;
    let third = song.strophes[1].verses[0].id;
    song.verse_mut(first).unwrap().camera_settings.as_mut().unwrap().toggle_related(third);
    assert_eq!(song.related_positions(first), vec![3]);

    // mover el tercero al principio cambia su posición, no la relación
    let moved = song.strophes[1].verses.remove(0);
    song.strophes[0].verses.insert(0, moved);
    assert_eq!(song.related_positions(first), vec![1]);
  }

  #[test]
  fn test_dangling_related_verse_fails_validation() {
    let mut song = two_strophes();
    let first = song.strophes[0].verses[0].id;
    song.verse_mut(first).unwrap().camera_settings.as_mut().unwrap().toggle_related(VerseId::new());
    assert!(matches!(song.validate(), Err(ValidationError::DanglingRelatedVerse { .. })));
  }
}
