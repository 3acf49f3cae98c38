//! Ediciones del documento.
//!
//! Toda mutación de la canción se expresa como un [`Edit`]. [`apply_edit`]
//! trabaja sobre una copia privada (la del `DocumentStore`): si devuelve
//! error, la copia se descarta y el documento confirmado no cambia.

use crate::domain::camera::{CameraSettings, Media};
use crate::domain::ids::{StropheId, VerseId};
use crate::domain::music_structure::MusicStructure;
use crate::domain::reorder::{self, NoOpReason, Reorder, ReorderOutcome};
use crate::domain::song::{Song, SongInfo};
use crate::domain::strophe::{Strophe, StropheDraft};
use crate::domain::verse::{Verse, VerseDraft};
use crate::domain::vocab::{Architecture, Episode, MusicSection, RhymeTag};
use crate::domain::word::Word;
use crate::errors::EditError;

#[derive(Debug, Clone)]
pub enum StropheField {
  Architecture { architecture: Architecture, episode: Option<Episode> },
  Description(String),
  MusicSection(Option<MusicSection>),
}

#[derive(Debug, Clone)]
pub enum VerseField {
  Tag(RhymeTag),
  Media(Option<Media>),
  Adlib(Option<String>),
  VoiceType(Option<String>),
  Figure(Option<String>),
  CameraSettings(Option<CameraSettings>),
  Function(Option<String>),
  Technique(Option<String>),
  MetaTool(Option<String>),
  Persona(Option<String>),
  ThreeAct(Option<String>),
  MusicSection(Option<MusicSection>),
}

#[derive(Debug, Clone)]
pub enum Edit {
  AddStrophe(StropheDraft),
  RemoveStrophe(StropheId),
  UpdateStrophe { strophe: StropheId, field: StropheField },

  AddVerse { strophe: StropheId, draft: VerseDraft },
  /// Línea escrita a mano: palabras en mayúsculas, etiqueta A y cámara estándar.
  AddVerseLine { strophe: StropheId, line: String },
  UpdateVerse { verse: VerseId, field: VerseField },
  RemoveVerse(VerseId),

  AddWord { verse: VerseId, word: Word },
  UpdateWord { verse: VerseId, index: usize, word: Word },
  RemoveWord { verse: VerseId, index: usize },

  ToggleRelatedVerse { verse: VerseId, related: VerseId },
  Reorder(Reorder),

  UpdateSongInfo(SongInfo),
  AddMusicSection(MusicSection),
  RemoveMusicSection(MusicSection),
  SetMusicStructure(Vec<MusicSection>),

  /// Letra completa: las líneas en blanco separan estrofes.
  ImportLyrics(String),
}

/// Qué hizo una edición aceptada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEffect {
  Changed,
  Unchanged(NoOpReason),
}

/// Aplica `edit` sobre `song`.
///
/// Con `Err` el contenido de `song` queda indefinido y debe descartarse.
pub fn apply_edit(song: &mut Song, edit: Edit) -> Result<EditEffect, EditError> {
  match edit {
    Edit::AddStrophe(draft) => {
      song.strophes.push(draft.build()?);
    }
    Edit::RemoveStrophe(id) => {
      let index = song.strophe_index(id).ok_or(EditError::StropheNotFound(id))?;
      let removed = song.strophes.remove(index);
      for verse in &removed.verses {
        song.forget_related(verse.id);
      }
    }
    Edit::UpdateStrophe { strophe, field } => {
      let index = song.strophe_index(strophe).ok_or(EditError::StropheNotFound(strophe))?;
      update_strophe(&mut song.strophes[index], field)?;
    }

    Edit::AddVerse { strophe, draft } => {
      let verse = draft.build()?;
      push_verse(song, strophe, verse)?;
    }
    Edit::AddVerseLine { strophe, line } => {
      push_verse(song, strophe, Verse::from_line(&line, RhymeTag::A))?;
    }
    Edit::UpdateVerse { verse, field } => {
      update_verse(find_verse(song, verse)?, field);
    }
    Edit::RemoveVerse(id) => {
      let loc = song.locate_verse(id).ok_or(EditError::VerseNotFound(id))?;
      song.strophes[loc.strophe].verses.remove(loc.verse);
      song.forget_related(id);
    }

    Edit::AddWord { verse, word } => {
      find_verse(song, verse)?.words.push(word);
    }
    Edit::UpdateWord { verse, index, word } => {
      let v = find_verse(song, verse)?;
      let len = v.words.len();
      let slot = v.words.get_mut(index).ok_or(EditError::WordOutOfRange { verse, index, len })?;
      *slot = word;
    }
    Edit::RemoveWord { verse, index } => {
      let v = find_verse(song, verse)?;
      let len = v.words.len();
      if index >= len {
        return Err(EditError::WordOutOfRange { verse, index, len });
      }
      v.words.remove(index);
    }

    Edit::ToggleRelatedVerse { verse, related } => {
      if verse == related {
        return Ok(EditEffect::Unchanged(NoOpReason::SameItem));
      }
      if song.locate_verse(related).is_none() {
        return Err(EditError::VerseNotFound(related));
      }
      let v = find_verse(song, verse)?;
      v.camera_settings.get_or_insert_with(CameraSettings::default).toggle_related(related);
    }
    Edit::Reorder(gesture) => {
      if let ReorderOutcome::NoOp(reason) = reorder::apply(song, &gesture) {
        return Ok(EditEffect::Unchanged(reason));
      }
    }

    Edit::UpdateSongInfo(info) => {
      song.song_info = info;
    }
    Edit::AddMusicSection(section) => {
      song.music_structure.push(section).map_err(|_| EditError::DuplicateSection(section))?;
    }
    Edit::RemoveMusicSection(section) => {
      if !song.music_structure.remove(section) {
        return Ok(EditEffect::Unchanged(NoOpReason::DraggedNotFound));
      }
    }
    Edit::SetMusicStructure(sections) => {
      song.music_structure = MusicStructure::try_from(sections)?;
    }

    Edit::ImportLyrics(text) => {
      let imported = import_lyrics(&text);
      if imported.is_empty() {
        return Ok(EditEffect::Unchanged(NoOpReason::DraggedNotFound));
      }
      song.strophes.extend(imported);
    }
  }

  Ok(EditEffect::Changed)
}

/// Convierte una letra completa en estrofes "Prólogo".
///
/// Los bloques se separan por líneas en blanco; cada línea no vacía es un
/// verso. Las etiquetas rotan A, B, C, D según la posición dentro de la
/// estrofe. Los bloques sin líneas no generan estrofe.
pub fn import_lyrics(text: &str) -> Vec<Strophe> {
  let mut strophes = Vec::new();
  let mut current: Vec<Verse> = Vec::new();

  for line in text.lines().chain(std::iter::once("")) {
    if line.trim().is_empty() {
      if !current.is_empty() {
        let mut strophe = Strophe::new(Architecture::Prologue);
        strophe.verses = std::mem::take(&mut current);
        strophes.push(strophe);
      }
      continue;
    }
    current.push(Verse::from_line(line, RhymeTag::cycle(current.len())));
  }

  strophes
}

fn find_verse(song: &mut Song, id: VerseId) -> Result<&mut Verse, EditError> {
  song.verse_mut(id).ok_or(EditError::VerseNotFound(id))
}

fn push_verse(song: &mut Song, strophe: StropheId, verse: Verse) -> Result<(), EditError> {
  let index = song.strophe_index(strophe).ok_or(EditError::StropheNotFound(strophe))?;
  song.strophes[index].verses.push(verse);
  Ok(())
}

fn update_strophe(strophe: &mut Strophe, field: StropheField) -> Result<(), EditError> {
  match field {
    StropheField::Architecture { architecture, episode } => {
      strophe.set_architecture(architecture, episode)?;
    }
    StropheField::Description(d) => strophe.description = d,
    StropheField::MusicSection(s) => strophe.music_section = s,
  }
  Ok(())
}

fn update_verse(verse: &mut Verse, field: VerseField) {
  match field {
    VerseField::Tag(t) => verse.tag = t,
    VerseField::Media(m) => verse.media = m,
    VerseField::Adlib(a) => verse.adlib = a.filter(|a| !a.trim().is_empty()),
    VerseField::VoiceType(v) => verse.voice_type = v,
    VerseField::Figure(v) => verse.figure = v,
    VerseField::CameraSettings(c) => verse.camera_settings = c,
    VerseField::Function(v) => verse.function = v,
    VerseField::Technique(v) => verse.technique = v,
    VerseField::MetaTool(v) => verse.meta_tool = v,
    VerseField::Persona(v) => verse.persona = v,
    VerseField::ThreeAct(v) => verse.three_act = v,
    VerseField::MusicSection(s) => verse.music_section = s,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::errors::ValidationError;

  #[test]
  fn test_import_splits_on_blank_lines_and_cycles_tags() {
    let strophes = import_lyrics("um\ndois\ntrês\ncinco\nseis\n\n\n  \nsete\r\noito\n");
    assert_eq!(strophes.len(), 2);

    let tags: Vec<_> = strophes[0].verses.iter().map(|v| v.tag).collect();
    assert_eq!(tags, vec![RhymeTag::A, RhymeTag::B, RhymeTag::C, RhymeTag::D, RhymeTag::A]);
    assert_eq!(strophes[1].verses[1].text(), "OITO");
    assert_eq!(strophes[1].architecture(), Architecture::Prologue);
    assert!(strophes[1].verses[0].camera_settings.is_some());
  }

  #[test]
  fn test_import_of_blank_text_is_unchanged() {
    let mut song = Song::default();
    let effect = apply_edit(&mut song, Edit::ImportLyrics("\n\n  \n".into())).unwrap();
    assert!(matches!(effect, EditEffect::Unchanged(_)));
    assert_eq!(song.strophes.len(), 1);
  }

  #[test]
  fn test_remove_verse_purges_related_references() {
    let mut song = Song::default();
    let s = song.strophes[0].id;
    apply_edit(&mut song, Edit::AddVerseLine { strophe: s, line: "um".into() }).unwrap();
    apply_edit(&mut song, Edit::AddVerseLine { strophe: s, line: "dois".into() }).unwrap();
    let (v1, v2) = (song.strophes[0].verses[0].id, song.strophes[0].verses[1].id);

    apply_edit(&mut song, Edit::ToggleRelatedVerse { verse: v1, related: v2 }).unwrap();
    assert_eq!(song.related_positions(v1), vec![2]);

    apply_edit(&mut song, Edit::RemoveVerse(v2)).unwrap();
    assert!(song.verse(v1).unwrap().camera_settings.as_ref().unwrap().related_verses.is_empty());
    song.validate().unwrap();
  }

  #[test]
  fn test_remove_strophe_purges_references_to_its_verses() {
    let mut song = Song::default();
    apply_edit(&mut song, Edit::ImportLyrics("a\n\nb".into())).unwrap();
    let keep = song.strophes[1].verses[0].id;
    let gone_strophe = song.strophes[2].id;
    let gone = song.strophes[2].verses[0].id;

    apply_edit(&mut song, Edit::ToggleRelatedVerse { verse: keep, related: gone }).unwrap();
    apply_edit(&mut song, Edit::RemoveStrophe(gone_strophe)).unwrap();
    song.validate().unwrap();
  }

  #[test]
  fn test_word_index_out_of_range() {
    let mut song = Song::default();
    let s = song.strophes[0].id;
    apply_edit(&mut song, Edit::AddVerseLine { strophe: s, line: "um dois".into() }).unwrap();
    let v = song.strophes[0].verses[0].id;

    let err = apply_edit(&mut song, Edit::RemoveWord { verse: v, index: 2 }).unwrap_err();
    assert_eq!(err, EditError::WordOutOfRange { verse: v, index: 2, len: 2 });

    apply_edit(&mut song, Edit::UpdateWord { verse: v, index: 1, word: Word::new("TRÊS").stressed() }).unwrap();
    assert_eq!(song.verse(v).unwrap().text(), "UM TRÊS");
  }

  #[test]
  fn test_duplicate_music_section_is_rejected() {
    let mut song = Song::default();
    apply_edit(&mut song, Edit::AddMusicSection(MusicSection::Chorus)).unwrap();
    let err = apply_edit(&mut song, Edit::AddMusicSection(MusicSection::Chorus)).unwrap_err();
    assert_eq!(err, EditError::DuplicateSection(MusicSection::Chorus));

    let err =
      apply_edit(&mut song, Edit::SetMusicStructure(vec![MusicSection::Solo, MusicSection::Solo])).unwrap_err();
    assert_eq!(err, EditError::Validation(ValidationError::DuplicateSection(MusicSection::Solo)));
  }

  #[test]
  fn test_verse_draft_without_tag_is_rejected() {
    let mut song = Song::default();
    let s = song.strophes[0].id;
    let err = apply_edit(&mut song, Edit::AddVerse { strophe: s, draft: VerseDraft::line("sem tag") }).unwrap_err();
    assert_eq!(err, EditError::Validation(ValidationError::MissingField("tag")));
  }

  #[test]
  fn test_unknown_strophe() {
    let mut song = Song::default();
    let ghost = StropheId::new();
    let err = apply_edit(&mut song, Edit::AddVerseLine { strophe: ghost, line: "x".into() }).unwrap_err();
    assert_eq!(err, EditError::StropheNotFound(ghost));
  }
}
