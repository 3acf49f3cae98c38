//! Motor de reordenación por arrastrar y soltar.
//!
//! Cada gesto llega etiquetado con su eje desde el inicio del arrastre
//! ([`Reorder`]); el motor nunca adivina el eje mirando a qué lista
//! pertenece un id al soltar.
//!
//! Todos los ejes usan el mismo empalme ([`move_item`]): quitar en el índice
//! viejo e insertar en el nuevo. Es estable y O(n): ningún otro elemento
//! cambia de orden relativo.
//!
//! Un gesto que no se puede aplicar (mismo elemento, id inexistente, misma
//! posición) no es un error: devuelve [`ReorderOutcome::NoOp`] y deja el
//! documento intacto.

use serde::{Deserialize, Serialize};

use crate::domain::ids::{StropheId, VerseId};
use crate::domain::song::Song;
use crate::domain::vocab::MusicSection;

/// Gesto de arrastre, etiquetado por eje.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reorder {
  /// Verso sobre otro verso (misma estrofe o distinta) o sobre una estrofe.
  Verse { dragged: VerseId, target: VerseTarget },
  /// Palabra dentro de un verso; las palabras no tienen id, se identifican por índice.
  Word { verse: VerseId, from: usize, to: usize },
  /// Sección de la estructura musical.
  Section { dragged: MusicSection, target: MusicSection },
  /// Estrofe dentro de la canción.
  Strophe { dragged: StropheId, target: StropheId },
}

/// Dónde se suelta un verso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerseTarget {
  /// Sobre otro verso: ocupa su índice.
  Verse(VerseId),
  /// Sobre el contenedor de una estrofe: se añade al final (cubre estrofes vacías).
  Strophe(StropheId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
  Moved,
  NoOp(NoOpReason),
}

impl ReorderOutcome {
  pub fn is_noop(&self) -> bool {
    matches!(self, ReorderOutcome::NoOp(_))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
  SameItem,
  DraggedNotFound,
  TargetNotFound,
  SamePosition,
}

/// Mueve el elemento `from` a la posición `to`, desplazando los intermedios.
///
/// Devuelve `false` (sin tocar nada) si algún índice está fuera de rango o
/// si `from == to`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
  if from == to || from >= items.len() || to >= items.len() {
    return false;
  }
  let item = items.remove(from);
  items.insert(to, item);
  true
}

/// Aplica el gesto sobre `song`. Si el resultado es `NoOp`, `song` no cambió.
pub fn apply(song: &mut Song, gesture: &Reorder) -> ReorderOutcome {
  match gesture {
    Reorder::Verse { dragged, target } => move_verse(song, *dragged, *target),
    Reorder::Word { verse, from, to } => move_word(song, *verse, *from, *to),
    Reorder::Section { dragged, target } => move_section(song, *dragged, *target),
    Reorder::Strophe { dragged, target } => move_strophe(song, *dragged, *target),
  }
}

/// Variante pura de [`apply`]: devuelve el documento resultante.
pub fn reordered(song: &Song, gesture: &Reorder) -> (Song, ReorderOutcome) {
  let mut next = song.clone();
  let outcome = apply(&mut next, gesture);
  match outcome {
    ReorderOutcome::Moved => (next, outcome),
    ReorderOutcome::NoOp(_) => (song.clone(), outcome),
  }
}

fn move_verse(song: &mut Song, dragged: VerseId, target: VerseTarget) -> ReorderOutcome {
  if target == VerseTarget::Verse(dragged) {
    return ReorderOutcome::NoOp(NoOpReason::SameItem);
  }

  let Some(from) = song.locate_verse(dragged) else {
    return ReorderOutcome::NoOp(NoOpReason::DraggedNotFound);
  };

  // (estrofe destino, índice destino). Para un contenedor el índice es "al final".
  let (to_strophe, to_index) = match target {
    VerseTarget::Verse(id) => match song.locate_verse(id) {
      Some(loc) => (loc.strophe, Some(loc.verse)),
      None => return ReorderOutcome::NoOp(NoOpReason::TargetNotFound),
    },
    VerseTarget::Strophe(id) => match song.strophe_index(id) {
      Some(si) => (si, None),
      None => return ReorderOutcome::NoOp(NoOpReason::TargetNotFound),
    },
  };

  if from.strophe == to_strophe {
    let verses = &mut song.strophes[from.strophe].verses;
    let to = to_index.unwrap_or(verses.len() - 1);
    return if move_item(verses, from.verse, to) {
      ReorderOutcome::Moved
    } else {
      ReorderOutcome::NoOp(NoOpReason::SamePosition)
    };
  }

  // Entre estrofes: ambos índices ya están validados, así que quitar e
  // insertar ocurren juntos y el verso nunca queda en cero o dos estrofes.
  let verse = song.strophes[from.strophe].verses.remove(from.verse);
  let dest = &mut song.strophes[to_strophe].verses;
  match to_index {
    Some(i) => dest.insert(i, verse),
    None => dest.push(verse),
  }
  ReorderOutcome::Moved
}

fn move_word(song: &mut Song, verse: VerseId, from: usize, to: usize) -> ReorderOutcome {
  if from == to {
    return ReorderOutcome::NoOp(NoOpReason::SameItem);
  }
  let Some(v) = song.verse_mut(verse) else {
    return ReorderOutcome::NoOp(NoOpReason::DraggedNotFound);
  };
  if from >= v.words.len() {
    return ReorderOutcome::NoOp(NoOpReason::DraggedNotFound);
  }
  if to >= v.words.len() {
    return ReorderOutcome::NoOp(NoOpReason::TargetNotFound);
  }
  move_item(&mut v.words, from, to);
  ReorderOutcome::Moved
}

fn move_section(song: &mut Song, dragged: MusicSection, target: MusicSection) -> ReorderOutcome {
  if dragged == target {
    return ReorderOutcome::NoOp(NoOpReason::SameItem);
  }
  let Some(from) = song.music_structure.position(dragged) else {
    return ReorderOutcome::NoOp(NoOpReason::DraggedNotFound);
  };
  let Some(to) = song.music_structure.position(target) else {
    return ReorderOutcome::NoOp(NoOpReason::TargetNotFound);
  };
  move_item(song.music_structure.sections_mut(), from, to);
  ReorderOutcome::Moved
}

fn move_strophe(song: &mut Song, dragged: StropheId, target: StropheId) -> ReorderOutcome {
  if dragged == target {
    return ReorderOutcome::NoOp(NoOpReason::SameItem);
  }
  let Some(from) = song.strophe_index(dragged) else {
    return ReorderOutcome::NoOp(NoOpReason::DraggedNotFound);
  };
  let Some(to) = song.strophe_index(target) else {
    return ReorderOutcome::NoOp(NoOpReason::TargetNotFound);
  };
  move_item(&mut song.strophes, from, to);
  ReorderOutcome::Moved
}
