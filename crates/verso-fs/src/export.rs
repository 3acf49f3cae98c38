use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use verso_core::ports::{ExportError, ExportedDocument, Exporter};
use verso_core::services::export::{LyricSheet, Storyboard};

use crate::io::atomic_write_str;

/// Separador de página en el texto final.
const FORM_FEED: &str = "\u{000C}\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
  pub lines_per_page: usize,
}

impl Default for PageLayout {
  fn default() -> Self {
    Self { lines_per_page: 54 }
  }
}

/// Maquetador de texto plano.
///
/// La letra se pagina línea a línea. El storyboard se pagina por escenas:
/// una escena nunca se parte entre dos páginas salvo que no quepa en una.
#[derive(Debug, Clone, Default)]
pub struct TextExporter {
  layout: PageLayout,
}

impl TextExporter {
  pub fn new(layout: PageLayout) -> Self {
    Self { layout }
  }

  fn check_layout(&self) -> Result<usize, ExportError> {
    match self.layout.lines_per_page {
      0 => Err(ExportError::Render("lines_per_page must be greater than zero".into())),
      n => Ok(n),
    }
  }
}

impl Exporter for TextExporter {
  fn render_lyrics(&self, sheet: &LyricSheet) -> Result<ExportedDocument, ExportError> {
    let per_page = self.check_layout()?;

    let mut lines = vec![sheet.title_line.clone()];
    lines.extend(sheet.featuring.iter().cloned());
    lines.extend(sheet.producer.iter().cloned());

    for strophe in &sheet.strophes {
      lines.push(String::new());
      lines.push(strophe.heading.clone());
      lines.extend(strophe.lines.iter().map(|l| format!("  {}", l.marked())));
    }

    let pages = lines.chunks(per_page).map(|chunk| chunk.join("\n")).collect();
    Ok(ExportedDocument { pages })
  }

  fn render_storyboard(&self, board: &Storyboard) -> Result<ExportedDocument, ExportError> {
    let per_page = self.check_layout()?;
    if board.scenes.is_empty() {
      return Err(ExportError::Empty);
    }

    let mut pages = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for scene in &board.scenes {
      let mut block = vec![scene.heading()];
      if scene.has_image {
        block.push("[imagem]".to_string());
      }
      block.extend(scene.settings.iter().map(|(label, value)| format!("{label}: {value}")));

      let needed = if current.is_empty() { block.len() } else { block.len() + 1 };
      if !current.is_empty() && current.len() + needed > per_page {
        pages.push(std::mem::take(&mut current));
      }
      if !current.is_empty() {
        current.push(String::new());
      }
      current.extend(block);
    }
    if !current.is_empty() {
      pages.push(current);
    }

    // una escena más larga que la página se reparte en varias
    let pages = pages
      .into_iter()
      .flat_map(|page| page.chunks(per_page).map(|c| c.join("\n")).collect::<Vec<_>>())
      .collect();

    Ok(ExportedDocument { pages })
  }
}

/// Escribe el documento en `dir/{stem}.txt`, páginas separadas por form-feed.
pub fn write_document(dir: &Path, stem: &str, doc: &ExportedDocument) -> io::Result<PathBuf> {
  let path = dir.join(format!("{stem}.txt"));
  atomic_write_str(&path, &doc.pages.join(FORM_FEED))?;
  debug!(path = %path.display(), pages = doc.page_count(), "export written");
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;
  use verso_core::domain::{RhymeTag, Song, Verse, Word};
  use verso_core::services::edit::import_lyrics;

  fn song() -> Song {
    let mut song = Song::empty_with(import_lyrics("um\ndois\ntrês\n\nquatro\ncinco"));
    song.song_info.artist = "Eco".into();
    song.song_info.title = "Lâmina".into();
    song.strophes[0].verses[0].words[0] = Word::new("UM").stressed();
    song
  }

  #[test]
  fn test_lyrics_paginate_by_line() {
    let exporter = TextExporter::new(PageLayout { lines_per_page: 4 });
    let doc = exporter.render_lyrics(&LyricSheet::from_song(&song())).unwrap();

    // cabecera + (blanco, título, 3 versos) + (blanco, título, 2 versos) = 10 líneas
    assert_eq!(doc.page_count(), 3);
    assert_eq!(doc.pages[0], "ECO - LÂMINA\n\nEstrofe 1 (Prólogo)\n  **UM**");
  }

  #[test]
  fn test_storyboard_keeps_scenes_whole() {
    let exporter = TextExporter::new(PageLayout { lines_per_page: 13 });
    let doc = exporter.render_storyboard(&Storyboard::from_song(&song())).unwrap();

    // cada escena ocupa 6 líneas; caben dos (6 + 1 + 6) por página
    assert_eq!(doc.page_count(), 3);
    assert!(doc.pages[0].starts_with("CENA 1 - UM"));
    assert!(doc.pages[1].starts_with("CENA 3 - TRÊS"));
    assert!(doc.pages[2].starts_with("CENA 5 - CINCO"));
  }

  #[test]
  fn test_empty_storyboard_is_an_error() {
    let mut song = Song::default();
    let mut verse = Verse::from_line("sem cena", RhymeTag::A);
    verse.camera_settings = None;
    song.strophes[0].verses.push(verse);

    let err = TextExporter::default().render_storyboard(&Storyboard::from_song(&song)).unwrap_err();
    assert!(matches!(err, ExportError::Empty));
  }

  #[test]
  fn test_zero_lines_per_page_is_rejected() {
    let exporter = TextExporter::new(PageLayout { lines_per_page: 0 });
    assert!(exporter.render_lyrics(&LyricSheet::from_song(&song())).is_err());
  }

  #[test]
  fn test_title_with_slash_stays_in_the_output_dir() {
    let tmp = tempdir().unwrap();
    let mut song = song();
    song.song_info.title = "Lâmina/Corte".into();
    let sheet = LyricSheet::from_song(&song);
    let doc = TextExporter::default().render_lyrics(&sheet).unwrap();

    let path = write_document(tmp.path(), &sheet.file_stem, &doc).unwrap();
    assert_eq!(path.parent().unwrap(), tmp.path());
    assert_eq!(path.file_name().unwrap(), "Eco_Lâmina-Corte.txt");
  }

  #[test]
  fn test_write_document_separates_pages() {
    let tmp = tempdir().unwrap();
    let doc = ExportedDocument { pages: vec!["a".into(), "b".into()] };
    let path = write_document(tmp.path(), "Eco_Lâmina", &doc).unwrap();

    assert_eq!(path.file_name().unwrap(), "Eco_Lâmina.txt");
    assert_eq!(std::fs::read_to_string(path).unwrap(), "a\u{000C}\nb");
  }
}
