//! Vistas de exportación.
//!
//! Convierten una instantánea de la canción en estructuras de solo lectura
//! que un [`Exporter`](crate::ports::Exporter) maqueta. Nunca mutan la canción.

use crate::domain::song::Song;
use crate::domain::verse::Verse;

/// Palabra tal y como se imprime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetWord {
  pub text: String,
  pub stressed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLine {
  pub words: Vec<SheetWord>,
  /// Ya en mayúsculas.
  pub adlib: Option<String>,
}

impl SheetLine {
  /// Línea con las palabras tónicas entre `**` y el adlib entre paréntesis.
  pub fn marked(&self) -> String {
    let mut line = self
      .words
      .iter()
      .map(|w| if w.stressed { format!("**{}**", w.text) } else { w.text.clone() })
      .collect::<Vec<_>>()
      .join(" ");
    if let Some(adlib) = &self.adlib {
      line.push_str(&format!(" ({adlib})"));
    }
    line
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetStrophe {
  /// `Estrofe N (Arquitectura)`, numerada desde 1.
  pub heading: String,
  pub lines: Vec<SheetLine>,
}

/// Hoja de letra: cabecera con los créditos y las estrofes en orden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricSheet {
  /// `ARTISTA - TÍTULO`.
  pub title_line: String,
  pub featuring: Option<String>,
  pub producer: Option<String>,
  pub strophes: Vec<SheetStrophe>,
  /// Nombre de archivo sugerido, sin extensión.
  pub file_stem: String,
}

impl LyricSheet {
  pub fn from_song(song: &Song) -> Self {
    let info = &song.song_info;

    let featuring = (!info.featuring.is_empty())
      .then(|| format!("FEATURING: {}", info.featuring.iter().cloned().collect::<Vec<_>>().join(", ")));
    let producer =
      (!info.producer.trim().is_empty()).then(|| format!("PRODUCED BY: {}", info.producer.to_uppercase()));

    let strophes = song
      .strophes
      .iter()
      .enumerate()
      .map(|(i, s)| SheetStrophe {
        heading: format!("Estrofe {} ({})", i + 1, s.architecture().label()),
        lines: s.verses.iter().map(sheet_line).collect(),
      })
      .collect();

    let artist = if info.artist.trim().is_empty() { "artista" } else { info.artist.as_str() };
    let title = if info.title.trim().is_empty() { "musica" } else { info.title.as_str() };

    Self {
      title_line: format!("{} - {}", info.artist.to_uppercase(), info.title.to_uppercase()),
      featuring,
      producer,
      strophes,
      file_stem: format!("{}_{}", stem_part(artist), stem_part(title)),
    }
  }
}

/// Sustituye separadores de ruta y caracteres reservados para que el nombre
/// quede en un único componente.
fn stem_part(raw: &str) -> String {
  raw
    .trim()
    .chars()
    .map(|c| match c {
      '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
      c if c.is_control() => '-',
      c => c,
    })
    .collect()
}

fn sheet_line(verse: &Verse) -> SheetLine {
  SheetLine {
    words: verse.words.iter().map(|w| SheetWord { text: w.text.clone(), stressed: w.stressed }).collect(),
    adlib: verse.adlib.as_deref().filter(|a| !a.trim().is_empty()).map(str::to_uppercase),
  }
}

/// Una escena del storyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
  /// Posición 1-based en la lista aplanada de versos (incluye los que no tienen cámara).
  pub number: usize,
  pub text: String,
  /// Pares `(etiqueta, valor)` ya formateados.
  pub settings: Vec<(String, String)>,
  pub has_image: bool,
}

impl Scene {
  pub fn heading(&self) -> String {
    format!("CENA {} - {}", self.number, self.text)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Storyboard {
  pub scenes: Vec<Scene>,
}

impl Storyboard {
  /// Solo los versos con cámara generan escena; la numeración es la del
  /// verso en la lista aplanada.
  pub fn from_song(song: &Song) -> Self {
    let scenes = song
      .verses()
      .enumerate()
      .filter_map(|(i, verse)| {
        let camera = verse.camera_settings.as_ref()?;
        let upper = |v: &Option<String>| v.as_deref().unwrap_or_default().to_uppercase();
        let settings = vec![
          ("Tipo de Plano".to_string(), camera.shot_type.map(|s| s.label().to_string()).unwrap_or_default()),
          ("Movimento".to_string(), upper(&camera.movement)),
          ("Resolução".to_string(), upper(&camera.resolution)),
          ("Estabilização".to_string(), upper(&camera.stabilization)),
          ("Localização".to_string(), upper(&camera.location)),
        ];
        Some(Scene {
          number: i + 1,
          text: verse.text(),
          settings,
          has_image: verse.media.as_ref().is_some_and(|m| m.is_image()),
        })
      })
      .collect();

    Self { scenes }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::vocab::RhymeTag;
  use crate::domain::word::Word;

  fn song() -> Song {
    let mut song = Song::default();
    song.song_info.artist = "Eco".into();
    song.song_info.title = "Lâmina".into();
    song.song_info.producer = "beatmaker".into();

    let mut v1 = Verse::from_line("sou lâmina", RhymeTag::A);
    v1.words[1] = Word::new("LÂMINA").stressed();
    v1.adlib = Some("yeah".into());
    let mut v2 = Verse::from_line("sem câmera", RhymeTag::B);
    v2.camera_settings = None;
    let v3 = Verse::from_line("corte", RhymeTag::C);
    song.strophes[0].verses = vec![v1, v2, v3];
    song
  }

  #[test]
  fn test_lyric_sheet_marks_stress_and_adlib() {
    let sheet = LyricSheet::from_song(&song());
    assert_eq!(sheet.title_line, "ECO - LÂMINA");
    assert_eq!(sheet.featuring, None);
    assert_eq!(sheet.producer.as_deref(), Some("PRODUCED BY: BEATMAKER"));
    assert_eq!(sheet.strophes[0].heading, "Estrofe 1 (Prólogo)");
    assert_eq!(sheet.strophes[0].lines[0].marked(), "SOU **LÂMINA** (YEAH)");
    assert_eq!(sheet.file_stem, "Eco_Lâmina");
  }

  #[test]
  fn test_file_stem_has_no_path_separators() {
    let mut song = song();
    song.song_info.artist = "AC/DC".into();
    song.song_info.title = "..\\Back in Black".into();
    assert_eq!(LyricSheet::from_song(&song).file_stem, "AC-DC_..-Back in Black");
  }

  #[test]
  fn test_storyboard_numbers_scenes_by_flattened_position() {
    let board = Storyboard::from_song(&song());
    let numbers: Vec<_> = board.scenes.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![1, 3]);
    assert_eq!(board.scenes[1].heading(), "CENA 3 - CORTE");
    assert_eq!(board.scenes[0].settings[0], ("Tipo de Plano".to_string(), "Ao nível dos olhos".to_string()));
    assert_eq!(board.scenes[0].settings[2].1, "4K");
  }
}
