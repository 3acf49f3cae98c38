use serde::{Deserialize, Serialize};

use crate::domain::camera::{CameraSettings, Media};
use crate::domain::ids::VerseId;
use crate::domain::vocab::{MusicSection, RhymeTag};
use crate::domain::word::Word;
use crate::errors::ValidationError;

/// El Verso: una línea de la letra con sus palabras ordenadas y sus
/// metadatos literarios y de producción.
///
/// Pertenece exactamente a una estrofe en cada momento.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
  /// Asignado al crear el verso; nunca se reutiliza.
  pub id: VerseId,
  /// Palabras en orden de lectura.
  pub words: Vec<Word>,
  /// Etiqueta del esquema de rima.
  pub tag: RhymeTag,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub media: Option<Media>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub adlib: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub voice_type: Option<String>,
  /// Figura literaria (metáfora, anáfora…).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub figure: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub camera_settings: Option<CameraSettings>,
  /// Función del verso (afirmação, pergunta…).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub function: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub technique: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub meta_tool: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub persona: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub three_act: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub music_section: Option<MusicSection>,
}

impl Verse {
  /// Crea un verso vacío de metadatos con un id nuevo.
  pub fn new(words: Vec<Word>, tag: RhymeTag) -> Self {
    Self {
      id: VerseId::new(),
      words,
      tag,
      media: None,
      adlib: None,
      voice_type: None,
      figure: None,
      camera_settings: None,
      function: None,
      technique: None,
      meta_tool: None,
      persona: None,
      three_act: None,
      music_section: None,
    }
  }

  /// Verso a partir de una línea escrita: palabras separadas por espacios,
  /// en mayúsculas, etiqueta `tag` y la cámara estándar.
  pub fn from_line(line: &str, tag: RhymeTag) -> Self {
    let words = line.split_whitespace().map(|w| Word::new(w.to_uppercase())).collect();
    let mut verse = Self::new(words, tag);
    verse.camera_settings = Some(CameraSettings::standard());
    verse
  }

  /// Texto plano del verso (palabras unidas por un espacio).
  pub fn text(&self) -> String {
    self.words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ")
  }

  /// La palabra de rima es la última del verso.
  pub fn rhyme_word(&self) -> Option<&Word> {
    self.words.last()
  }

  /// Todos los campos de contexto literario están rellenos.
  pub fn is_context_complete(&self) -> bool {
    [
      &self.voice_type,
      &self.figure,
      &self.function,
      &self.technique,
      &self.meta_tool,
      &self.persona,
      &self.three_act,
    ]
    .iter()
    .all(|f| f.as_deref().is_some_and(|s| !s.trim().is_empty()))
  }
}

/// Borrador de verso tal y como llega de la UI: campos en texto, sin validar.
#[derive(Debug, Clone, Default)]
pub struct VerseDraft {
  pub words: Vec<Word>,
  pub tag: Option<String>,
  pub adlib: Option<String>,
  pub camera_settings: Option<CameraSettings>,
  pub music_section: Option<String>,
}

impl VerseDraft {
  pub fn line(line: &str) -> Self {
    Self {
      words: line.split_whitespace().map(|w| Word::new(w.to_uppercase())).collect(),
      ..Self::default()
    }
  }

  pub fn tag(mut self, tag: impl Into<String>) -> Self {
    self.tag = Some(tag.into());
    self
  }

  /// Valida el borrador y asigna un id nuevo.
  pub fn build(self) -> Result<Verse, ValidationError> {
    let tag: RhymeTag = self.tag.as_deref().ok_or(ValidationError::MissingField("tag"))?.parse()?;
    let music_section = self.music_section.as_deref().map(str::parse::<MusicSection>).transpose()?;

    let mut verse = Verse::new(self.words, tag);
    verse.adlib = self.adlib.filter(|a| !a.trim().is_empty());
    verse.camera_settings = self.camera_settings;
    verse.music_section = music_section;
    Ok(verse)
  }
}
