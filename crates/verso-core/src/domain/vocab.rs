//! Vocabularios cerrados del documento.
//!
//! Cada enum parsea desde su etiqueta canónica (la misma que se persiste) y
//! se imprime con ella. A diferencia de otros enums de dominio, aquí parsear
//! **sí puede fallar**: un valor fuera del vocabulario es un `ValidationError`.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::ValidationError;

/// Etiqueta de esquema de rima de un verso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RhymeTag {
  A,
  B,
  C,
  D,
}

impl RhymeTag {
  pub const ALL: [RhymeTag; 4] = [RhymeTag::A, RhymeTag::B, RhymeTag::C, RhymeTag::D];

  /// Etiqueta que le toca a la línea `index` cuando se importa una letra.
  pub fn cycle(index: usize) -> Self {
    Self::ALL[index % Self::ALL.len()]
  }
}

impl FromStr for RhymeTag {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "A" => Ok(RhymeTag::A),
      "B" => Ok(RhymeTag::B),
      "C" => Ok(RhymeTag::C),
      "D" => Ok(RhymeTag::D),
      _ => Err(ValidationError::InvalidTag(s.to_string())),
    }
  }
}

impl fmt::Display for RhymeTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      RhymeTag::A => "A",
      RhymeTag::B => "B",
      RhymeTag::C => "C",
      RhymeTag::D => "D",
    };
    f.write_str(s)
  }
}

/// Arquitectura dramática de una estrofe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
  #[serde(rename = "Prelúdio")]
  Prelude,
  #[serde(rename = "Prólogo")]
  Prologue,
  #[serde(rename = "Parodos (coro)")]
  Parodos,
  #[serde(rename = "Episódios")]
  Episodes,
  #[serde(rename = "Êxodo")]
  Exodus,
  #[serde(rename = "Epílogo")]
  Epilogue,
}

impl Architecture {
  pub const ALL: [Architecture; 6] = [
    Architecture::Prelude,
    Architecture::Prologue,
    Architecture::Parodos,
    Architecture::Episodes,
    Architecture::Exodus,
    Architecture::Epilogue,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      Architecture::Prelude => "Prelúdio",
      Architecture::Prologue => "Prólogo",
      Architecture::Parodos => "Parodos (coro)",
      Architecture::Episodes => "Episódios",
      Architecture::Exodus => "Êxodo",
      Architecture::Epilogue => "Epílogo",
    }
  }

  /// Descripción por defecto que recibe una estrofe nueva con esta arquitectura.
  pub fn description(&self) -> &'static str {
    match self {
      Architecture::Prelude => "Introdução poética que prepara o leitor para o que está por vir",
      Architecture::Prologue => {
        "Introdução que apresenta o contexto inicial da obra, preparando o cenário para a narrativa principal."
      }
      Architecture::Parodos => "Entrada do coro no teatro grego",
      Architecture::Episodes => "Partes principais da narrativa",
      Architecture::Exodus => "Conclusão da história",
      Architecture::Epilogue => "Texto final que complementa ou encerra a obra",
    }
  }

  /// Solo "Episódios" admite sub-etiqueta de episodio.
  pub fn accepts_episode(&self) -> bool {
    matches!(self, Architecture::Episodes)
  }
}

impl Default for Architecture {
  fn default() -> Self {
    Architecture::Prologue
  }
}

impl FromStr for Architecture {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    Self::ALL
      .into_iter()
      .find(|a| a.label() == trimmed)
      .ok_or_else(|| ValidationError::UnknownArchitecture(s.to_string()))
  }
}

impl fmt::Display for Architecture {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Sub-etiqueta (`architectureDesc`) de una estrofe "Episódios".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Episode {
  #[serde(rename = "Ascensão do herói")]
  HeroRise,
  #[serde(rename = "Erro trágico (hamartia)")]
  Hamartia,
  #[serde(rename = "Virada de fortuna (peripeteia)")]
  Peripeteia,
  #[serde(rename = "Queda (catástrofe)")]
  Catastrophe,
  #[serde(rename = "Reconhecimento (anagnórise)")]
  Anagnorisis,
}

impl Episode {
  pub const ALL: [Episode; 5] = [
    Episode::HeroRise,
    Episode::Hamartia,
    Episode::Peripeteia,
    Episode::Catastrophe,
    Episode::Anagnorisis,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      Episode::HeroRise => "Ascensão do herói",
      Episode::Hamartia => "Erro trágico (hamartia)",
      Episode::Peripeteia => "Virada de fortuna (peripeteia)",
      Episode::Catastrophe => "Queda (catástrofe)",
      Episode::Anagnorisis => "Reconhecimento (anagnórise)",
    }
  }
}

impl FromStr for Episode {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    Self::ALL
      .into_iter()
      .find(|e| e.label() == trimmed)
      .ok_or_else(|| ValidationError::UnknownEpisode(s.to_string()))
  }
}

impl fmt::Display for Episode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Sección de la estructura musical (intro, verso, refrão…).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MusicSection {
  #[serde(rename = "introducao")]
  Intro,
  #[serde(rename = "verso")]
  Verse,
  #[serde(rename = "pre-refrao")]
  PreChorus,
  #[serde(rename = "refrao")]
  Chorus,
  #[serde(rename = "ponte")]
  Bridge,
  #[serde(rename = "break")]
  Break,
  #[serde(rename = "solo")]
  Solo,
  #[serde(rename = "outro")]
  Outro,
}

impl MusicSection {
  pub const ALL: [MusicSection; 8] = [
    MusicSection::Intro,
    MusicSection::Verse,
    MusicSection::PreChorus,
    MusicSection::Chorus,
    MusicSection::Bridge,
    MusicSection::Break,
    MusicSection::Solo,
    MusicSection::Outro,
  ];

  /// Valor canónico persistido.
  pub fn value(&self) -> &'static str {
    match self {
      MusicSection::Intro => "introducao",
      MusicSection::Verse => "verso",
      MusicSection::PreChorus => "pre-refrao",
      MusicSection::Chorus => "refrao",
      MusicSection::Bridge => "ponte",
      MusicSection::Break => "break",
      MusicSection::Solo => "solo",
      MusicSection::Outro => "outro",
    }
  }

  /// Etiqueta legible para exportación.
  pub fn label(&self) -> &'static str {
    match self {
      MusicSection::Intro => "Introdução",
      MusicSection::Verse => "Verso (estrofe)",
      MusicSection::PreChorus => "Pré-refrão",
      MusicSection::Chorus => "Refrão (coro)",
      MusicSection::Bridge => "Ponte (bridge)",
      MusicSection::Break => "Break / Paragem",
      MusicSection::Solo => "Solo",
      MusicSection::Outro => "Outro (conclusão)",
    }
  }
}

impl FromStr for MusicSection {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase();
    Self::ALL
      .into_iter()
      .find(|m| m.value() == normalized)
      .ok_or_else(|| ValidationError::UnknownSection(s.to_string()))
  }
}

impl fmt::Display for MusicSection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.value())
  }
}

/// Tipo de plano de cámara.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShotType {
  HighAngle,
  LowAngle,
  DutchAngle,
  EyeLevel,
}

impl ShotType {
  pub const ALL: [ShotType; 4] =
    [ShotType::HighAngle, ShotType::LowAngle, ShotType::DutchAngle, ShotType::EyeLevel];

  pub fn value(&self) -> &'static str {
    match self {
      ShotType::HighAngle => "highAngle",
      ShotType::LowAngle => "lowAngle",
      ShotType::DutchAngle => "dutchAngle",
      ShotType::EyeLevel => "eyeLevel",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      ShotType::HighAngle => "Plano alto / Ângulo alto",
      ShotType::LowAngle => "Plano baixo / Ângulo baixo",
      ShotType::DutchAngle => "Plano holandês / Ângulo inclinado",
      ShotType::EyeLevel => "Ao nível dos olhos",
    }
  }
}

impl FromStr for ShotType {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    Self::ALL
      .into_iter()
      .find(|t| t.value() == trimmed)
      .ok_or_else(|| ValidationError::UnknownShotType(s.to_string()))
  }
}

impl fmt::Display for ShotType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.value())
  }
}
