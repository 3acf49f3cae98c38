use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Análisis métrico de una palabra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAnalysis {
  pub word: String,
  /// Sílabas separadas por guiones (`lâ-mi-na`).
  pub syllable_breakdown: String,
  /// Escansión en `0`/`1` (átona/tónica) por sílaba.
  pub scansion: String,
  pub syllable_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAnalysis {
  pub original: String,
  pub total_syllables: u32,
  pub words: Vec<WordAnalysis>,
}

impl LineAnalysis {
  /// Escansión de la línea completa, palabra a palabra separada por espacios.
  pub fn scansion(&self) -> String {
    self.words.iter().map(|w| w.scansion.as_str()).collect::<Vec<_>>().join(" ")
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReport {
  pub lines: Vec<LineAnalysis>,
}

#[derive(Debug, thiserror::Error)]
pub enum MeterError {
  #[error("meter service unavailable: {0}")]
  Unavailable(String),

  #[error("meter service answered with status {0}")]
  Status(u16),

  #[error("malformed meter response: {0}")]
  Malformed(String),
}

/// Servicio externo de análisis métrico. Opaco: recibe líneas en bruto y
/// devuelve el desglose silábico. El resultado es orientativo y nunca afecta
/// a la validez del documento.
#[async_trait]
pub trait MeterAnalyzer: Send + Sync {
  async fn analyze(&self, lines: &[String]) -> Result<MeterReport, MeterError>;
}
