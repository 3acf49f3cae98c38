use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::ValidationError;

/// Color personalizado de una palabra, siempre normalizado a `#rrggbb` en minúsculas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl FromStr for Color {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    let hex = trimmed.strip_prefix('#').ok_or_else(|| ValidationError::InvalidColor(s.to_string()))?;

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValidationError::InvalidColor(s.to_string()));
    }

    Ok(Color(format!("#{}", hex.to_ascii_lowercase())))
  }
}

impl TryFrom<String> for Color {
  type Error = ValidationError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Color> for String {
  fn from(c: Color) -> Self {
    c.0
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Palabra de un verso. Hoja del árbol: no tiene identidad propia, su
/// posición dentro del verso es su orden de lectura.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
  pub text: String,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub custom_color: Option<Color>,

  /// Sílaba tónica marcada (se exporta en negrita).
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub stressed: bool,
}

impl Word {
  pub fn new(text: impl Into<String>) -> Self {
    Self { text: text.into(), custom_color: None, stressed: false }
  }

  pub fn stressed(mut self) -> Self {
    self.stressed = true;
    self
  }

  pub fn with_color(mut self, color: Color) -> Self {
    self.custom_color = Some(color);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_color_is_normalized() {
    let c: Color = " #FFaa00 ".parse().unwrap();
    assert_eq!(c.as_str(), "#ffaa00");
  }

  #[test]
  fn test_color_rejects_garbage() {
    assert!("ffaa00".parse::<Color>().is_err());
    assert!("#ffaa0".parse::<Color>().is_err());
    assert!("#ggaa00".parse::<Color>().is_err());
  }

  #[test]
  fn test_word_serializes_compactly() {
    let json = serde_json::to_string(&Word::new("FOGO")).unwrap();
    assert_eq!(json, r#"{"text":"FOGO"}"#);

    let json = serde_json::to_string(&Word::new("FOGO").stressed()).unwrap();
    assert_eq!(json, r#"{"text":"FOGO","stressed":true}"#);
  }
}
