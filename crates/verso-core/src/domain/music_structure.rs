use serde::{Deserialize, Serialize};

use crate::domain::vocab::MusicSection;
use crate::errors::ValidationError;

/// Arreglo de la canción: secuencia ordenada de secciones, sin repetidos.
///
/// Es independiente de la lista de estrofes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MusicSection>", into = "Vec<MusicSection>")]
pub struct MusicStructure(Vec<MusicSection>);

impl MusicStructure {
  pub fn new() -> Self {
    Self(Vec::new())
  }

  pub fn as_slice(&self) -> &[MusicSection] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn contains(&self, section: MusicSection) -> bool {
    self.0.contains(&section)
  }

  pub fn position(&self, section: MusicSection) -> Option<usize> {
    self.0.iter().position(|s| *s == section)
  }

  /// Añade al final. Una sección repetida es un error.
  pub fn push(&mut self, section: MusicSection) -> Result<(), ValidationError> {
    if self.contains(section) {
      return Err(ValidationError::DuplicateSection(section));
    }
    self.0.push(section);
    Ok(())
  }

  /// Quita la sección si estaba. Devuelve `true` si se quitó algo.
  pub fn remove(&mut self, section: MusicSection) -> bool {
    let before = self.0.len();
    self.0.retain(|s| *s != section);
    before != self.0.len()
  }

  pub(crate) fn sections_mut(&mut self) -> &mut Vec<MusicSection> {
    &mut self.0
  }
}

impl TryFrom<Vec<MusicSection>> for MusicStructure {
  type Error = ValidationError;

  fn try_from(sections: Vec<MusicSection>) -> Result<Self, Self::Error> {
    let mut out = MusicStructure::new();
    for s in sections {
      out.push(s)?;
    }
    Ok(out)
  }
}

impl From<MusicStructure> for Vec<MusicSection> {
  fn from(m: MusicStructure) -> Self {
    m.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_duplicates_are_rejected() {
    let err = MusicStructure::try_from(vec![MusicSection::Chorus, MusicSection::Chorus]).unwrap_err();
    assert_eq!(err, ValidationError::DuplicateSection(MusicSection::Chorus));
    assert!(serde_json::from_str::<MusicStructure>(r#"["refrao","refrao"]"#).is_err());
  }

  #[test]
  fn test_order_survives_serde() {
    let m: MusicStructure = serde_json::from_str(r#"["outro","introducao","verso"]"#).unwrap();
    assert_eq!(m.as_slice(), &[MusicSection::Outro, MusicSection::Intro, MusicSection::Verse]);
    assert_eq!(serde_json::to_string(&m).unwrap(), r#"["outro","introducao","verso"]"#);
  }
}
