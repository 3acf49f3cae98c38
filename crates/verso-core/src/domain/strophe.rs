use serde::{Deserialize, Serialize};

use crate::domain::ids::StropheId;
use crate::domain::verse::Verse;
use crate::domain::vocab::{Architecture, Episode, MusicSection};
use crate::errors::ValidationError;

/// La Estrofe: grupo ordenado de versos con un papel dramático común.
///
/// `architecture` y `architecture_desc` son privados porque juntos forman un
/// invariante: solo "Episódios" admite sub-etiqueta. Se modifican con
/// [`Strophe::set_architecture`]. La deserialización pasa por la misma
/// validación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StropheRecord")]
pub struct Strophe {
  pub id: StropheId,
  pub verses: Vec<Verse>,
  architecture: Architecture,
  #[serde(skip_serializing_if = "Option::is_none")]
  architecture_desc: Option<Episode>,
  pub description: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub music_section: Option<MusicSection>,
}

impl Strophe {
  /// Estrofe vacía con la descripción por defecto de su arquitectura.
  pub fn new(architecture: Architecture) -> Self {
    Self {
      id: StropheId::new(),
      verses: Vec::new(),
      architecture,
      architecture_desc: None,
      description: architecture.description().to_string(),
      music_section: None,
    }
  }

  pub fn architecture(&self) -> Architecture {
    self.architecture
  }

  pub fn architecture_desc(&self) -> Option<Episode> {
    self.architecture_desc
  }

  /// Cambia la arquitectura.
  ///
  /// Si la nueva arquitectura no es "Episódios" la sub-etiqueta se limpia;
  /// pasar una sub-etiqueta con otra arquitectura es un error.
  pub fn set_architecture(
    &mut self,
    architecture: Architecture,
    episode: Option<Episode>,
  ) -> Result<(), ValidationError> {
    check_episode(architecture, episode)?;
    self.architecture = architecture;
    self.architecture_desc = episode;
    Ok(())
  }

  pub fn verse_index(&self, id: crate::domain::ids::VerseId) -> Option<usize> {
    self.verses.iter().position(|v| v.id == id)
  }
}

impl Default for Strophe {
  fn default() -> Self {
    Self::new(Architecture::default())
  }
}

fn check_episode(architecture: Architecture, episode: Option<Episode>) -> Result<(), ValidationError> {
  if episode.is_some() && !architecture.accepts_episode() {
    return Err(ValidationError::EpisodeOutsideEpisodes(architecture.label().to_string()));
  }
  Ok(())
}

/// Forma serializada de una estrofe, antes de validar.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StropheRecord {
  id: StropheId,
  #[serde(default)]
  verses: Vec<Verse>,
  architecture: Architecture,
  #[serde(default)]
  architecture_desc: Option<Episode>,
  #[serde(default)]
  description: String,
  #[serde(default)]
  music_section: Option<MusicSection>,
}

impl TryFrom<StropheRecord> for Strophe {
  type Error = ValidationError;

  fn try_from(r: StropheRecord) -> Result<Self, Self::Error> {
    check_episode(r.architecture, r.architecture_desc)?;
    Ok(Strophe {
      id: r.id,
      verses: r.verses,
      architecture: r.architecture,
      architecture_desc: r.architecture_desc,
      description: r.description,
      music_section: r.music_section,
    })
  }
}

/// Borrador de estrofe tal y como llega de la UI.
#[derive(Debug, Clone, Default)]
pub struct StropheDraft {
  pub architecture: Option<String>,
  pub architecture_desc: Option<String>,
  pub description: Option<String>,
  pub music_section: Option<String>,
}

impl StropheDraft {
  /// Valida el borrador y asigna un id nuevo.
  ///
  /// Sin arquitectura explícita se usa "Prólogo". Una sub-etiqueta vacía se
  /// trata como ausente.
  pub fn build(self) -> Result<Strophe, ValidationError> {
    let architecture = match self.architecture.as_deref() {
      Some(a) => a.parse()?,
      None => Architecture::default(),
    };
    let episode = self
      .architecture_desc
      .as_deref()
      .filter(|d| !d.trim().is_empty())
      .map(str::parse::<Episode>)
      .transpose()?;
    check_episode(architecture, episode)?;

    let mut strophe = Strophe::new(architecture);
    strophe.architecture_desc = episode;
    if let Some(desc) = self.description {
      strophe.description = desc;
    }
    strophe.music_section = self.music_section.as_deref().map(str::parse).transpose()?;
    Ok(strophe)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_stray_episode_is_rejected_at_construction() {
    let draft = StropheDraft {
      architecture: Some("Prólogo".into()),
      architecture_desc: Some("Queda (catástrofe)".into()),
      ..Default::default()
    };
    assert_eq!(draft.build().unwrap_err(), ValidationError::EpisodeOutsideEpisodes("Prólogo".into()));
  }

  #[test]
  fn test_episode_accepted_for_episodios() {
    let strophe = StropheDraft {
      architecture: Some("Episódios".into()),
      architecture_desc: Some("Queda (catástrofe)".into()),
      ..Default::default()
    }
    .build()
    .unwrap();
    assert_eq!(strophe.architecture(), Architecture::Episodes);
    assert_eq!(strophe.architecture_desc(), Some(Episode::Catastrophe));
    assert_eq!(strophe.description, Architecture::Episodes.description());
  }

  #[test]
  fn test_stray_episode_is_rejected_at_deserialization() {
    let json = format!(
      r#"{{"id":"{}","verses":[],"architecture":"Prólogo","architectureDesc":"Queda (catástrofe)","description":""}}"#,
      StropheId::new()
    );
    assert!(serde_json::from_str::<Strophe>(&json).is_err());
  }

  #[test]
  fn test_leaving_episodios_clears_sub_label() {
    let mut strophe = Strophe::new(Architecture::Episodes);
    strophe.set_architecture(Architecture::Episodes, Some(Episode::Hamartia)).unwrap();
    strophe.set_architecture(Architecture::Epilogue, None).unwrap();
    assert_eq!(strophe.architecture_desc(), None);

    assert!(strophe.set_architecture(Architecture::Epilogue, Some(Episode::Hamartia)).is_err());
    assert_eq!(strophe.architecture(), Architecture::Epilogue);
  }
}
