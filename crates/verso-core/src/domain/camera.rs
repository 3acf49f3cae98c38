use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::ids::VerseId;
use crate::domain::vocab::ShotType;

/// Metadatos de producción (storyboard) de un verso.
///
/// Todos los campos son opcionales y están enumerados explícitamente; no hay
/// un mapa libre de claves. `related_verses` guarda **ids** de versos, nunca
/// posiciones: la posición de un verso cambia al reordenar, su id no.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraSettings {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub shot_type: Option<ShotType>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub movement: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resolution: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stabilization: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(skip_serializing_if = "BTreeSet::is_empty")]
  pub related_verses: BTreeSet<VerseId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub iso: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub shutter_speed: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub nd_filter: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub int_ext: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub characters: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub props: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub style: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub objective: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tags: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub special_effects: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub camera_movement: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub coverage: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cast: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub props_costumes: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rhythm_style: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scene_type: Option<String>,
}

impl CameraSettings {
  /// Valores con los que nace un verso escrito a mano: plano a la altura de
  /// los ojos, paneo, 4k, trípode y localización vacía.
  pub fn standard() -> Self {
    Self {
      shot_type: Some(ShotType::EyeLevel),
      movement: Some("pan".to_string()),
      resolution: Some("4k".to_string()),
      stabilization: Some("tripod".to_string()),
      location: Some(String::new()),
      ..Self::default()
    }
  }

  /// Añade o quita `other` de los versos relacionados. Devuelve `true` si quedó relacionado.
  pub fn toggle_related(&mut self, other: VerseId) -> bool {
    if self.related_verses.remove(&other) {
      false
    } else {
      self.related_verses.insert(other);
      true
    }
  }
}

/// Material visual asociado a un verso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Media {
  /// URL o ruta a un recurso externo.
  Reference { uri: String },
  /// Contenido embebido.
  Inline { mime: String, bytes: Vec<u8> },
}

impl Media {
  pub fn is_image(&self) -> bool {
    match self {
      Media::Inline { mime, .. } => mime.starts_with("image"),
      Media::Reference { .. } => false,
    }
  }
}
