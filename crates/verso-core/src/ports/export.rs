use crate::services::export::{LyricSheet, Storyboard};

/// Documento paginado listo para imprimir o guardar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportedDocument {
  pub pages: Vec<String>,
}

impl ExportedDocument {
  pub fn page_count(&self) -> usize {
    self.pages.len()
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
  #[error("nothing to export")]
  Empty,

  #[error("render error: {0}")]
  Render(String),
}

/// Maquetador. Recibe vistas de solo lectura; nunca toca la canción.
pub trait Exporter {
  fn render_lyrics(&self, sheet: &LyricSheet) -> Result<ExportedDocument, ExportError>;
  fn render_storyboard(&self, board: &Storyboard) -> Result<ExportedDocument, ExportError>;
}
