mod backend;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use paths::{ConfigError, VersoPaths};

use once_cell::sync::Lazy;

// Rutas de la instalación (o de VERSO_BASE_DIR)
pub static PATHS: Lazy<VersoPaths> = Lazy::new(|| VersoPaths::detect().expect("failed to init VersoPaths"));

// Backend de config compartido por todas las secciones
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> = Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
