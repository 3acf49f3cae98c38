use serde::{Deserialize, Serialize};
use std::time::Duration;
use verso_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};

/// Ventanas de debounce de los dos sinks, en milisegundos.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SyncConfig {
  #[serde(default = "default_local_debounce_ms")]
  pub local_debounce_ms: u64,

  #[serde(default = "default_remote_debounce_ms")]
  pub remote_debounce_ms: u64,
}

fn default_local_debounce_ms() -> u64 {
  2_000
}

fn default_remote_debounce_ms() -> u64 {
  30_000
}

impl Default for SyncConfig {
  fn default() -> Self {
    SyncConfig { local_debounce_ms: default_local_debounce_ms(), remote_debounce_ms: default_remote_debounce_ms() }
  }
}

impl SyncConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("sync")?;
    CONFIG_BACKEND.save_section("sync", &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("sync", self)
  }

  pub fn local_window(&self) -> Duration {
    Duration::from_millis(self.local_debounce_ms)
  }

  pub fn remote_window(&self) -> Duration {
    Duration::from_millis(self.remote_debounce_ms)
  }
}
