use serde::{Deserialize, Serialize};
use std::time::Duration;
use verso_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
  /// Raíz del almacén remoto (`{base_url}/users/...`, `{base_url}/projects/...`).
  #[serde(default = "default_base_url")]
  pub base_url: String,

  /// Endpoint del analizador métrico.
  #[serde(default = "default_meter_url")]
  pub meter_url: String,

  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,

  pub user_id: Option<String>,
  pub token: Option<String>,
}

fn default_base_url() -> String {
  "http://localhost:8080".into()
}

fn default_meter_url() -> String {
  "http://localhost:5000/analyze".into()
}

fn default_timeout_secs() -> u64 {
  15
}

impl Default for RemoteConfig {
  fn default() -> Self {
    RemoteConfig {
      base_url: default_base_url(),
      meter_url: default_meter_url(),
      timeout_secs: default_timeout_secs(),
      user_id: None,
      token: None,
    }
  }
}

impl RemoteConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("remote")?;
    CONFIG_BACKEND.save_section("remote", &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("remote", self)
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_partial_section_keeps_defaults() {
    let cfg: RemoteConfig = toml::from_str("base_url = \"https://verso.example\"\ntoken = \"t\"").unwrap();
    assert_eq!(cfg.base_url, "https://verso.example");
    assert_eq!(cfg.meter_url, "http://localhost:5000/analyze");
    assert_eq!(cfg.timeout(), Duration::from_secs(15));
    assert_eq!(cfg.token.as_deref(), Some("t"));
    assert_eq!(cfg.user_id, None);
  }
}
