pub mod config;
pub mod meter;
pub mod store;

pub use config::RemoteConfig;
pub use meter::HttpMeterAnalyzer;
pub use store::HttpRemoteStore;

use verso_core::domain::ids::UserId;
use verso_core::ports::StaticSession;

/// Sesión a partir de `[remote]`: con `user_id` configurado, autenticada;
/// sin él, anónima.
pub fn session_from_config(config: &RemoteConfig) -> StaticSession {
  match config.user_id.as_deref().filter(|u| !u.trim().is_empty()) {
    Some(user) => StaticSession::signed_in(UserId::new(user)),
    None => StaticSession::anonymous(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use verso_core::ports::SessionProvider;

  #[test]
  fn test_session_follows_configured_user() {
    let mut cfg = RemoteConfig::default();
    assert_eq!(session_from_config(&cfg).current_user(), None);

    cfg.user_id = Some("  ".into());
    assert_eq!(session_from_config(&cfg).current_user(), None);

    cfg.user_id = Some("u-42".into());
    assert_eq!(session_from_config(&cfg).current_user(), Some(UserId::new("u-42")));
  }
}
