use std::sync::RwLock;

use crate::domain::ids::UserId;

/// Consulta de la sesión autenticada actual.
///
/// Se pregunta en el momento de escribir, no al programar la escritura.
pub trait SessionProvider: Send + Sync {
  fn current_user(&self) -> Option<UserId>;
}

/// Sesión fija en memoria; sirve para binarios, configuración estática y tests.
#[derive(Debug, Default)]
pub struct StaticSession {
  user: RwLock<Option<UserId>>,
}

impl StaticSession {
  pub fn anonymous() -> Self {
    Self::default()
  }

  pub fn signed_in(user: UserId) -> Self {
    Self { user: RwLock::new(Some(user)) }
  }

  pub fn sign_in(&self, user: UserId) {
    if let Ok(mut guard) = self.user.write() {
      *guard = Some(user);
    }
  }

  pub fn sign_out(&self) {
    if let Ok(mut guard) = self.user.write() {
      *guard = None;
    }
  }
}

impl SessionProvider for StaticSession {
  fn current_user(&self) -> Option<UserId> {
    self.user.read().ok().and_then(|g| g.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sign_in_and_out() {
    let session = StaticSession::anonymous();
    assert_eq!(session.current_user(), None);

    session.sign_in(UserId::new("u-1"));
    assert_eq!(session.current_user(), Some(UserId::new("u-1")));

    session.sign_out();
    assert_eq!(session.current_user(), None);
  }
}
