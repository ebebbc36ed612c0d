use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is driving the current request.
///
/// Authentication happens upstream; the core only needs to know whether a
/// user is present. Guests can edit, preview and export documents but never
/// persist anything or see business-confidential footer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Session {
  Guest,
  Authenticated { user_id: Uuid },
}

impl Session {
  pub fn authenticated(user_id: Uuid) -> Self {
    Session::Authenticated { user_id }
  }

  pub fn user_id(&self) -> Option<Uuid> {
    match self {
      Session::Guest => None,
      Session::Authenticated { user_id } => Some(*user_id),
    }
  }

  pub fn is_guest(&self) -> bool {
    matches!(self, Session::Guest)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_guest_has_no_user() {
    assert!(Session::Guest.is_guest());
    assert_eq!(Session::Guest.user_id(), None);
  }

  #[test]
  fn test_authenticated_exposes_user() {
    let id = Uuid::new_v4();
    let session = Session::authenticated(id);
    assert!(!session.is_guest());
    assert_eq!(session.user_id(), Some(id));
  }
}
