use crate::model::User;
use serde::{Deserialize, Serialize};

/// An already-authenticated caller.
///
/// Every workflow operation takes the identity explicitly; nothing is read from
/// ambient state. `subject` is the username the identity was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub subject: String,
    pub is_admin: bool,
}

impl Identity {
    /// A regular customer.
    pub fn user(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            is_admin: false,
        }
    }

    /// An administrator, allowed to see and modify every order.
    pub fn admin(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            is_admin: true,
        }
    }

    /// Administrators may access anything; everyone else only what they own.
    pub fn may_access(&self, owner: &str) -> bool {
        self.is_admin || self.subject == owner
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            subject: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}
