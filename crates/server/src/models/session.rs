//! Session data models.
//!
//! The admin session stores the signed-in user. Handlers read it through the
//! extractors in [`crate::middleware::auth`].

use serde::{Deserialize, Serialize};

use gastroboard_core::{Role, User, UserId};

/// Keys used to store data in the session.
pub mod session_keys {
    /// The signed-in user, a [`CurrentUser`](super::CurrentUser).
    pub const CURRENT_USER: &str = "current_user";
}

/// The signed-in user as stored in the session.
///
/// A trimmed copy of [`User`] without the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    /// Whether this user may manage accounts and global settings.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}
