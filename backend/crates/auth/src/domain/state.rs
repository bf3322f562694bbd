//! Session state

use crate::domain::entity::user::AuthenticatedUser;
use crate::domain::value_object::user_role::UserRole;

/// Where the session stands
///
/// Starts in `Loading` until the first profile fetch settles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(AuthenticatedUser),
}

/// State without the user, for logs and comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Unauthenticated,
    Authenticated,
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionState::Loading => SessionStatus::Loading,
            SessionState::Unauthenticated => SessionStatus::Unauthenticated,
            SessionState::Authenticated(_) => SessionStatus::Authenticated,
        }
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user().map(|user| user.role)
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    /// Head coach flag; false whenever nobody is signed in
    pub fn is_head_coach(&self) -> bool {
        self.role().is_some_and(|role| role.is_head_coach())
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SessionStatus::Loading => "loading",
            SessionStatus::Unauthenticated => "unauthenticated",
            SessionStatus::Authenticated => "authenticated",
        })
    }
}
