//! User Entity
//!
//! The signed-in user as reported by the profile endpoint.

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_role::UserRole;

/// Authenticated user
///
/// Profile fields are optional; the backend omits the ones a user never filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub role: UserRole,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: i64, role: UserRole) -> Self {
        Self {
            id: UserId::from(id),
            role,
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// "First Last", or whichever part is present
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Name for greetings, falling back to the email address
    pub fn display_name(&self) -> String {
        self.full_name()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("user {}", self.id))
    }

    #[inline]
    pub fn is_head_coach(&self) -> bool {
        self.role.is_head_coach()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_profile() {
        let user: AuthenticatedUser = serde_json::from_value(json!({
            "id": 7,
            "role": "head_coach",
            "first_name": "Dana",
            "last_name": "Reyes",
            "email": "dana@example.com",
            "phone": null
        }))
        .unwrap();

        assert_eq!(user.id, UserId::from(7));
        assert!(user.is_head_coach());
        assert_eq!(user.full_name().as_deref(), Some("Dana Reyes"));
        assert_eq!(user.phone, None);
    }

    #[test]
    fn test_missing_profile_fields() {
        let user: AuthenticatedUser =
            serde_json::from_value(json!({ "id": 1, "role": "assistant" })).unwrap();
        assert_eq!(user.full_name(), None);
        assert_eq!(user.display_name(), "user 1");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let user = AuthenticatedUser::new(2, UserRole::Assistant).with_email("a@example.com");
        assert_eq!(user.display_name(), "a@example.com");

        let mut user = user.with_name("Sam", "");
        user.last_name = Some("  ".to_string());
        assert_eq!(user.display_name(), "Sam");
    }
}
