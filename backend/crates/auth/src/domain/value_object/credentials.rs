//! Sign-in credentials

use serde::Serialize;

use crate::domain::value_object::email::Email;

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

impl Credentials {
    pub fn new(email: Email, password: impl Into<String>) -> Self {
        Self {
            email,
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
