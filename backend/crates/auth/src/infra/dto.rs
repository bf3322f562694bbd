//! Wire formats of the auth endpoints

use serde::Deserialize;

use crate::domain::entity::user::AuthenticatedUser;

/// Body of `POST /auth/login`
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: AuthenticatedUser,
    #[serde(rename = "csrfToken", alias = "csrf_token", default)]
    pub csrf_token: Option<String>,
}
