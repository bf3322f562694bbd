//! Gateway Trait
//!
//! Interface to the backend auth endpoints. Implementation is in infrastructure layer.

use platform::csrf::CsrfToken;

use crate::domain::entity::profile::{PasswordChange, ProfileUpdate};
use crate::domain::entity::user::AuthenticatedUser;
use crate::domain::value_object::credentials::Credentials;
use crate::error::AuthResult;

/// Result of a successful sign in
#[derive(Debug, Clone)]
pub struct SignInOutcome {
    pub user: AuthenticatedUser,
    /// Token issued together with the session, if the backend sent one
    pub csrf_token: Option<CsrfToken>,
}

/// Auth gateway trait
#[trait_variant::make(AuthGateway: Send)]
pub trait LocalAuthGateway {
    /// Fetch the profile of the current session
    async fn fetch_profile(&self) -> AuthResult<AuthenticatedUser>;

    /// Exchange credentials for a session
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<SignInOutcome>;

    /// End the backend session
    async fn sign_out(&self) -> AuthResult<()>;

    /// Save profile fields, returning the stored user
    async fn update_profile(&self, update: &ProfileUpdate) -> AuthResult<AuthenticatedUser>;

    /// Replace the password of the current user
    async fn change_password(&self, change: &PasswordChange) -> AuthResult<()>;
}
