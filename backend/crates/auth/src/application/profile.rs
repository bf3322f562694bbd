//! Profile Use Case
//!
//! Profile edits and password changes for the signed-in user.

use std::sync::Arc;

use platform::password::PasswordRequirements;

use crate::application::session::SessionContext;
use crate::domain::entity::profile::{PasswordChange, ProfileUpdate};
use crate::domain::entity::user::AuthenticatedUser;
use crate::domain::gateway::AuthGateway;
use crate::error::{AuthError, AuthResult};

/// Profile use case
pub struct ProfileUseCase<G>
where
    G: AuthGateway,
{
    gateway: Arc<G>,
    session: SessionContext<G>,
}

impl<G> ProfileUseCase<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>, session: SessionContext<G>) -> Self {
        Self { gateway, session }
    }

    /// Save profile fields and make the stored user the active one
    pub async fn save(&self, update: &ProfileUpdate) -> AuthResult<AuthenticatedUser> {
        if !self.session.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }

        let user = self.gateway.update_profile(update).await?;
        self.session.update_user(user.clone())?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Replace the password after checking every requirement locally
    pub async fn change_password(&self, current: &str, new: &str) -> AuthResult<()> {
        if !self.session.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }

        let missing = PasswordRequirements::check(new).missing();
        if !missing.is_empty() {
            return Err(AuthError::WeakPassword { missing });
        }

        let change = PasswordChange {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        self.gateway.change_password(&change).await?;

        if let Some(user) = self.session.current_user() {
            tracing::info!(user_id = %user.id, "Password changed");
        }
        Ok(())
    }
}
