//! HTTP Auth Gateway
//!
//! Every call goes through the shared `ApiClient`, so auth requests get the
//! same CSRF handling and 401 behaviour as the rest of the app.

use std::sync::Arc;

use platform::client::{ApiClient, ApiRequest};
use platform::csrf::CsrfToken;
use platform::error::ClientError;

use crate::application::config::AuthConfig;
use crate::domain::entity::profile::{PasswordChange, ProfileUpdate};
use crate::domain::entity::user::AuthenticatedUser;
use crate::domain::gateway::{AuthGateway, SignInOutcome};
use crate::domain::value_object::credentials::Credentials;
use crate::error::{AuthError, AuthResult};
use crate::infra::dto::LoginResponse;

/// Auth gateway backed by the HTTP API
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: ApiClient,
    config: Arc<AuthConfig>,
}

impl HttpAuthGateway {
    pub fn new(client: ApiClient, config: Arc<AuthConfig>) -> Self {
        Self { client, config }
    }
}

impl AuthGateway for HttpAuthGateway {
    async fn fetch_profile(&self) -> AuthResult<AuthenticatedUser> {
        let user: AuthenticatedUser = self.client.get(&self.config.profile_path).await?;
        Ok(user)
    }

    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<SignInOutcome> {
        let response: LoginResponse = self
            .client
            .post(&self.config.login_path, credentials)
            .await
            .map_err(|e| match e {
                ClientError::Unauthorized => AuthError::InvalidCredentials,
                other => AuthError::Client(other),
            })?;

        Ok(SignInOutcome {
            user: response.user,
            csrf_token: response.csrf_token.map(CsrfToken::new),
        })
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.client
            .send(&ApiRequest::post(self.config.logout_path.as_str()))
            .await?;
        Ok(())
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> AuthResult<AuthenticatedUser> {
        let user: AuthenticatedUser = self
            .client
            .put(&self.config.profile_update_path, update)
            .await?;
        Ok(user)
    }

    async fn change_password(&self, change: &PasswordChange) -> AuthResult<()> {
        let request = ApiRequest::post(self.config.change_password_path.as_str()).json(change)?;
        self.client.send(&request).await?;
        Ok(())
    }
}
