//! Sign In Use Case
//!
//! Exchanges credentials for a session and activates the returned user.

use std::sync::Arc;

use platform::csrf::CsrfTokenCache;

use crate::application::session::SessionContext;
use crate::domain::entity::user::AuthenticatedUser;
use crate::domain::gateway::AuthGateway;
use crate::domain::value_object::{credentials::Credentials, email::Email};
use crate::error::AuthResult;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<G>
where
    G: AuthGateway,
{
    gateway: Arc<G>,
    session: SessionContext<G>,
    csrf: CsrfTokenCache,
}

impl<G> SignInUseCase<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>, session: SessionContext<G>, csrf: CsrfTokenCache) -> Self {
        Self {
            gateway,
            session,
            csrf,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<AuthenticatedUser> {
        let email = Email::new(input.email)?;
        let credentials = Credentials::new(email, input.password);

        let outcome = self.gateway.sign_in(&credentials).await?;

        // Store the token before any observer can fire a mutating request
        if let Some(token) = outcome.csrf_token.filter(|token| !token.is_blank()) {
            self.csrf.set(token);
        }

        self.session.login(outcome.user.clone());
        Ok(outcome.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::tests::{FakeGateway, harness};
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AuthError;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_sign_in_activates_user_and_stores_token() {
        let h = harness(FakeGateway {
            profile: Mutex::new(Some(AuthenticatedUser::new(4, UserRole::HeadCoach))),
            ..FakeGateway::default()
        });
        let use_case = SignInUseCase::new(h.gateway.clone(), h.session.clone(), h.csrf.clone());

        let user = use_case
            .execute(SignInInput {
                email: "Coach@Example.com".to_string(),
                password: "Abcdefg1!".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id.value(), 4);
        assert!(h.session.is_head_coach());
        assert_eq!(h.csrf.get().unwrap().as_str(), "issued-at-login");
    }

    #[tokio::test]
    async fn test_invalid_email_never_reaches_backend() {
        let h = harness(FakeGateway::default());
        let use_case = SignInUseCase::new(h.gateway.clone(), h.session.clone(), h.csrf.clone());

        let err = use_case
            .execute(SignInInput {
                email: "not-an-email".to_string(),
                password: "whatever".to_string(),
            })
            .await
            .unwrap_err();

        match err {
            AuthError::Validation(app) => assert!(app.field_error("email").is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(h.session.is_loading());
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let h = harness(FakeGateway::default());
        let use_case = SignInUseCase::new(h.gateway.clone(), h.session.clone(), h.csrf.clone());

        let err = use_case
            .execute(SignInInput {
                email: "coach@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!h.session.is_authenticated());
        assert!(h.csrf.is_empty());
    }
}
