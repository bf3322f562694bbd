//! Session Context
//!
//! Owns the session state of one client and tells observers about every
//! transition. Constructed once at startup and passed to whoever needs it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use platform::client::{ApiClient, ListenerId};
use platform::csrf::CsrfTokenCache;
use platform::notice::{Notice, Notifier};
use platform::query_cache::QueryCache;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::AuthenticatedUser;
use crate::domain::gateway::AuthGateway;
use crate::domain::state::SessionState;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Callback receiving every new session state
pub type SessionObserver = Arc<dyn Fn(&SessionState) + Send + Sync>;

/// Handle returned by [`SessionContext::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct SessionInner<G> {
    gateway: Arc<G>,
    csrf: CsrfTokenCache,
    queries: QueryCache,
    notifier: Arc<dyn Notifier>,
    config: Arc<AuthConfig>,
    state: RwLock<SessionState>,
    observers: RwLock<Vec<(SubscriptionId, SessionObserver)>>,
    next_subscription: AtomicU64,
    unauthorized: Mutex<Option<(ApiClient, ListenerId)>>,
}

impl<G> Drop for SessionInner<G> {
    fn drop(&mut self) {
        if let Some((client, id)) = self.unauthorized.get_mut().take() {
            client.remove_listener(id);
        }
    }
}

/// Session context
///
/// Cheap to clone; clones share state and observers. Locks are never held
/// across an `.await`.
pub struct SessionContext<G> {
    inner: Arc<SessionInner<G>>,
}

impl<G> Clone for SessionContext<G> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<G> SessionContext<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    pub fn new(
        gateway: Arc<G>,
        csrf: CsrfTokenCache,
        queries: QueryCache,
        notifier: Arc<dyn Notifier>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                gateway,
                csrf,
                queries,
                notifier,
                config,
                state: RwLock::new(SessionState::Loading),
                observers: RwLock::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
                unauthorized: Mutex::new(None),
            }),
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Resolve the initial state from the profile endpoint
    ///
    /// Any failure leaves the session unauthenticated.
    pub async fn mount(&self) -> SessionState {
        let next = match self.inner.gateway.fetch_profile().await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "Session restored");
                SessionState::Authenticated(user)
            }
            Err(e) => {
                tracing::debug!(error = %e, "No active session");
                SessionState::Unauthenticated
            }
        };
        self.set_state(next.clone());
        next
    }

    /// Make `user` the active user
    pub fn login(&self, user: AuthenticatedUser) {
        self.inner.queries.clear();
        tracing::info!(user_id = %user.id, role = %user.role, "User signed in");
        self.set_state(SessionState::Authenticated(user));
    }

    /// End the session
    ///
    /// The backend call is best-effort; local state is cleared whatever it returns.
    pub async fn logout(&self) {
        if let Err(e) = self.inner.gateway.sign_out().await {
            tracing::warn!(error = %e, "Logout request failed, clearing local session anyway");
        }

        let user_id = self.current_user().map(|user| user.id);
        self.set_state(SessionState::Unauthenticated);
        self.inner.csrf.clear();
        self.inner.queries.clear();
        self.inner
            .notifier
            .notify(Notice::success(self.inner.config.logout_notice.clone()));

        match user_id {
            Some(user_id) => tracing::info!(user_id = %user_id, "User signed out"),
            None => tracing::info!("Signed out without an active user"),
        }
    }

    /// Replace the active user without a network call
    pub fn update_user(&self, user: AuthenticatedUser) -> AuthResult<()> {
        {
            let mut state = self.write_state();
            if !state.is_authenticated() {
                return Err(AuthError::NotAuthenticated);
            }
            *state = SessionState::Authenticated(user);
        }
        tracing::debug!("Active user updated");
        self.emit();
        Ok(())
    }

    /// Backend rejected the session
    ///
    /// Moves to unauthenticated without touching the CSRF cache.
    pub fn expire(&self) {
        let expired = {
            let mut state = self.write_state();
            if matches!(*state, SessionState::Unauthenticated) {
                false
            } else {
                *state = SessionState::Unauthenticated;
                true
            }
        };
        if expired {
            tracing::info!("Session expired");
            self.emit();
        }
    }

    /// Listen for 401 responses on `client`
    ///
    /// The listener holds a weak reference, so it does not keep the context
    /// alive, and is removed when the context is dropped. Binding again
    /// replaces the previous listener.
    pub fn bind_unauthorized(&self, client: &ApiClient) -> ListenerId {
        let weak: Weak<SessionInner<G>> = Arc::downgrade(&self.inner);
        let id = client.on_unauthorized(move || {
            if let Some(inner) = weak.upgrade() {
                SessionContext { inner }.expire();
            }
        });

        let previous = self.inner.unauthorized.lock().replace((client.clone(), id));
        if let Some((client, id)) = previous {
            client.remove_listener(id);
        }
        id
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    pub fn state(&self) -> SessionState {
        self.read_state().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.read_state().is_loading()
    }

    pub fn current_user(&self) -> Option<AuthenticatedUser> {
        self.read_state().user().cloned()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.read_state().role()
    }

    pub fn is_head_coach(&self) -> bool {
        self.read_state().is_head_coach()
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Register a callback for every state change
    pub fn subscribe(
        &self,
        observer: impl Fn(&SessionState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner.observers.write().push((id, Arc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.observers.write().retain(|(subscription, _)| *subscription != id);
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Store `next` and notify observers, unless the session was already signed out
    fn set_state(&self, next: SessionState) {
        {
            let mut state = self.write_state();
            if matches!(
                (&*state, &next),
                (SessionState::Unauthenticated, SessionState::Unauthenticated)
            ) {
                return;
            }
            tracing::debug!(from = %state.status(), to = %next.status(), "Session transition");
            *state = next;
        }
        self.emit();
    }

    /// Observers run outside both locks so they may read the context
    fn emit(&self) {
        let snapshot = self.state();
        let observers: Vec<SessionObserver> = self
            .inner
            .observers
            .read()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        for observer in observers {
            observer(&snapshot);
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.state.read()
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.state.write()
    }
}

impl<G> std::fmt::Debug for SessionContext<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("status", &self.inner.state.read().status())
            .finish_non_exhaustive()
    }
}
