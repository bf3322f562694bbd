//! CSRF Token Cache
//!
//! Holds the single anti-forgery token of one client. The cache is an
//! explicitly constructed value: the HTTP client and the session context get
//! clones of the same cache at startup, and tests build a fresh one each.
//!
//! Invalidation is reactive only. There is no expiry timer; a rejected request
//! triggers a refresh, logout clears the slot.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Anti-forgery token issued by the backend
///
/// Not a secret in the disclosure sense, but it is still scrubbed from memory
/// when dropped and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CsrfToken").field(&"[REDACTED]").finish()
    }
}

/// Shared slot holding at most one token
///
/// Cloning shares the slot. Every write is a single atomic pointer swap, so
/// readers always observe either the old or the new token, never a mix.
#[derive(Clone, Default)]
pub struct CsrfTokenCache {
    slot: Arc<ArcSwapOption<CsrfToken>>,
}

impl CsrfTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `token`, replacing any previous one
    pub fn set(&self, token: CsrfToken) {
        self.slot.store(Some(Arc::new(token)));
        tracing::debug!("CSRF token cached");
    }

    /// Current token, `None` when empty
    pub fn get(&self) -> Option<CsrfToken> {
        self.slot.load_full().map(|token| token.as_ref().clone())
    }

    pub fn clear(&self) {
        if self.slot.swap(None).is_some() {
            tracing::debug!("CSRF token cleared");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.load().is_none()
    }
}

impl fmt::Debug for CsrfTokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfTokenCache")
            .field("cached", &!self.is_empty())
            .finish()
    }
}
