//! Navigation seam
//!
//! The HTTP client sends the surrounding shell to the login location when the
//! backend reports an expired session. The shell decides what "navigate" means.

use parking_lot::Mutex;

/// Moves the browsing context to another location
pub trait Navigator: Send + Sync {
    fn redirect(&self, location: &str);
}

/// Navigator that only logs; used by the console binary
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect(&self, location: &str) {
        tracing::warn!(location = %location, "Session expired, sign in again");
    }
}

/// Navigator that records every redirect in memory
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location after the most recent redirect
    pub fn location(&self) -> Option<String> {
        self.history.lock().last().cloned()
    }

    pub fn redirect_count(&self) -> usize {
        self.history.lock().len()
    }
}

impl Navigator for MemoryNavigator {
    fn redirect(&self, location: &str) {
        self.history.lock().push(location.to_string());
    }
}
