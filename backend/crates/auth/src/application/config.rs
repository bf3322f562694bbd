//! Application Configuration
//!
//! Configuration for the Auth application layer.

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Profile of the current session
    pub profile_path: String,
    /// Sign in endpoint
    pub login_path: String,
    /// Sign out endpoint
    pub logout_path: String,
    /// Profile update endpoint
    pub profile_update_path: String,
    /// Password change endpoint
    pub change_password_path: String,
    /// Notice shown after logout
    pub logout_notice: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            profile_path: "/auth/me".to_string(),
            login_path: "/auth/login".to_string(),
            logout_path: "/auth/logout".to_string(),
            profile_update_path: "/auth/profile".to_string(),
            change_password_path: "/auth/change-password".to_string(),
            logout_notice: "Logged out successfully".to_string(),
        }
    }
}
