use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    HeadCoach,
    #[default]
    Assistant,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            HeadCoach => "head_coach",
            Assistant => "assistant",
        }
    }

    /// Privileged role: manages staff and edits every resource
    #[inline]
    pub const fn is_head_coach(&self) -> bool {
        matches!(self, UserRole::HeadCoach)
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "head_coach" => Some(HeadCoach),
            "assistant" => Some(Assistant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown user role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("head_coach"), Some(UserRole::HeadCoach));
        assert_eq!(UserRole::from_code("assistant"), Some(UserRole::Assistant));
        assert_eq!(UserRole::from_code("admin"), None);
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::HeadCoach.to_string(), "head_coach");
        assert_eq!(UserRole::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_user_role_serde() {
        let role: UserRole = serde_json::from_str("\"head_coach\"").unwrap();
        assert_eq!(role, UserRole::HeadCoach);
        assert_eq!(serde_json::to_string(&UserRole::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn test_user_role_checks() {
        assert!(UserRole::HeadCoach.is_head_coach());
        assert!(!UserRole::Assistant.is_head_coach());
    }
}
