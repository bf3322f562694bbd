//! Password Strength Evaluation
//!
//! Scores a candidate password against five independent requirements for the
//! strength meter shown next to password fields:
//! - at least [`MIN_PASSWORD_LENGTH`] characters
//! - an uppercase letter
//! - a lowercase letter
//! - a digit
//! - a character outside `[A-Za-z0-9]`
//!
//! The score is the plain count of satisfied requirements. Nothing here talks
//! to the backend; the backend enforces its own policy on submission.

use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length, counted in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

// ============================================================================
// Requirements
// ============================================================================

/// A single requirement shown in the checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl Requirement {
    pub const ALL: [Requirement; 5] = [
        Requirement::MinLength,
        Requirement::Uppercase,
        Requirement::Lowercase,
        Requirement::Digit,
        Requirement::Special,
    ];

    /// Checklist text
    pub const fn description(&self) -> &'static str {
        match self {
            Requirement::MinLength => "At least 8 characters",
            Requirement::Uppercase => "One uppercase letter",
            Requirement::Lowercase => "One lowercase letter",
            Requirement::Digit => "One number",
            Requirement::Special => "One special character",
        }
    }
}

/// Per-requirement breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordRequirements {
    pub min_length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    pub special: bool,
}

impl PasswordRequirements {
    /// Evaluate every requirement independently
    pub fn check(candidate: &str) -> Self {
        Self {
            min_length: candidate.chars().count() >= MIN_PASSWORD_LENGTH,
            uppercase: candidate.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: candidate.chars().any(|c| c.is_ascii_lowercase()),
            digit: candidate.chars().any(|c| c.is_ascii_digit()),
            special: candidate.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    pub const fn is_met(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::MinLength => self.min_length,
            Requirement::Uppercase => self.uppercase,
            Requirement::Lowercase => self.lowercase,
            Requirement::Digit => self.digit,
            Requirement::Special => self.special,
        }
    }

    /// Number of satisfied requirements (0-5)
    pub fn count(&self) -> u8 {
        Requirement::ALL
            .iter()
            .filter(|requirement| self.is_met(**requirement))
            .count() as u8
    }

    pub fn iter(&self) -> impl Iterator<Item = (Requirement, bool)> + '_ {
        Requirement::ALL
            .into_iter()
            .map(move |requirement| (requirement, self.is_met(requirement)))
    }

    /// Requirements still missing, in checklist order
    pub fn missing(&self) -> Vec<Requirement> {
        self.iter()
            .filter(|(_, met)| !met)
            .map(|(requirement, _)| requirement)
            .collect()
    }
}

// ============================================================================
// Strength
// ============================================================================

/// Discrete label for scores 1 through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    /// Label for a score; a score of zero has no label
    pub const fn from_score(score: u8) -> Option<Self> {
        match score {
            1 => Some(StrengthLabel::Weak),
            2 => Some(StrengthLabel::Fair),
            3 => Some(StrengthLabel::Good),
            4 => Some(StrengthLabel::Strong),
            5 => Some(StrengthLabel::VeryStrong),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Strong => "Strong",
            StrengthLabel::VeryStrong => "Very strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating a non-empty candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    score: u8,
    label: StrengthLabel,
    requirements: PasswordRequirements,
}

impl PasswordStrength {
    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn label(&self) -> StrengthLabel {
        self.label
    }

    pub fn requirements(&self) -> &PasswordRequirements {
        &self.requirements
    }

    pub fn meets_all(&self) -> bool {
        self.score as usize == Requirement::ALL.len()
    }
}

/// Score a candidate password
///
/// Returns `None` for a missing or empty candidate, and for a candidate that
/// satisfies no requirement, so the meter renders nothing at all.
///
/// ## Examples
/// ```rust
/// use platform::password::{evaluate_password, StrengthLabel};
///
/// let strength = evaluate_password(Some("Abcdefg1")).unwrap();
/// assert_eq!(strength.score(), 4);
/// assert_eq!(strength.label(), StrengthLabel::Strong);
///
/// assert!(evaluate_password(Some("")).is_none());
/// ```
pub fn evaluate_password(candidate: Option<&str>) -> Option<PasswordStrength> {
    let candidate = candidate.filter(|c| !c.is_empty())?;
    let requirements = PasswordRequirements::check(candidate);
    let score = requirements.count();
    let label = StrengthLabel::from_score(score)?;

    Some(PasswordStrength {
        score,
        label,
        requirements,
    })
}

// ============================================================================
// Tests
// ============================================================================
