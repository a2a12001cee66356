//! Password strength heuristic.
//!
//! `analyze` scores a secret with a fixed set of additive checks and
//! returns the score, a coarse level, and the list of deficiencies found.
//! It is pure: no I/O, no hidden state, and total over every input
//! (including the empty string).

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PassVaultError;

/// Highest score `analyze` can return.
pub const MAX_SCORE: u8 = 100;

/// Substrings that mark a secret as following a common pattern.
/// Matched case-insensitively.
const COMMON_PATTERNS: [&str; 5] = ["123", "abc", "qwe", "password", "admin"];

/// Distinct-character ratio a secret must exceed to earn the entropy bonus.
const UNIQUENESS_RATIO: f64 = 0.7;

pub const ISSUE_TOO_SHORT: &str = "Password is too short (minimum 8 characters)";
pub const ISSUE_NO_LOWERCASE: &str = "Missing lowercase letters";
pub const ISSUE_NO_UPPERCASE: &str = "Missing uppercase letters";
pub const ISSUE_NO_DIGITS: &str = "Missing numbers";
pub const ISSUE_NO_SYMBOLS: &str = "Missing special characters";
pub const ISSUE_REPEATED: &str = "Contains repeated characters";
pub const ISSUE_COMMON_PATTERN: &str = "Contains common patterns";

/// Coarse strength bucket derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLevel {
    /// Map a score onto its level: ≥80 strong, ≥60 good, ≥40 fair, else weak.
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Strong,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Weak,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrengthLevel {
    type Err = PassVaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weak" => Ok(Self::Weak),
            "fair" => Ok(Self::Fair),
            "good" => Ok(Self::Good),
            "strong" => Ok(Self::Strong),
            other => Err(PassVaultError::SerializationError(format!(
                "unknown strength level '{other}'"
            ))),
        }
    }
}

/// Outcome of `analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthResult {
    /// Score in `0..=100`.
    pub score: u8,
    pub level: StrengthLevel,
    /// Deficiencies in check order: length, lowercase, uppercase,
    /// digits, symbols, repetition, common pattern.
    pub issues: Vec<String>,
}

impl StrengthResult {
    /// Rebuild a result from stored parts, re-deriving the level.
    pub fn from_parts(score: u8, issues: Vec<String>) -> Self {
        let score = score.min(MAX_SCORE);
        Self {
            score,
            level: StrengthLevel::from_score(score),
            issues,
        }
    }
}

/// Score a secret.
pub fn analyze(secret: &str) -> StrengthResult {
    let mut score: u32 = 0;
    let mut issues: Vec<String> = Vec::new();

    let length = secret.chars().count();

    // Length
    if length >= 12 {
        score += 25;
    } else if length >= 8 {
        score += 15;
    } else {
        issues.push(ISSUE_TOO_SHORT.to_string());
    }

    // Character variety
    if secret.chars().any(|c| c.is_ascii_lowercase()) {
        score += 10;
    } else {
        issues.push(ISSUE_NO_LOWERCASE.to_string());
    }

    if secret.chars().any(|c| c.is_ascii_uppercase()) {
        score += 10;
    } else {
        issues.push(ISSUE_NO_UPPERCASE.to_string());
    }

    if secret.chars().any(|c| c.is_ascii_digit()) {
        score += 10;
    } else {
        issues.push(ISSUE_NO_DIGITS.to_string());
    }

    if secret.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 15;
    } else {
        issues.push(ISSUE_NO_SYMBOLS.to_string());
    }

    // Patterns. Absence only earns points when there is something to
    // inspect, so an empty secret scores zero.
    if has_repeated_run(secret, 3) {
        issues.push(ISSUE_REPEATED.to_string());
    } else if length > 0 {
        score += 10;
    }

    if has_common_pattern(secret) {
        issues.push(ISSUE_COMMON_PATTERN.to_string());
    } else if length > 0 {
        score += 10;
    }

    // Entropy bonus. An empty secret has no ratio and earns nothing.
    if length > 0 {
        let unique = secret.chars().collect::<HashSet<char>>().len();
        if unique as f64 / length as f64 > UNIQUENESS_RATIO {
            score += 10;
        }
    }

    let score = score.min(u32::from(MAX_SCORE)) as u8;

    StrengthResult {
        score,
        level: StrengthLevel::from_score(score),
        issues,
    }
}

/// `true` if some character repeats at least `run` times in a row.
fn has_repeated_run(secret: &str, run: usize) -> bool {
    let mut previous: Option<char> = None;
    let mut count = 0;

    for c in secret.chars() {
        if previous == Some(c) {
            count += 1;
        } else {
            previous = Some(c);
            count = 1;
        }
        if count >= run {
            return true;
        }
    }

    false
}

fn has_common_pattern(secret: &str) -> bool {
    let lowered = secret.to_ascii_lowercase();
    COMMON_PATTERNS.iter().any(|p| lowered.contains(p))
}
