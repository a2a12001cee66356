//! Random password generation.
//!
//! The character pool is built from the enabled classes in a fixed order
//! (upper, lower, digits, symbols), optionally stripped of look-alike
//! characters, and sampled uniformly with the thread-local CSPRNG.

use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::errors::{PassVaultError, Result};
use crate::strength::{analyze, StrengthResult};

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Characters dropped when `exclude_similar` is set.
pub const SIMILAR: &str = "il1Lo0O";

/// Longest password `generate` will produce.
pub const MAX_LENGTH: usize = 1024;

/// Options for `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_digits: bool,
    pub include_symbols: bool,
    /// Drop `i l 1 L o 0 O` from the pool.
    pub exclude_similar: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            include_uppercase: true,
            include_lowercase: true,
            include_digits: true,
            include_symbols: true,
            exclude_similar: true,
        }
    }
}

impl GeneratorOptions {
    /// Build the effective character pool.
    ///
    /// Fails with `InvalidConfiguration` if nothing is left to draw from.
    pub fn charset(&self) -> Result<Vec<char>> {
        let classes = [
            (self.include_uppercase, UPPERCASE),
            (self.include_lowercase, LOWERCASE),
            (self.include_digits, DIGITS),
            (self.include_symbols, SYMBOLS),
        ];

        let mut pool: Vec<char> = classes
            .iter()
            .filter(|(enabled, _)| *enabled)
            .flat_map(|(_, chars)| chars.chars())
            .collect();

        if self.exclude_similar {
            pool.retain(|c| !SIMILAR.contains(*c));
        }

        if pool.is_empty() {
            return Err(PassVaultError::InvalidConfiguration(
                "at least one character type must be selected".into(),
            ));
        }

        Ok(pool)
    }
}

/// A freshly generated password and its strength.
///
/// The password is wiped from memory when this value is dropped.
pub struct GeneratedPassword {
    pub password: Zeroizing<String>,
    pub strength: StrengthResult,
}

/// Generate a password according to `options`.
pub fn generate(options: &GeneratorOptions) -> Result<GeneratedPassword> {
    if options.length > MAX_LENGTH {
        return Err(PassVaultError::InvalidConfiguration(format!(
            "password length {} exceeds the maximum of {MAX_LENGTH}",
            options.length
        )));
    }
    let pool = options.charset()?;
    let mut rng = rand::rng();

    let mut password = Zeroizing::new(String::with_capacity(options.length));
    for _ in 0..options.length {
        password.push(pool[rng.random_range(0..pool.len())]);
    }

    let strength = analyze(&password);
    Ok(GeneratedPassword { password, strength })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(upper: bool, lower: bool, digits: bool, symbols: bool) -> GeneratorOptions {
        GeneratorOptions {
            length: 20,
            include_uppercase: upper,
            include_lowercase: lower,
            include_digits: digits,
            include_symbols: symbols,
            exclude_similar: false,
        }
    }

    #[test]
    fn digits_only_yields_digits() {
        let g = generate(&only(false, false, true, false)).unwrap();
        assert_eq!(g.password.chars().count(), 20);
        assert!(g.password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn no_classes_is_invalid() {
        let err = generate(&only(false, false, false, false)).err().unwrap();
        assert!(matches!(err, PassVaultError::InvalidConfiguration(_)));
    }

    #[test]
    fn charset_order_is_upper_lower_digits_symbols() {
        let pool: String = only(true, true, true, true).charset().unwrap().into_iter().collect();
        assert_eq!(pool, format!("{UPPERCASE}{LOWERCASE}{DIGITS}{SYMBOLS}"));
    }

    #[test]
    fn exclude_similar_strips_lookalikes() {
        let opts = GeneratorOptions {
            length: 200,
            ..GeneratorOptions::default()
        };
        let pool = opts.charset().unwrap();
        for c in SIMILAR.chars() {
            assert!(!pool.contains(&c), "pool still contains {c:?}");
        }
        // Uppercase I is not in the look-alike set.
        assert!(pool.contains(&'I'));

        let g = generate(&opts).unwrap();
        assert!(!g.password.chars().any(|c| SIMILAR.contains(c)));
    }

    #[test]
    fn strength_matches_analyzer() {
        let g = generate(&GeneratorOptions::default()).unwrap();
        assert_eq!(g.strength, analyze(&g.password));
    }

    #[test]
    fn length_above_maximum_is_invalid() {
        let err = generate(&GeneratorOptions {
            length: usize::MAX,
            ..GeneratorOptions::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, PassVaultError::InvalidConfiguration(_)));

        let at_max = generate(&GeneratorOptions {
            length: MAX_LENGTH,
            ..GeneratorOptions::default()
        })
        .unwrap();
        assert_eq!(at_max.password.chars().count(), MAX_LENGTH);
    }

    #[test]
    fn zero_length_is_empty() {
        let g = generate(&GeneratorOptions {
            length: 0,
            ..GeneratorOptions::default()
        })
        .unwrap();
        assert!(g.password.is_empty());
        assert_eq!(g.strength.score, 0);
    }
}
