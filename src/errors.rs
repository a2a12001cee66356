use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Identity errors ---
    #[error("Not authenticated: pass --user or set PASSVAULT_USER")]
    Unauthenticated,

    // --- Credential errors ---
    #[error("Credential {0} not found")]
    NotFound(i64),

    /// Displays exactly like `NotFound` so a foreign id's existence
    /// is never disclosed to another owner.
    #[error("Credential {0} not found")]
    NotOwned(i64),

    #[error("Credential {0} has an undecodable secret: {1}")]
    CorruptRecord(i64, String),

    // --- Generator errors ---
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // --- Store errors ---
    #[error("Store failure: {0}")]
    StoreFailure(#[from] rusqlite::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl PassVaultError {
    /// Returns `true` for the two "record is not yours to touch" cases.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotOwned(_))
    }
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_record_reads_as_missing() {
        assert_eq!(
            PassVaultError::NotOwned(3).to_string(),
            PassVaultError::NotFound(3).to_string()
        );
        assert!(PassVaultError::NotOwned(3).is_not_found());
        assert!(!PassVaultError::Unauthenticated.is_not_found());
    }
}
