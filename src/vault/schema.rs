//! SQLite schema for the credential store.
//!
//! Two tables:
//! - `credentials`: one row per stored secret, indexed by owner and by
//!   owner + site label.
//! - `insights`: at most one rollup row per owner.

use std::path::Path;

use rusqlite::Connection;

use crate::errors::Result;

/// File name of the database inside the data directory.
pub const DB_FILE_NAME: &str = "passvault.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS credentials (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    owner           TEXT NOT NULL,
    site_label      TEXT NOT NULL,
    site_url        TEXT,
    login_name      TEXT NOT NULL,
    secret_at_rest  TEXT NOT NULL,
    category        TEXT,
    notes           TEXT,
    last_used_at    INTEGER,
    is_favorite     INTEGER,
    strength_score  INTEGER NOT NULL,
    strength_level  TEXT NOT NULL,
    strength_issues TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_credentials_owner
    ON credentials (owner);
CREATE INDEX IF NOT EXISTS idx_credentials_owner_site
    ON credentials (owner, site_label);

CREATE TABLE IF NOT EXISTS insights (
    owner           TEXT PRIMARY KEY,
    total_count     INTEGER NOT NULL,
    weak_count      INTEGER NOT NULL,
    duplicate_count INTEGER NOT NULL,
    stale_count     INTEGER NOT NULL,
    average_score   REAL NOT NULL,
    last_updated_at INTEGER NOT NULL
);
";

/// Open (or create) the database at `path` and make sure the schema exists.
pub fn open(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;

    // The database holds every secret, so keep it owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    init(&conn)?;
    Ok(conn)
}

/// Open a private in-memory database with the schema applied.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init(&conn)?;
    Ok(conn)
}

fn init(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    tracing::debug!("credential store schema ready");
    Ok(())
}
