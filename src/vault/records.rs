//! Row-level access to the `credentials` and `insights` tables.
//!
//! Every function takes a plain `&Connection` so it can run either on the
//! connection itself or inside a `rusqlite::Transaction` (which derefs to
//! one). Nothing here checks ownership; that is the caller's job.

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::Result;
use crate::insight::InsightRecord;
use crate::strength::{StrengthLevel, StrengthResult};

use super::credential::{CredentialRecord, DEFAULT_CATEGORY};
use super::identity::Owner;

const CREDENTIAL_COLUMNS: &str = "id, owner, site_label, site_url, login_name, secret_at_rest,
     category, notes, last_used_at, is_favorite,
     strength_score, strength_level, strength_issues";

/// Fields of a credential row that callers write. `id` is assigned by
/// the store on insert.
pub struct CredentialRow<'a> {
    pub owner: &'a Owner,
    pub site_label: &'a str,
    pub site_url: Option<&'a str>,
    pub login_name: &'a str,
    pub secret_at_rest: &'a str,
    pub category: &'a str,
    pub notes: Option<&'a str>,
    pub last_used_at: Option<i64>,
    pub is_favorite: bool,
    pub strength: &'a StrengthResult,
}

impl<'a> CredentialRow<'a> {
    pub fn from_record(record: &'a CredentialRecord) -> Self {
        Self {
            owner: &record.owner,
            site_label: &record.site_label,
            site_url: record.site_url.as_deref(),
            login_name: &record.login_name,
            secret_at_rest: &record.secret_at_rest,
            category: &record.category,
            notes: record.notes.as_deref(),
            last_used_at: record.last_used_at,
            is_favorite: record.is_favorite,
            strength: &record.strength,
        }
    }

    fn issues_json(&self) -> Result<String> {
        serde_json::to_string(&self.strength.issues)
            .map_err(|e| crate::errors::PassVaultError::SerializationError(e.to_string()))
    }
}

fn credential_from_row(row: &Row<'_>) -> rusqlite::Result<CredentialRecord> {
    let level_str: String = row.get(11)?;
    let level: StrengthLevel = level_str
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e)))?;

    let issues_json: String = row.get(12)?;
    let issues: Vec<String> = serde_json::from_str(&issues_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(12, Type::Text, Box::new(e)))?;

    let owner: String = row.get(1)?;
    let category: Option<String> = row.get(6)?;
    let is_favorite: Option<bool> = row.get(9)?;

    Ok(CredentialRecord {
        id: row.get(0)?,
        owner: Owner::new(owner),
        site_label: row.get(2)?,
        site_url: row.get(3)?,
        login_name: row.get(4)?,
        secret_at_rest: row.get(5)?,
        category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        notes: row.get(7)?,
        last_used_at: row.get(8)?,
        is_favorite: is_favorite.unwrap_or(false),
        strength: StrengthResult {
            score: row.get(10)?,
            level,
            issues,
        },
    })
}

/// Insert a credential and return its new id.
pub fn insert_credential(conn: &Connection, row: &CredentialRow<'_>) -> Result<i64> {
    let issues = row.issues_json()?;
    conn.execute(
        "INSERT INTO credentials (owner, site_label, site_url, login_name, secret_at_rest,
                                  category, notes, last_used_at, is_favorite,
                                  strength_score, strength_level, strength_issues)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            row.owner.as_str(),
            row.site_label,
            row.site_url,
            row.login_name,
            row.secret_at_rest,
            row.category,
            row.notes,
            row.last_used_at,
            row.is_favorite,
            row.strength.score,
            row.strength.level.as_str(),
            issues,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a credential by id regardless of owner.
pub fn get_credential(conn: &Connection, id: i64) -> Result<Option<CredentialRecord>> {
    let sql = format!("SELECT {CREDENTIAL_COLUMNS} FROM credentials WHERE id = ?1");
    let record = conn
        .query_row(&sql, params![id], credential_from_row)
        .optional()?;
    Ok(record)
}

/// Overwrite every mutable column of credential `id`. The owner column is
/// never touched.
pub fn patch_credential(conn: &Connection, id: i64, row: &CredentialRow<'_>) -> Result<()> {
    let issues = row.issues_json()?;
    conn.execute(
        "UPDATE credentials
         SET site_label = ?2, site_url = ?3, login_name = ?4, secret_at_rest = ?5,
             category = ?6, notes = ?7, last_used_at = ?8, is_favorite = ?9,
             strength_score = ?10, strength_level = ?11, strength_issues = ?12
         WHERE id = ?1",
        params![
            id,
            row.site_label,
            row.site_url,
            row.login_name,
            row.secret_at_rest,
            row.category,
            row.notes,
            row.last_used_at,
            row.is_favorite,
            row.strength.score,
            row.strength.level.as_str(),
            issues,
        ],
    )?;
    Ok(())
}

pub fn delete_credential(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM credentials WHERE id = ?1", params![id])?;
    Ok(())
}

/// Every credential of `owner`, optionally restricted to one category.
pub fn credentials_for_owner(
    conn: &Connection,
    owner: &Owner,
    category: Option<&str>,
) -> Result<Vec<CredentialRecord>> {
    let sql = format!(
        "SELECT {CREDENTIAL_COLUMNS} FROM credentials
         WHERE owner = ?1 AND (?2 IS NULL OR COALESCE(category, ?3) = ?2)
         ORDER BY id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![owner.as_str(), category, DEFAULT_CATEGORY],
        credential_from_row,
    )?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// Credentials of `owner` whose site label contains `term`
/// (ASCII case-insensitive), optionally restricted to one category.
pub fn search_credentials(
    conn: &Connection,
    owner: &Owner,
    term: &str,
    category: Option<&str>,
) -> Result<Vec<CredentialRecord>> {
    let pattern = format!("%{}%", escape_like(term));
    let sql = format!(
        "SELECT {CREDENTIAL_COLUMNS} FROM credentials
         WHERE owner = ?1 AND site_label LIKE ?2 ESCAPE '\\'
           AND (?3 IS NULL OR COALESCE(category, ?4) = ?3)
         ORDER BY id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![owner.as_str(), pattern, category, DEFAULT_CATEGORY],
        credential_from_row,
    )?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn insight_from_row(row: &Row<'_>) -> rusqlite::Result<InsightRecord> {
    let owner: String = row.get(0)?;
    Ok(InsightRecord {
        owner: Owner::new(owner),
        total_count: row.get(1)?,
        weak_count: row.get(2)?,
        duplicate_count: row.get(3)?,
        stale_count: row.get(4)?,
        average_score: row.get(5)?,
        last_updated_at: row.get(6)?,
    })
}

pub fn get_insight(conn: &Connection, owner: &Owner) -> Result<Option<InsightRecord>> {
    let record = conn
        .query_row(
            "SELECT owner, total_count, weak_count, duplicate_count, stale_count,
                    average_score, last_updated_at
             FROM insights WHERE owner = ?1",
            params![owner.as_str()],
            insight_from_row,
        )
        .optional()?;
    Ok(record)
}

pub fn insert_insight(conn: &Connection, insight: &InsightRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO insights (owner, total_count, weak_count, duplicate_count,
                               stale_count, average_score, last_updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            insight.owner.as_str(),
            insight.total_count,
            insight.weak_count,
            insight.duplicate_count,
            insight.stale_count,
            insight.average_score,
            insight.last_updated_at,
        ],
    )?;
    Ok(())
}

/// Overwrite every field of the owner's insight row.
pub fn patch_insight(conn: &Connection, insight: &InsightRecord) -> Result<()> {
    conn.execute(
        "UPDATE insights
         SET total_count = ?2, weak_count = ?3, duplicate_count = ?4,
             stale_count = ?5, average_score = ?6, last_updated_at = ?7
         WHERE owner = ?1",
        params![
            insight.owner.as_str(),
            insight.total_count,
            insight.weak_count,
            insight.duplicate_count,
            insight.stale_count,
            insight.average_score,
            insight.last_updated_at,
        ],
    )?;
    Ok(())
}
