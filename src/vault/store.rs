//! High-level credential operations used by CLI commands.
//!
//! `PasswordVault` owns the SQLite connection and runs every mutation as
//! one immediate transaction: ownership check, strength analysis, row
//! write and insight recompute either all commit or all roll back.

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, TransactionBehavior};

use crate::errors::{PassVaultError, Result};
use crate::insight::{self, Dashboard, InsightRecord};
use crate::strength::analyze;

use super::credential::{
    sort_views, CredentialRecord, CredentialUpdate, CredentialView, ListQuery, NewCredential,
    DEFAULT_CATEGORY,
};
use super::encoding::encode_secret;
use super::identity::Owner;
use super::records::{self, CredentialRow};
use super::schema;

/// Source of "now" in epoch milliseconds.
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    Utc::now().timestamp_millis()
}

/// The main vault handle. Open one with `PasswordVault::open`, then call
/// its methods with the resolved owner.
pub struct PasswordVault {
    conn: Connection,
    clock: Clock,
}

impl PasswordVault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open (or create) the vault database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = schema::open(path)?;
        tracing::debug!(path = %path.display(), "opened credential store");
        Ok(Self::from_connection(conn))
    }

    /// A throwaway vault backed by an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(schema::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            clock: system_clock,
        }
    }

    /// Replace the clock used for `last_used_at` and insight timestamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> i64 {
        (self.clock)()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Store a new credential and return its id.
    pub fn add_credential(&mut self, owner: &Owner, new: &NewCredential) -> Result<i64> {
        let now = self.now();
        let strength = analyze(&new.secret);
        let token = encode_secret(&new.secret);
        let category = new
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = records::insert_credential(
            &tx,
            &CredentialRow {
                owner,
                site_label: &new.site_label,
                site_url: new.site_url.as_deref(),
                login_name: &new.login_name,
                secret_at_rest: &token,
                category,
                notes: new.notes.as_deref(),
                last_used_at: Some(now),
                is_favorite: false,
                strength: &strength,
            },
        )?;
        insight::recompute(&tx, owner, now)?;
        tx.commit()?;

        tracing::info!(owner = %owner, id, score = strength.score, "credential added");
        Ok(id)
    }

    /// Apply `update` to credential `id` and return the updated record.
    ///
    /// `last_used_at` is refreshed even when `update` is empty.
    pub fn update_credential(
        &mut self,
        owner: &Owner,
        id: i64,
        update: &CredentialUpdate,
    ) -> Result<CredentialRecord> {
        let record = self.patch_owned(owner, id, |_| update.clone())?;
        tracing::info!(owner = %owner, id, "credential updated");
        Ok(record)
    }

    /// Flip the favorite flag of credential `id`; returns the new state.
    pub fn toggle_favorite(&mut self, owner: &Owner, id: i64) -> Result<bool> {
        let record = self.patch_owned(owner, id, |current| CredentialUpdate {
            is_favorite: Some(!current.is_favorite),
            ..CredentialUpdate::default()
        })?;
        tracing::info!(owner = %owner, id, favorite = record.is_favorite, "favorite toggled");
        Ok(record.is_favorite)
    }

    /// Read, patch and write back one owned record on a single immediate
    /// transaction. `make_update` sees the record as stored.
    fn patch_owned<F>(&mut self, owner: &Owner, id: i64, make_update: F) -> Result<CredentialRecord>
    where
        F: FnOnce(&CredentialRecord) -> CredentialUpdate,
    {
        let now = self.now();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut record = owned_record(&tx, owner, id)?;
        let update = make_update(&record);
        apply_update(&mut record, &update, now);
        records::patch_credential(&tx, id, &CredentialRow::from_record(&record))?;
        insight::recompute(&tx, owner, now)?;
        tx.commit()?;

        Ok(record)
    }

    /// Delete credential `id`.
    pub fn delete_credential(&mut self, owner: &Owner, id: i64) -> Result<()> {
        let now = self.now();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        owned_record(&tx, owner, id)?;
        records::delete_credential(&tx, id)?;
        insight::recompute(&tx, owner, now)?;
        tx.commit()?;

        tracing::info!(owner = %owner, id, "credential deleted");
        Ok(())
    }

    /// Force a fresh insight recompute for `owner`.
    pub fn refresh_insights(&mut self, owner: &Owner) -> Result<InsightRecord> {
        let now = self.now();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let insight = insight::recompute(&tx, owner, now)?;
        tx.commit()?;
        Ok(insight)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Decoded view of one owned credential.
    pub fn get_credential(&self, owner: &Owner, id: i64) -> Result<CredentialView> {
        CredentialView::from_record(owned_record(&self.conn, owner, id)?)
    }

    /// Decoded views of the owner's credentials, filtered and sorted.
    pub fn list_credentials(&self, owner: &Owner, query: &ListQuery) -> Result<Vec<CredentialView>> {
        let category = query.category_filter();
        let found = match query.search_term() {
            Some(term) => records::search_credentials(&self.conn, owner, term, category)?,
            None => records::credentials_for_owner(&self.conn, owner, category)?,
        };

        let mut views = found
            .into_iter()
            .map(CredentialView::from_record)
            .collect::<Result<Vec<_>>>()?;
        sort_views(&mut views, query.sort);
        Ok(views)
    }

    /// The stored insight record, if the owner has ever mutated anything.
    pub fn insights(&self, owner: &Owner) -> Result<Option<InsightRecord>> {
        records::get_insight(&self.conn, owner)
    }

    pub fn dashboard(&self, owner: &Owner) -> Result<Dashboard> {
        let insight = self.insights(owner)?;
        let views = self.list_credentials(owner, &ListQuery::default())?;
        Ok(Dashboard::build(insight, views))
    }

    /// Number of credentials stored for `owner`.
    pub fn credential_count(&self, owner: &Owner) -> Result<usize> {
        Ok(records::credentials_for_owner(&self.conn, owner, None)?.len())
    }
}

/// Fetch credential `id`, insisting that it belongs to `owner`.
fn owned_record(conn: &Connection, owner: &Owner, id: i64) -> Result<CredentialRecord> {
    let record = records::get_credential(conn, id)?.ok_or(PassVaultError::NotFound(id))?;
    if &record.owner != owner {
        tracing::warn!(owner = %owner, id, "refused access to another owner's credential");
        return Err(PassVaultError::NotOwned(id));
    }
    Ok(record)
}

fn apply_update(record: &mut CredentialRecord, update: &CredentialUpdate, now: i64) {
    record.last_used_at = Some(now);

    if let Some(ref label) = update.site_label {
        record.site_label = label.clone();
    }
    if let Some(ref url) = update.site_url {
        record.site_url = Some(url.clone());
    }
    if let Some(ref login) = update.login_name {
        record.login_name = login.clone();
    }
    if let Some(ref category) = update.category {
        record.category = category.clone();
    }
    if let Some(ref notes) = update.notes {
        record.notes = Some(notes.clone());
    }
    if let Some(favorite) = update.is_favorite {
        record.is_favorite = favorite;
    }
    if let Some(ref secret) = update.secret {
        record.secret_at_rest = encode_secret(secret);
        record.strength = analyze(secret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeroize::Zeroizing;

    fn new_credential(label: &str, secret: &str) -> NewCredential {
        NewCredential {
            site_label: label.to_string(),
            site_url: None,
            login_name: "alice@example.com".to_string(),
            secret: Zeroizing::new(secret.to_string()),
            category: None,
            notes: None,
        }
    }

    fn fixed_clock() -> i64 {
        1_700_000_000_000
    }

    #[test]
    fn add_defaults_category_and_favorite() {
        let mut vault = PasswordVault::open_in_memory().unwrap().with_clock(fixed_clock);
        let owner = Owner::new("alice");
        let id = vault.add_credential(&owner, &new_credential("GitHub", "pw")).unwrap();

        let view = vault.get_credential(&owner, id).unwrap();
        assert_eq!(view.record.category, DEFAULT_CATEGORY);
        assert!(!view.record.is_favorite);
        assert_eq!(view.record.last_used_at, Some(fixed_clock()));
        assert_eq!(view.secret.as_str(), "pw");
    }

    #[test]
    fn empty_update_still_touches_last_used() {
        let mut vault = PasswordVault::open_in_memory().unwrap().with_clock(|| 1);
        let owner = Owner::new("alice");
        let id = vault.add_credential(&owner, &new_credential("a", "pw")).unwrap();

        let mut vault = vault.with_clock(|| 2);
        let updated = vault
            .update_credential(&owner, id, &CredentialUpdate::default())
            .unwrap();
        assert_eq!(updated.last_used_at, Some(2));
    }

    #[test]
    fn apply_update_only_touches_given_fields() {
        let mut vault = PasswordVault::open_in_memory().unwrap();
        let owner = Owner::new("alice");
        let mut new = new_credential("a", "pw");
        new.notes = Some("keep me".into());
        let id = vault.add_credential(&owner, &new).unwrap();

        let update = CredentialUpdate {
            login_name: Some("bob".into()),
            ..CredentialUpdate::default()
        };
        let updated = vault.update_credential(&owner, id, &update).unwrap();
        assert_eq!(updated.login_name, "bob");
        assert_eq!(updated.site_label, "a");
        assert_eq!(updated.notes.as_deref(), Some("keep me"));
        assert_eq!(updated.strength, analyze("pw"));
    }
}
