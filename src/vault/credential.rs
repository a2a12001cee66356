//! Credential records and the inputs used to create or change them.
//!
//! A `CredentialRecord` is what the store holds: the secret only in its
//! encoded at-rest form plus the strength result computed when the secret
//! was last set. `CredentialView` is what callers get back — the record
//! together with its decoded secret.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::errors::{PassVaultError, Result};
use crate::strength::StrengthResult;

use super::encoding;
use super::identity::Owner;

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "General";

/// Pseudo-category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Categories offered by the CLI.
pub const CATEGORIES: [&str; 6] = [
    "General",
    "Social Media",
    "Banking",
    "Work",
    "Shopping",
    "Entertainment",
];

/// One stored credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: i64,
    pub owner: Owner,
    pub site_label: String,
    pub site_url: Option<String>,
    pub login_name: String,
    /// Encoded secret. See `vault::encoding`.
    pub secret_at_rest: String,
    pub category: String,
    pub notes: Option<String>,
    /// Epoch milliseconds of the last create/update, if ever recorded.
    pub last_used_at: Option<i64>,
    pub is_favorite: bool,
    pub strength: StrengthResult,
}

impl CredentialRecord {
    /// Decode the stored secret.
    pub fn decode_secret(&self) -> Result<Zeroizing<String>> {
        encoding::decode_secret(&self.secret_at_rest)
            .map_err(|e| PassVaultError::CorruptRecord(self.id, e))
    }

    /// `last_used_at`, with a missing value read as the epoch.
    pub fn last_used_or_epoch(&self) -> i64 {
        self.last_used_at.unwrap_or(0)
    }
}

/// Input for `PasswordVault::add_credential`.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub site_label: String,
    pub site_url: Option<String>,
    pub login_name: String,
    pub secret: Zeroizing<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for `PasswordVault::update_credential`.
///
/// Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct CredentialUpdate {
    pub site_label: Option<String>,
    pub site_url: Option<String>,
    pub login_name: Option<String>,
    pub secret: Option<Zeroizing<String>>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub is_favorite: Option<bool>,
}

impl CredentialUpdate {
    pub fn is_empty(&self) -> bool {
        self.site_label.is_none()
            && self.site_url.is_none()
            && self.login_name.is_none()
            && self.secret.is_none()
            && self.category.is_none()
            && self.notes.is_none()
            && self.is_favorite.is_none()
    }
}

/// A record together with its decoded secret.
#[derive(Debug, Clone)]
pub struct CredentialView {
    pub record: CredentialRecord,
    pub secret: Zeroizing<String>,
}

impl CredentialView {
    pub fn from_record(record: CredentialRecord) -> Result<Self> {
        let secret = record.decode_secret()?;
        Ok(Self { record, secret })
    }
}

/// Ordering for `PasswordVault::list_credentials`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Most recently used first
    #[default]
    Recent,
    /// Site name, A to Z
    Name,
    /// Strongest first
    Strength,
    /// Favorites first, then most recently used
    Favorites,
}

/// Filters and ordering for a listing.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Exact category match; `None` or `"All"` disables the filter.
    pub category: Option<String>,
    /// Case-insensitive substring of the site label.
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl ListQuery {
    /// The category filter to apply, if any.
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    /// The search term to apply, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Sort views in place according to `order`.
pub fn sort_views(views: &mut [CredentialView], order: SortOrder) {
    let recent = |v: &CredentialView| std::cmp::Reverse(v.record.last_used_or_epoch());
    match order {
        SortOrder::Recent => views.sort_by_key(recent),
        SortOrder::Name => views.sort_by(|a, b| {
            a.record
                .site_label
                .to_lowercase()
                .cmp(&b.record.site_label.to_lowercase())
        }),
        SortOrder::Strength => {
            views.sort_by_key(|v| std::cmp::Reverse(v.record.strength.score));
        }
        SortOrder::Favorites => {
            views.sort_by_key(|v| (!v.record.is_favorite, recent(v)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strength::analyze;
    use crate::vault::encoding::encode_secret;

    fn view(id: i64, label: &str, secret: &str, last_used: Option<i64>, fav: bool) -> CredentialView {
        let record = CredentialRecord {
            id,
            owner: Owner::new("alice"),
            site_label: label.to_string(),
            site_url: None,
            login_name: "alice".to_string(),
            secret_at_rest: encode_secret(secret),
            category: DEFAULT_CATEGORY.to_string(),
            notes: None,
            last_used_at: last_used,
            is_favorite: fav,
            strength: analyze(secret),
        };
        CredentialView::from_record(record).unwrap()
    }

    fn ids(views: &[CredentialView]) -> Vec<i64> {
        views.iter().map(|v| v.record.id).collect()
    }

    #[test]
    fn view_decodes_secret() {
        let v = view(1, "GitHub", "s3cret!", Some(1), false);
        assert_eq!(v.secret.as_str(), "s3cret!");
    }

    #[test]
    fn corrupt_secret_is_reported_with_id() {
        let mut v = view(7, "x", "y", None, false);
        v.record.secret_at_rest = "%%%".into();
        let err = v.record.decode_secret().unwrap_err();
        assert!(matches!(err, PassVaultError::CorruptRecord(7, _)));
    }

    #[test]
    fn recent_sort_treats_missing_as_oldest() {
        let mut views = vec![
            view(1, "a", "x", None, false),
            view(2, "b", "x", Some(50), false),
            view(3, "c", "x", Some(100), false),
        ];
        sort_views(&mut views, SortOrder::Recent);
        assert_eq!(ids(&views), vec![3, 2, 1]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut views = vec![
            view(1, "zeta", "x", None, false),
            view(2, "Alpha", "x", None, false),
            view(3, "beta", "x", None, false),
        ];
        sort_views(&mut views, SortOrder::Name);
        assert_eq!(ids(&views), vec![2, 3, 1]);
    }

    #[test]
    fn strength_sort_is_descending() {
        let mut views = vec![
            view(1, "a", "abc", None, false),
            view(2, "b", "Correct-Horse7", None, false),
            view(3, "c", "Ab1!Cd2@", None, false),
        ];
        sort_views(&mut views, SortOrder::Strength);
        assert_eq!(ids(&views), vec![2, 3, 1]);
    }

    #[test]
    fn favorites_first_then_recent() {
        let mut views = vec![
            view(1, "a", "x", Some(300), false),
            view(2, "b", "x", Some(100), true),
            view(3, "c", "x", Some(200), true),
        ];
        sort_views(&mut views, SortOrder::Favorites);
        assert_eq!(ids(&views), vec![3, 2, 1]);
    }

    #[test]
    fn all_category_disables_filter() {
        let q = ListQuery {
            category: Some(ALL_CATEGORIES.into()),
            ..ListQuery::default()
        };
        assert!(q.category_filter().is_none());

        let q = ListQuery {
            category: Some("Work".into()),
            ..ListQuery::default()
        };
        assert_eq!(q.category_filter(), Some("Work"));
    }

    #[test]
    fn blank_search_is_ignored() {
        let q = ListQuery {
            search: Some("   ".into()),
            ..ListQuery::default()
        };
        assert!(q.search_term().is_none());
    }
}
