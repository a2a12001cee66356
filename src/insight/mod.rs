//! Per-owner security insights.
//!
//! An `InsightRecord` is derived state: after every credential mutation
//! it is recomputed from the owner's full credential set and upserted.
//! `compute` is the pure rollup; `recompute` wraps it with the
//! fetch-all / upsert protocol against the store.

use std::collections::HashSet;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::errors::Result;
use crate::strength::StrengthLevel;
use crate::vault::credential::{sort_views, CredentialRecord, CredentialView, SortOrder};
use crate::vault::identity::Owner;
use crate::vault::records;

/// Records scoring below this count as weak in the rollup. Note this is
/// stricter than the `weak` level boundary (40).
pub const WEAK_SCORE_THRESHOLD: u8 = 60;

/// A credential not used for this long is stale.
pub const STALE_AFTER_MS: i64 = 90 * 24 * 60 * 60 * 1000;

/// How many recent/favorite credentials the dashboard shows.
pub const DASHBOARD_PREVIEW: usize = 4;

/// Rollup statistics for one owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub owner: Owner,
    pub total_count: u32,
    pub weak_count: u32,
    pub duplicate_count: u32,
    pub stale_count: u32,
    /// Mean strength score, `0.0` when there are no credentials.
    pub average_score: f64,
    /// Epoch milliseconds.
    pub last_updated_at: i64,
}

impl InsightRecord {
    /// The rollup of an empty credential set.
    pub fn empty(owner: Owner, now: i64) -> Self {
        Self {
            owner,
            total_count: 0,
            weak_count: 0,
            duplicate_count: 0,
            stale_count: 0,
            average_score: 0.0,
            last_updated_at: now,
        }
    }

    /// Average score rounded to a whole number, as shown to users.
    pub fn security_score(&self) -> u8 {
        self.average_score.round().clamp(0.0, 100.0) as u8
    }
}

/// Build the rollup for `owner` from its full credential set.
///
/// Every secret is decoded to detect duplicates, so a single corrupt
/// record fails the whole computation.
pub fn compute(owner: &Owner, records: &[CredentialRecord], now: i64) -> Result<InsightRecord> {
    let total = records.len();
    if total == 0 {
        return Ok(InsightRecord::empty(owner.clone(), now));
    }

    let weak = records
        .iter()
        .filter(|r| r.strength.score < WEAK_SCORE_THRESHOLD)
        .count();

    let decoded: Vec<Zeroizing<String>> = records
        .iter()
        .map(CredentialRecord::decode_secret)
        .collect::<Result<_>>()?;
    let distinct: HashSet<&str> = decoded.iter().map(|s| s.as_str()).collect();
    let duplicates = total - distinct.len();

    let cutoff = now - STALE_AFTER_MS;
    let stale = records
        .iter()
        .filter(|r| r.last_used_or_epoch() < cutoff)
        .count();

    let score_sum: u64 = records.iter().map(|r| u64::from(r.strength.score)).sum();
    let average_score = score_sum as f64 / total as f64;

    Ok(InsightRecord {
        owner: owner.clone(),
        total_count: count(total),
        weak_count: count(weak),
        duplicate_count: count(duplicates),
        stale_count: count(stale),
        average_score,
        last_updated_at: now,
    })
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Recompute and upsert the insight record for `owner`.
///
/// Reads every credential of the owner on `conn`, derives the rollup and
/// overwrites (or creates) the single insight row. Run it on the same
/// transaction as the mutation that triggered it.
pub fn recompute(conn: &Connection, owner: &Owner, now: i64) -> Result<InsightRecord> {
    let credentials = records::credentials_for_owner(conn, owner, None)?;
    let insight = compute(owner, &credentials, now)?;

    match records::get_insight(conn, owner)? {
        Some(_) => records::patch_insight(conn, &insight)?,
        None => records::insert_insight(conn, &insight)?,
    }

    tracing::debug!(
        owner = %owner,
        total = insight.total_count,
        weak = insight.weak_count,
        duplicates = insight.duplicate_count,
        stale = insight.stale_count,
        "insights recomputed"
    );

    Ok(insight)
}

/// Number of credentials per strength level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDistribution {
    pub strong: u32,
    pub good: u32,
    pub fair: u32,
    pub weak: u32,
}

impl LevelDistribution {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a CredentialRecord>) -> Self {
        let mut dist = Self::default();
        for r in records {
            match StrengthLevel::from_score(r.strength.score) {
                StrengthLevel::Strong => dist.strong += 1,
                StrengthLevel::Good => dist.good += 1,
                StrengthLevel::Fair => dist.fair += 1,
                StrengthLevel::Weak => dist.weak += 1,
            }
        }
        dist
    }
}

/// Everything the dashboard shows for one owner.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub insight: Option<InsightRecord>,
    pub recent: Vec<CredentialView>,
    pub favorites: Vec<CredentialView>,
    pub distribution: LevelDistribution,
}

impl Dashboard {
    /// Assemble the dashboard from the stored insight and all credentials.
    pub fn build(insight: Option<InsightRecord>, mut views: Vec<CredentialView>) -> Self {
        let distribution = LevelDistribution::from_records(views.iter().map(|v| &v.record));

        sort_views(&mut views, SortOrder::Recent);
        let favorites = views
            .iter()
            .filter(|v| v.record.is_favorite)
            .take(DASHBOARD_PREVIEW)
            .cloned()
            .collect();
        views.truncate(DASHBOARD_PREVIEW);

        Self {
            insight,
            recent: views,
            favorites,
            distribution,
        }
    }

    pub fn security_score(&self) -> u8 {
        self.insight
            .as_ref()
            .map_or(0, InsightRecord::security_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strength::analyze;
    use crate::vault::credential::DEFAULT_CATEGORY;
    use crate::vault::encoding::encode_secret;

    const NOW: i64 = 1_700_000_000_000;
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn record(id: i64, secret: &str, last_used_at: Option<i64>) -> CredentialRecord {
        CredentialRecord {
            id,
            owner: Owner::new("alice"),
            site_label: format!("site-{id}"),
            site_url: None,
            login_name: "alice".into(),
            secret_at_rest: encode_secret(secret),
            category: DEFAULT_CATEGORY.into(),
            notes: None,
            last_used_at,
            is_favorite: false,
            strength: analyze(secret),
        }
    }

    #[test]
    fn empty_set_is_all_zero() {
        let owner = Owner::new("alice");
        let insight = compute(&owner, &[], NOW).unwrap();
        assert_eq!(insight, InsightRecord::empty(owner, NOW));
        assert_eq!(insight.average_score, 0.0);
        assert!(!insight.average_score.is_nan());
    }

    #[test]
    fn duplicates_count_extra_copies() {
        let records = vec![
            record(1, "abc", Some(NOW)),
            record(2, "abc", Some(NOW)),
            record(3, "xyz", Some(NOW)),
        ];
        let insight = compute(&Owner::new("alice"), &records, NOW).unwrap();
        assert_eq!(insight.total_count, 3);
        assert_eq!(insight.duplicate_count, 1);
    }

    #[test]
    fn triple_copy_counts_two_duplicates() {
        let records = vec![
            record(1, "same", Some(NOW)),
            record(2, "same", Some(NOW)),
            record(3, "same", Some(NOW)),
        ];
        let insight = compute(&Owner::new("alice"), &records, NOW).unwrap();
        assert_eq!(insight.duplicate_count, 2);
    }

    #[test]
    fn staleness_boundary_is_ninety_days() {
        let records = vec![
            record(1, "a", Some(NOW - 91 * DAY_MS)),
            record(2, "b", Some(NOW - 89 * DAY_MS)),
            record(3, "c", Some(NOW - 90 * DAY_MS)),
        ];
        let insight = compute(&Owner::new("alice"), &records, NOW).unwrap();
        // Exactly 90 days is not older than the cutoff.
        assert_eq!(insight.stale_count, 1);
    }

    #[test]
    fn missing_last_used_is_stale() {
        let records = vec![record(1, "a", None)];
        let insight = compute(&Owner::new("alice"), &records, NOW).unwrap();
        assert_eq!(insight.stale_count, 1);
    }

    #[test]
    fn weak_count_uses_sixty_not_level() {
        // "Ab1!Cd2@" = 90, "aaa" = 20 (weak), "hunter2" = 50 (fair).
        let records = vec![
            record(1, "Ab1!Cd2@", Some(NOW)),
            record(2, "aaa", Some(NOW)),
            record(3, "hunter2", Some(NOW)),
        ];
        assert_eq!(records[2].strength.level, StrengthLevel::Fair);

        let insight = compute(&Owner::new("alice"), &records, NOW).unwrap();
        assert_eq!(insight.weak_count, 2);
    }

    #[test]
    fn average_is_arithmetic_mean() {
        let records = vec![
            record(1, "Correct-Horse7", Some(NOW)),
            record(2, "Ab1!Cd2@", Some(NOW)),
        ];
        let insight = compute(&Owner::new("alice"), &records, NOW).unwrap();
        assert_eq!(insight.average_score, 95.0);
        assert_eq!(insight.security_score(), 95);
        assert_eq!(insight.last_updated_at, NOW);
    }

    #[test]
    fn corrupt_secret_fails_compute() {
        let mut bad = record(9, "x", Some(NOW));
        bad.secret_at_rest = "***".into();
        assert!(compute(&Owner::new("alice"), &[bad], NOW).is_err());
    }

    #[test]
    fn distribution_buckets_by_level() {
        let records = vec![
            record(1, "Correct-Horse7", None),
            record(2, "aaa", None),
            record(3, "hunter2", None),
            record(4, "", None),
        ];
        let dist = LevelDistribution::from_records(&records);
        assert_eq!(
            dist,
            LevelDistribution {
                strong: 1,
                good: 0,
                fair: 1,
                weak: 2,
            }
        );
    }

    #[test]
    fn dashboard_limits_previews() {
        let views: Vec<CredentialView> = (1..=6)
            .map(|i| {
                let mut r = record(i, "pw", Some(NOW - i));
                r.is_favorite = i % 2 == 0;
                CredentialView::from_record(r).unwrap()
            })
            .collect();

        let dash = Dashboard::build(None, views);
        let recent: Vec<i64> = dash.recent.iter().map(|v| v.record.id).collect();
        let favs: Vec<i64> = dash.favorites.iter().map(|v| v.record.id).collect();
        assert_eq!(recent, vec![1, 2, 3, 4]);
        assert_eq!(favs, vec![2, 4, 6]);
        assert_eq!(dash.security_score(), 0);
    }
}
