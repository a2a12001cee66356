//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::{DateTime, Utc};
use comfy_table::{ContentArrangement, Table};
use console::{style, StyledObject};

use crate::insight::{Dashboard, InsightRecord, LevelDistribution};
use crate::strength::{StrengthLevel, StrengthResult};
use crate::vault::CredentialView;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Style a level with its traffic-light color.
pub fn styled_level(level: StrengthLevel) -> StyledObject<&'static str> {
    let s = style(level.as_str()).bold();
    match level {
        StrengthLevel::Strong => s.green(),
        StrengthLevel::Good => s.cyan(),
        StrengthLevel::Fair => s.yellow(),
        StrengthLevel::Weak => s.red(),
    }
}

/// Format an epoch-millisecond timestamp for display.
pub fn format_millis(ms: Option<i64>) -> String {
    ms.and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or_else(|| "never".to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

/// Print a strength result: score, level, and any issues.
pub fn print_strength(result: &StrengthResult) {
    println!(
        "Strength: {}/100 ({})",
        style(result.score).bold(),
        styled_level(result.level)
    );
    for issue in &result.issues {
        println!("  {} {}", style("\u{2022}").yellow(), issue);
    }
}

/// Print a table of credentials (id, site, login, category, strength, last used).
pub fn print_credentials_table(views: &[CredentialView], show_passwords: bool) {
    if views.is_empty() {
        info("No credentials found.");
        tip("Run `passvault add <SITE> --login <NAME>` to store your first one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["ID", "Site", "Login", "Category", "Strength", "Last used", "\u{2605}"];
    if show_passwords {
        header.push("Password");
    }
    table.set_header(header);

    for v in views {
        let r = &v.record;
        let mut row = vec![
            r.id.to_string(),
            r.site_label.clone(),
            r.login_name.clone(),
            r.category.clone(),
            format!("{} ({})", r.strength.score, r.strength.level),
            format_millis(r.last_used_at),
            if r.is_favorite { "\u{2605}".into() } else { String::new() },
        ];
        if show_passwords {
            row.push(v.secret.as_str().to_string());
        }
        table.add_row(row);
    }

    println!("{table}");
}

/// Print every field of one credential.
pub fn print_credential_detail(view: &CredentialView, show_password: bool) {
    let r = &view.record;
    println!("{} {}", style(&r.site_label).bold(), style(format!("#{}", r.id)).dim());
    if let Some(ref url) = r.site_url {
        println!("  URL:       {url}");
    }
    println!("  Login:     {}", r.login_name);
    if show_password {
        println!("  Password:  {}", view.secret.as_str());
    } else {
        println!("  Password:  {}", style("********").dim());
    }
    println!("  Category:  {}", r.category);
    println!("  Favorite:  {}", if r.is_favorite { "yes" } else { "no" });
    println!("  Last used: {}", format_millis(r.last_used_at));
    if let Some(ref notes) = r.notes {
        println!("  Notes:     {notes}");
    }
    print_strength(&r.strength);
}

/// Print the insight counters.
pub fn print_insights(insight: &InsightRecord) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Total passwords".to_string(), insight.total_count.to_string()]);
    table.add_row(vec!["Weak (score < 60)".to_string(), insight.weak_count.to_string()]);
    table.add_row(vec!["Duplicates".to_string(), insight.duplicate_count.to_string()]);
    table.add_row(vec!["Older than 90 days".to_string(), insight.stale_count.to_string()]);
    table.add_row(vec![
        "Average strength".to_string(),
        format!("{:.1}", insight.average_score),
    ]);
    table.add_row(vec![
        "Last updated".to_string(),
        format_millis(Some(insight.last_updated_at)),
    ]);
    println!("{table}");
}

fn print_distribution(dist: &LevelDistribution) {
    println!(
        "  {} strong   {} good   {} fair   {} weak",
        style(dist.strong).green().bold(),
        style(dist.good).cyan().bold(),
        style(dist.fair).yellow().bold(),
        style(dist.weak).red().bold(),
    );
}

/// Print the dashboard: score, counters, distribution, recent, favorites.
pub fn print_dashboard(dash: &Dashboard) {
    let score = dash.security_score();
    println!(
        "Security score: {}/100 ({})",
        style(score).bold(),
        styled_level(StrengthLevel::from_score(score))
    );

    match dash.insight {
        Some(ref insight) => print_insights(insight),
        None => {
            info("No insights yet.");
            tip("Insights are computed after your first add, update or delete.");
            return;
        }
    }

    println!("\nStrength breakdown:");
    print_distribution(&dash.distribution);

    println!("\nRecently used:");
    print_credentials_table(&dash.recent, false);

    if !dash.favorites.is_empty() {
        println!("\nFavorites:");
        print_credentials_table(&dash.favorites, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_millis_handles_missing() {
        assert_eq!(format_millis(None), "never");
    }

    #[test]
    fn format_millis_formats_utc() {
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_millis(Some(1_700_000_000_000)), "2023-11-14 22:13");
    }
}
