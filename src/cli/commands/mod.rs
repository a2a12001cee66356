//! One module per subcommand. Each exposes an `execute` function.

pub mod add;
pub mod analyze;
pub mod completions;
pub mod dashboard;
pub mod delete;
pub mod favorite;
pub mod generate;
pub mod insights;
pub mod list;
pub mod show;
pub mod update;
