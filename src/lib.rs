pub mod cli;
pub mod config;
pub mod errors;
pub mod generator;
pub mod insight;
pub mod logging;
pub mod strength;
pub mod vault;
