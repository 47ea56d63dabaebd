//! campus - a local-first campus super-app for the terminal
//!
//! campus provides:
//! - An email action-item extractor (summarize)
//! - Mock login with an opaque per-name user id
//! - Mess menus, lost & found, marketplace, travel trips, places, timetables
//! - Unified output format (jsonl/json/md/raw) over a local JSON store

use anyhow::Result;
use clap::Parser;

mod campus;
mod cli;
mod core;
mod session;
mod store;
mod summarize;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
