//! Class timetables - per-user weekly entries, keyed by user id

use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::model::{ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::new_id;
use crate::session;
use crate::store::{Store, TIMETABLES_KEY};

pub const COLLECTION: &str = "timetables";

const TIME_FMT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub id: String,
    pub course_name: String,
    pub day: DayOfWeek,
    /// `HH:MM`, 24-hour
    pub start_time: String,
    pub end_time: String,
    pub location: String,
}

/// All timetables, keyed by user id
pub type TimetableBook = BTreeMap<String, Vec<TimetableEntry>>;

fn load_book(store: &Store) -> TimetableBook {
    store.load(TIMETABLES_KEY).unwrap_or_default()
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FMT)
        .with_context(|| format!("Invalid time '{}', expected HH:MM", value))
}

/// Entries for one user, in insertion order
pub fn entries_for(store: &Store, user_id: &str) -> Vec<TimetableEntry> {
    load_book(store).remove(user_id).unwrap_or_default()
}

/// Add an entry to one user's timetable
pub fn add_entry(
    store: &Store,
    user_id: &str,
    course_name: &str,
    day: DayOfWeek,
    start_time: &str,
    end_time: &str,
    location: &str,
) -> Result<TimetableEntry> {
    let start = parse_time(start_time)?;
    let end = parse_time(end_time)?;
    if end <= start {
        bail!("End time {} is not after start time {}", end_time, start_time);
    }

    let entry = TimetableEntry {
        id: new_id("tt"),
        course_name: course_name.to_string(),
        day,
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        location: location.to_string(),
    };

    let mut book = load_book(store);
    book.entry(user_id.to_string()).or_default().push(entry.clone());
    store.save(TIMETABLES_KEY, &book)?;

    Ok(entry)
}

/// Remove an entry from one user's timetable
pub fn remove_entry(store: &Store, user_id: &str, entry_id: &str) -> Result<()> {
    let mut book = load_book(store);
    let Some(entries) = book.get_mut(user_id) else {
        bail!("No timetable entry with id '{}'", entry_id);
    };
    let before = entries.len();
    entries.retain(|e| e.id != entry_id);
    if entries.len() == before {
        bail!("No timetable entry with id '{}'", entry_id);
    }
    store.save(TIMETABLES_KEY, &book)?;
    Ok(())
}

fn to_item(entry: &TimetableEntry) -> Result<ResultItem> {
    Ok(ResultItem::record(COLLECTION, &entry.id).with_data(serde_json::to_value(entry)?))
}

pub fn run_list(store: &Store, config: RenderConfig) -> Result<()> {
    let user = session::require(store)?;

    let mut result_set = ResultSet::new();
    for entry in entries_for(store, &user.user_id) {
        result_set.push(to_item(&entry)?);
    }

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_add(
    store: &Store,
    course_name: &str,
    day: DayOfWeek,
    start_time: &str,
    end_time: &str,
    location: &str,
    config: RenderConfig,
) -> Result<()> {
    let user = session::require(store)?;
    let entry = add_entry(
        store,
        &user.user_id,
        course_name,
        day,
        start_time,
        end_time,
        location,
    )?;

    let mut result_set = ResultSet::new();
    result_set.push(to_item(&entry)?);

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_remove(store: &Store, entry_id: &str, config: RenderConfig) -> Result<()> {
    let user = session::require(store)?;
    remove_entry(store, &user.user_id, entry_id)?;

    let mut result_set = ResultSet::new();
    result_set.push(ResultItem::record(COLLECTION, entry_id).with_text("removed"));

    Renderer::with_config(config).print(&result_set);

    Ok(())
}
