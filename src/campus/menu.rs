//! Mess menus - one menu per calendar day, keyed by `YYYY-MM-DD`

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::store::{Store, MESS_MENUS_KEY};

pub const COLLECTION: &str = "mess_menus";

/// Date key format used throughout the menu book
const DATE_KEY_FMT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessMenu {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
}

/// All menus, keyed by date key
pub type MenuBook = BTreeMap<String, MessMenu>;

fn load_menus(store: &Store) -> MenuBook {
    store.load(MESS_MENUS_KEY).unwrap_or_default()
}

fn parse_date_key(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_KEY_FMT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))
}

/// Look up the menu for one date key
pub fn menu_for(store: &Store, date: &str) -> Option<MessMenu> {
    load_menus(store).remove(date)
}

/// Set (or replace) the menu for one date key. Last write wins.
pub fn set_menu(
    store: &Store,
    date: &str,
    breakfast: Vec<String>,
    lunch: Vec<String>,
    dinner: Vec<String>,
) -> Result<MessMenu> {
    let day = parse_date_key(date)?;
    let menu = MessMenu {
        date: day.and_time(NaiveTime::MIN).and_utc(),
        breakfast,
        lunch,
        dinner,
    };

    let mut menus = load_menus(store);
    menus.insert(date.to_string(), menu.clone());
    store.save(MESS_MENUS_KEY, &menus)?;

    Ok(menu)
}

pub fn run_show(store: &Store, date: &str, config: RenderConfig) -> Result<()> {
    parse_date_key(date)?;

    let mut result_set = ResultSet::new();
    if let Some(menu) = menu_for(store, date) {
        result_set.push(
            ResultItem::record(COLLECTION, date)
                .with_data(serde_json::to_value(&menu)?)
                .with_meta(Meta {
                    created_ms: Some(menu.date.timestamp_millis()),
                    count: None,
                }),
        );
    }

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_set(
    store: &Store,
    date: &str,
    breakfast: Vec<String>,
    lunch: Vec<String>,
    dinner: Vec<String>,
    config: RenderConfig,
) -> Result<()> {
    let menu = set_menu(store, date, breakfast, lunch, dinner)?;

    let mut result_set = ResultSet::new();
    result_set.push(ResultItem::record(COLLECTION, date).with_data(serde_json::to_value(&menu)?));

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn meals(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_set_and_get_menu() {
        let temp = tempdir().unwrap();
        let store = Store::open(temp.path()).unwrap();

        set_menu(
            &store,
            "2025-10-05",
            meals(&["idli", "chutney"]),
            meals(&["rice", "dal"]),
            meals(&["roti", "paneer"]),
        )
        .unwrap();

        let menu = menu_for(&store, "2025-10-05").unwrap();
        assert_eq!(menu.breakfast, vec!["idli", "chutney"]);
        assert_eq!(menu.date.format("%Y-%m-%d").to_string(), "2025-10-05");
    }

    #[test]
    fn test_set_menu_replaces_whole_day() {
        let temp = tempdir().unwrap();
        let store = Store::open(temp.path()).unwrap();

        set_menu(&store, "2025-10-05", meals(&["idli"]), vec![], vec![]).unwrap();
        set_menu(&store, "2025-10-05", meals(&["poha"]), vec![], vec![]).unwrap();

        let menu = menu_for(&store, "2025-10-05").unwrap();
        assert_eq!(menu.breakfast, vec!["poha"]);
    }

    #[test]
    fn test_menus_independent_per_date() {
        let temp = tempdir().unwrap();
        let store = Store::open(temp.path()).unwrap();

        set_menu(&store, "2025-10-05", meals(&["idli"]), vec![], vec![]).unwrap();
        set_menu(&store, "2025-10-06", meals(&["poha"]), vec![], vec![]).unwrap();

        assert_eq!(menu_for(&store, "2025-10-05").unwrap().breakfast, vec!["idli"]);
        assert_eq!(menu_for(&store, "2025-10-06").unwrap().breakfast, vec!["poha"]);
        assert!(menu_for(&store, "2025-10-07").is_none());
    }

    #[test]
    fn test_invalid_date_rejected() {
        let temp = tempdir().unwrap();
        let store = Store::open(temp.path()).unwrap();

        let err = set_menu(&store, "05/10/2025", vec![], vec![], vec![]).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }
}
