//! Travel trips - shared rides and outings from the student exchange hub

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::new_id;
use crate::session;
use crate::store::repo::{Entity, Repository};
use crate::store::{Store, TRAVEL_TRIPS_KEY};

pub const COLLECTION: &str = "travel_trips";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelTrip {
    pub id: String,
    pub origin: String,
    pub destination: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub departs_at: DateTime<Utc>,
    /// User ids, creator first
    pub participants: Vec<String>,
}

impl Entity for TravelTrip {
    const KEY: &'static str = TRAVEL_TRIPS_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Create a trip; the creator joins automatically
pub fn add_trip(
    store: &Store,
    creator_id: &str,
    origin: &str,
    destination: &str,
    departs_at: DateTime<Utc>,
) -> Result<TravelTrip> {
    let trip = TravelTrip {
        id: new_id("trip"),
        origin: origin.to_string(),
        destination: destination.to_string(),
        departs_at,
        participants: vec![creator_id.to_string()],
    };
    Repository::new(store).insert(trip.clone())?;
    Ok(trip)
}

/// Join a trip. Joining twice is a no-op.
pub fn join_trip(store: &Store, user_id: &str, trip_id: &str) -> Result<TravelTrip> {
    let repo: Repository<TravelTrip> = Repository::new(store);
    let Some(joined) = repo.update(trip_id, |t| {
        if !t.participants.iter().any(|p| p == user_id) {
            t.participants.push(user_id.to_string());
        }
    })?
    else {
        bail!("No travel trip with id '{}'", trip_id);
    };
    Ok(joined)
}

/// Leave a trip. Leaving a trip you are not on is a no-op.
pub fn leave_trip(store: &Store, user_id: &str, trip_id: &str) -> Result<TravelTrip> {
    let repo: Repository<TravelTrip> = Repository::new(store);
    let Some(left) = repo.update(trip_id, |t| t.participants.retain(|p| p != user_id))? else {
        bail!("No travel trip with id '{}'", trip_id);
    };
    Ok(left)
}

fn to_item(trip: &TravelTrip) -> Result<ResultItem> {
    Ok(ResultItem::record(COLLECTION, &trip.id)
        .with_data(serde_json::to_value(trip)?)
        .with_meta(Meta {
            created_ms: Some(trip.departs_at.timestamp_millis()),
            count: Some(trip.participants.len()),
        }))
}

pub fn run_list(store: &Store, config: RenderConfig) -> Result<()> {
    let mut result_set = ResultSet::new();
    for trip in Repository::<TravelTrip>::new(store).list() {
        result_set.push(to_item(&trip)?);
    }

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_add(
    store: &Store,
    origin: &str,
    destination: &str,
    departs_at: DateTime<Utc>,
    config: RenderConfig,
) -> Result<()> {
    let user = session::require(store)?;
    let trip = add_trip(store, &user.user_id, origin, destination, departs_at)?;

    let mut result_set = ResultSet::new();
    result_set.push(to_item(&trip)?);

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_join(store: &Store, trip_id: &str, config: RenderConfig) -> Result<()> {
    let user = session::require(store)?;
    let trip = join_trip(store, &user.user_id, trip_id)?;

    let mut result_set = ResultSet::new();
    result_set.push(to_item(&trip)?);

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_leave(store: &Store, trip_id: &str, config: RenderConfig) -> Result<()> {
    let user = session::require(store)?;
    let trip = leave_trip(store, &user.user_id, trip_id)?;

    let mut result_set = ResultSet::new();
    result_set.push(to_item(&trip)?);

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    fn departs() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_creator_auto_joins() {
        let temp = tempdir().unwrap();
        let store = Store::open(temp.path()).unwrap();

        let trip = add_trip(&store, "user_a", "Campus", "Airport", departs()).unwrap();
        assert!(trip.id.starts_with("trip_"));
        assert_eq!(trip.participants, vec!["user_a"]);
    }

    #[test]
    fn test_join_is_idempotent() {
        let temp = tempdir().unwrap();
        let store = Store::open(temp.path()).unwrap();

        let trip = add_trip(&store, "user_a", "Campus", "City", departs()).unwrap();
        join_trip(&store, "user_b", &trip.id).unwrap();
        let again = join_trip(&store, "user_b", &trip.id).unwrap();

        assert_eq!(again.participants, vec!["user_a", "user_b"]);
    }

    #[test]
    fn test_leave_removes_only_caller() {
        let temp = tempdir().unwrap();
        let store = Store::open(temp.path()).unwrap();

        let trip = add_trip(&store, "user_a", "Campus", "City", departs()).unwrap();
        join_trip(&store, "user_b", &trip.id).unwrap();
        let left = leave_trip(&store, "user_a", &trip.id).unwrap();

        assert_eq!(left.participants, vec!["user_b"]);

        // leaving when not a participant is a no-op
        let left_again = leave_trip(&store, "user_a", &trip.id).unwrap();
        assert_eq!(left_again.participants, vec!["user_b"]);
    }

    #[test]
    fn test_join_unknown_trip() {
        let temp = tempdir().unwrap();
        let store = Store::open(temp.path()).unwrap();
        assert!(join_trip(&store, "user_a", "trip_ghost").is_err());
    }
}
