//! Campus modules - the mock collections behind the super-app
//!
//! Six independent collections, each persisted whole under one fixed
//! storage key. No cross-collection integrity is enforced.

pub mod lostfound;
pub mod marketplace;
pub mod menu;
pub mod places;
pub mod ratings;
pub mod timetable;
pub mod travel;
