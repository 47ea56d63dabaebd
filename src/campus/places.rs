//! Places directory - campus spots with user reviews

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::campus::ratings::average_rating;
use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::new_id;
use crate::session;
use crate::store::repo::{Entity, Repository};
use crate::store::{Store, PLACES_KEY};

pub const COLLECTION: &str = "places";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub address: String,
    pub reviews: Vec<PlaceReview>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceReview {
    pub user_id: String,
    /// 1-5 stars
    pub rating: u8,
    pub comment: String,
}

impl Entity for Place {
    const KEY: &'static str = PLACES_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn add_place(
    store: &Store,
    name: &str,
    category: &str,
    description: &str,
    address: &str,
) -> Result<Place> {
    let place = Place {
        id: new_id("place"),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        address: address.to_string(),
        reviews: Vec::new(),
    };
    Repository::new(store).insert(place.clone())?;
    Ok(place)
}

/// Append a review to a place
pub fn add_review(
    store: &Store,
    place_id: &str,
    user_id: &str,
    rating: u8,
    comment: &str,
) -> Result<Place> {
    if !(1..=5).contains(&rating) {
        bail!("Rating must be between 1 and 5, got {}", rating);
    }

    let repo: Repository<Place> = Repository::new(store);
    let Some(reviewed) = repo.update(place_id, |p| {
        p.reviews.push(PlaceReview {
            user_id: user_id.to_string(),
            rating,
            comment: comment.to_string(),
        });
    })?
    else {
        bail!("No place with id '{}'", place_id);
    };
    Ok(reviewed)
}

pub fn list_places(store: &Store, category: Option<&str>) -> Vec<Place> {
    Repository::<Place>::new(store)
        .list()
        .into_iter()
        .filter(|p| category.map_or(true, |c| p.category.eq_ignore_ascii_case(c)))
        .collect()
}

fn to_item(place: &Place) -> Result<ResultItem> {
    let mut data = serde_json::to_value(place)?;
    if let Some(obj) = data.as_object_mut() {
        obj.insert(
            "average_rating".to_string(),
            serde_json::json!(average_rating(&place.reviews)),
        );
    }

    Ok(ResultItem::record(COLLECTION, &place.id)
        .with_data(data)
        .with_meta(Meta {
            created_ms: None,
            count: Some(place.reviews.len()),
        }))
}

pub fn run_list(store: &Store, category: Option<&str>, config: RenderConfig) -> Result<()> {
    let mut result_set = ResultSet::new();
    for place in list_places(store, category) {
        result_set.push(to_item(&place)?);
    }

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_add(
    store: &Store,
    name: &str,
    category: &str,
    description: &str,
    address: &str,
    config: RenderConfig,
) -> Result<()> {
    let place = add_place(store, name, category, description, address)?;

    let mut result_set = ResultSet::new();
    result_set.push(to_item(&place)?);

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_show(store: &Store, id: &str, config: RenderConfig) -> Result<()> {
    let Some(place) = Repository::<Place>::new(store).find(id) else {
        bail!("No place with id '{}'", id);
    };

    let mut result_set = ResultSet::new();
    result_set.push(to_item(&place)?);

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_review(
    store: &Store,
    id: &str,
    rating: u8,
    comment: &str,
    config: RenderConfig,
) -> Result<()> {
    let user = session::require(store)?;
    let place = add_review(store, id, &user.user_id, rating, comment)?;

    let mut result_set = ResultSet::new();
    result_set.push(to_item(&place)?);

    Renderer::with_config(config).print(&result_set);

    Ok(())
}
