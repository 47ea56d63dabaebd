//! Marketplace - student-to-student listings

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::new_id;
use crate::store::repo::{Entity, Repository};
use crate::store::{Store, MARKETPLACE_KEY};

pub const COLLECTION: &str = "marketplace";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceListing {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub is_for_sale: bool,
}

impl Entity for MarketplaceListing {
    const KEY: &'static str = MARKETPLACE_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Create a listing; new listings are always for sale
pub fn add_listing(
    store: &Store,
    title: &str,
    price: f64,
    category: &str,
    description: &str,
) -> Result<MarketplaceListing> {
    let listing = MarketplaceListing {
        id: new_id("mp"),
        title: title.to_string(),
        price,
        category: category.to_string(),
        description: description.to_string(),
        created_at: Utc::now(),
        is_for_sale: true,
    };
    Repository::new(store).insert(listing.clone())?;
    Ok(listing)
}

/// Mark a listing as sold
pub fn mark_sold(store: &Store, id: &str) -> Result<MarketplaceListing> {
    let repo: Repository<MarketplaceListing> = Repository::new(store);
    let Some(sold) = repo.update(id, |l| l.is_for_sale = false)? else {
        bail!("No marketplace listing with id '{}'", id);
    };
    Ok(sold)
}

/// List listings, optionally filtered by category and/or for-sale status
pub fn list_listings(
    store: &Store,
    category: Option<&str>,
    for_sale_only: bool,
) -> Vec<MarketplaceListing> {
    Repository::<MarketplaceListing>::new(store)
        .list()
        .into_iter()
        .filter(|l| category.map_or(true, |c| l.category.eq_ignore_ascii_case(c)))
        .filter(|l| !for_sale_only || l.is_for_sale)
        .collect()
}

fn to_item(listing: &MarketplaceListing) -> Result<ResultItem> {
    Ok(ResultItem::record(COLLECTION, &listing.id)
        .with_data(serde_json::to_value(listing)?)
        .with_meta(Meta {
            created_ms: Some(listing.created_at.timestamp_millis()),
            count: None,
        }))
}

pub fn run_list(
    store: &Store,
    category: Option<&str>,
    for_sale_only: bool,
    config: RenderConfig,
) -> Result<()> {
    let mut result_set = ResultSet::new();
    for listing in list_listings(store, category, for_sale_only) {
        result_set.push(to_item(&listing)?);
    }

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_add(
    store: &Store,
    title: &str,
    price: f64,
    category: &str,
    description: &str,
    config: RenderConfig,
) -> Result<()> {
    let listing = add_listing(store, title, price, category, description)?;

    let mut result_set = ResultSet::new();
    result_set.push(to_item(&listing)?);

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_sold(store: &Store, id: &str, config: RenderConfig) -> Result<()> {
    let listing = mark_sold(store, id)?;

    let mut result_set = ResultSet::new();
    result_set.push(to_item(&listing)?);

    Renderer::with_config(config).print(&result_set);

    Ok(())
}
