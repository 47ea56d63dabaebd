//! Lost & found - posts that can be resolved once the item turns up

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::new_id;
use crate::store::repo::{Entity, Repository};
use crate::store::{Store, LOST_FOUND_KEY};

pub const COLLECTION: &str = "lost_found";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostFoundPost {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub is_found: bool,
}

impl Entity for LostFoundPost {
    const KEY: &'static str = LOST_FOUND_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Create a new post. `found` posts announce a found item looking for
/// its owner; the default is a lost item.
pub fn add_post(store: &Store, title: &str, description: &str, found: bool) -> Result<LostFoundPost> {
    let post = LostFoundPost {
        id: new_id("lf"),
        title: title.to_string(),
        description: description.to_string(),
        created_at: Utc::now(),
        is_found: found,
    };
    Repository::new(store).insert(post.clone())?;
    Ok(post)
}

/// Mark a post as found
pub fn resolve_post(store: &Store, id: &str) -> Result<LostFoundPost> {
    let repo: Repository<LostFoundPost> = Repository::new(store);
    let Some(resolved) = repo.update(id, |p| p.is_found = true)? else {
        bail!("No lost & found post with id '{}'", id);
    };
    Ok(resolved)
}

fn to_item(post: &LostFoundPost) -> Result<ResultItem> {
    Ok(ResultItem::record(COLLECTION, &post.id)
        .with_data(serde_json::to_value(post)?)
        .with_meta(Meta {
            created_ms: Some(post.created_at.timestamp_millis()),
            count: None,
        }))
}

pub fn run_list(store: &Store, config: RenderConfig) -> Result<()> {
    let mut result_set = ResultSet::new();
    for post in Repository::<LostFoundPost>::new(store).list() {
        result_set.push(to_item(&post)?);
    }

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_add(
    store: &Store,
    title: &str,
    description: &str,
    found: bool,
    config: RenderConfig,
) -> Result<()> {
    let post = add_post(store, title, description, found)?;

    let mut result_set = ResultSet::new();
    result_set.push(to_item(&post)?);

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_resolve(store: &Store, id: &str, config: RenderConfig) -> Result<()> {
    let post = resolve_post(store, id)?;

    let mut result_set = ResultSet::new();
    result_set.push(to_item(&post)?);

    Renderer::with_config(config).print(&result_set);

    Ok(())
}
