//! Mock session - cosmetic name-entry login
//!
//! "Login" just generates an opaque user id for a display name and persists
//! it under one fixed key. No credentials, no security.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::model::{ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::new_id;
use crate::store::{Store, SESSION_KEY};

/// The logged-in user, persisted under [`SESSION_KEY`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: String,
    pub display_name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub logged_in_at: DateTime<Utc>,
}

/// Start a session for the given display name, replacing any existing one
pub fn login(store: &Store, display_name: &str) -> Result<SessionUser> {
    let user = SessionUser {
        user_id: new_id("user"),
        display_name: display_name.to_string(),
        logged_in_at: Utc::now(),
    };
    store.save(SESSION_KEY, &user)?;
    Ok(user)
}

/// Clear the session. Logging out while logged out is fine.
pub fn logout(store: &Store) -> Result<()> {
    store.delete(SESSION_KEY)?;
    Ok(())
}

/// The current session, if any. Corrupt session data clears the stored
/// key and reads as logged out.
pub fn current(store: &Store) -> Option<SessionUser> {
    store.load_or_clear(SESSION_KEY)
}

/// The current session, or an error telling the user to log in
pub fn require(store: &Store) -> Result<SessionUser> {
    match current(store) {
        Some(user) => Ok(user),
        None => bail!("Not logged in. Run `campus login <name>` first."),
    }
}

pub fn run_login(store: &Store, display_name: &str, config: RenderConfig) -> Result<()> {
    let user = login(store, display_name)?;

    let mut result_set = ResultSet::new();
    result_set.push(
        ResultItem::session(format!("Logged in as {}", user.display_name))
            .with_data(serde_json::to_value(&user)?),
    );

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_logout(store: &Store, config: RenderConfig) -> Result<()> {
    logout(store)?;

    let mut result_set = ResultSet::new();
    result_set.push(ResultItem::session("Logged out"));

    Renderer::with_config(config).print(&result_set);

    Ok(())
}

pub fn run_whoami(store: &Store, config: RenderConfig) -> Result<()> {
    let mut result_set = ResultSet::new();
    match current(store) {
        Some(user) => result_set.push(
            ResultItem::session(format!("{} ({})", user.display_name, user.user_id))
                .with_data(serde_json::to_value(&user)?),
        ),
        None => result_set.push(ResultItem::session("Not logged in")),
    }

    Renderer::with_config(config).print(&result_set);

    Ok(())
}
