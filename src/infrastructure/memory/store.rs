use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entities::{Click, Link, NewClick, NewLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    links: Vec<Link>,
    by_short_id: HashMap<String, usize>,
    clicks: Vec<Click>,
}

impl Inner {
    /// Maps a link id to its slot. Ids are assigned sequentially from 1.
    fn link_index(&self, link_id: i64) -> Option<usize> {
        let index = usize::try_from(link_id).ok()?.checked_sub(1)?;
        (index < self.links.len()).then_some(index)
    }
}

/// Shared in-memory storage backing both memory repositories.
///
/// Cloning is cheap and yields a handle to the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link_repository(&self) -> MemoryLinkRepository {
        MemoryLinkRepository {
            store: self.clone(),
        }
    }

    pub fn click_repository(&self) -> MemoryClickRepository {
        MemoryClickRepository {
            store: self.clone(),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::internal("Memory store lock poisoned", json!({})))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::internal("Memory store lock poisoned", json!({})))
    }
}

/// In-memory [`LinkRepository`].
#[derive(Clone)]
pub struct MemoryLinkRepository {
    store: MemoryStore,
}

/// In-memory [`ClickRepository`].
#[derive(Clone)]
pub struct MemoryClickRepository {
    store: MemoryStore,
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.store.write()?;

        if inner.by_short_id.contains_key(&new_link.short_id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "field": "short_id" }),
            ));
        }

        let index = inner.links.len();
        let link = Link::new(
            index as i64 + 1,
            new_link.short_id,
            new_link.long_url,
            0,
            Utc::now(),
        );

        inner.by_short_id.insert(link.short_id.clone(), index);
        inner.links.push(link.clone());

        Ok(link)
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        let inner = self.store.read()?;

        Ok(inner
            .by_short_id
            .get(short_id)
            .map(|&index| inner.links[index].clone()))
    }

    async fn increment_click_count(&self, link_id: i64) -> Result<(), AppError> {
        let mut inner = self.store.write()?;

        let index = inner
            .link_index(link_id)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "link_id": link_id })))?;
        inner.links[index].click_count += 1;

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.store.read()?.links.len() as i64)
    }
}

#[async_trait]
impl ClickRepository for MemoryClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut inner = self.store.write()?;

        if inner.link_index(new_click.link_id).is_none() {
            return Err(AppError::bad_request(
                "Referenced record does not exist",
                json!({ "link_id": new_click.link_id }),
            ));
        }

        let click = Click::new(
            inner.clicks.len() as i64 + 1,
            new_click.link_id,
            new_click.ip,
            new_click.user_agent,
            Utc::now(),
        );
        inner.clicks.push(click.clone());

        Ok(click)
    }

    async fn list_by_link(&self, link_id: i64) -> Result<Vec<Click>, AppError> {
        let inner = self.store.read()?;

        // Insertion order is already chronological.
        Ok(inner
            .clicks
            .iter()
            .filter(|c| c.link_id == link_id)
            .cloned()
            .collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.store.read()?.clicks.len() as i64)
    }
}
