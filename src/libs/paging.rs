//! Windowed loading of query results.
//!
//! A [`Pager`] fetches fixed-size pages from a source closure as the
//! consumer scrolls. It never produces placeholder rows: a page holds only
//! rows that exist. Calling [`Pager::refresh`] (or a change to a watched
//! table, see [`Pager::refresh_if_changed`]) starts over from the first page.

use crate::db::db::{Db, Table};
use crate::libs::error::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound for a configured page size.
pub const MAX_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingConfig {
    pub page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        PagingConfig { page_size: DEFAULT_PAGE_SIZE }
    }
}

impl PagingConfig {
    /// Page size actually used, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Zero-based page number.
    pub index: usize,
    pub items: Vec<T>,
    pub has_more: bool,
}

type PageSource<T> = Box<dyn Fn(usize, usize) -> Result<Vec<T>> + Send + Sync>;

pub struct Pager<T> {
    /// Called with `(limit, offset)`.
    source: PageSource<T>,
    page_size: usize,
    next_index: usize,
    exhausted: bool,
    generation: u64,
    changes: Option<(Receiver<Table>, Vec<Table>)>,
}

impl<T> Pager<T> {
    pub fn new(config: PagingConfig, source: impl Fn(usize, usize) -> Result<Vec<T>> + Send + Sync + 'static) -> Self {
        Pager {
            source: Box::new(source),
            page_size: config.effective_page_size(),
            next_index: 0,
            exhausted: false,
            generation: 0,
            changes: None,
        }
    }

    /// Makes the pager restart when any of `tables` changes.
    pub fn watching(mut self, db: &Db, tables: &[Table]) -> Self {
        self.changes = Some((db.subscribe(), tables.to_vec()));
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Incremented on every refresh; pages from an older generation are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Loads the page after the last one handed out, `None` once the end of
    /// the result set was reached.
    pub fn load_next(&mut self) -> Result<Option<Page<T>>> {
        if self.exhausted {
            return Ok(None);
        }
        let page = self.page(self.next_index)?;
        self.next_index = self.next_index.saturating_add(1);
        self.exhausted = !page.has_more;
        Ok(Some(page))
    }

    /// Random access to page `index`, independent of the scroll position.
    /// An index past the end yields an empty page.
    pub fn page(&self, index: usize) -> Result<Page<T>> {
        let Some(offset) = index.checked_mul(self.page_size) else {
            return Ok(Page {
                index,
                items: Vec::new(),
                has_more: false,
            });
        };
        // One extra row tells whether another page follows
        let mut items = (self.source)(self.page_size.saturating_add(1), offset)?;
        let has_more = items.len() > self.page_size;
        items.truncate(self.page_size);
        Ok(Page { index, items, has_more })
    }

    /// Every remaining row, page by page.
    pub fn load_all(&mut self) -> Result<Vec<T>> {
        let mut rows = Vec::new();
        while let Some(page) = self.load_next()? {
            rows.extend(page.items);
        }
        Ok(rows)
    }

    pub fn refresh(&mut self) {
        self.next_index = 0;
        self.exhausted = false;
        self.generation += 1;
    }

    /// Restarts from the first page if a watched table changed since the last
    /// check. Returns whether it did.
    pub fn refresh_if_changed(&mut self) -> bool {
        let Some((receiver, tables)) = self.changes.as_mut() else {
            return false;
        };

        let mut changed = false;
        loop {
            match receiver.try_recv() {
                Ok(table) => changed |= tables.contains(&table),
                Err(TryRecvError::Lagged(_)) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if changed {
            self.refresh();
        }
        changed
    }
}
