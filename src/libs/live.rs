//! Live query subscriptions.
//!
//! A [`LiveQuery`] re-runs its query whenever one of the tables it depends on
//! changes and hands the fresh snapshot to its single consumer. Delivery is
//! pull-based: the consumer asks for the next snapshot with [`LiveQuery::next`]
//! (or the non-blocking [`LiveQuery::try_next`]) and ends the subscription by
//! dropping it or calling [`LiveQuery::unsubscribe`].

use crate::db::db::{Db, Table};
use crate::libs::error::Result;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::Receiver;

type Query<T> = Box<dyn Fn() -> Result<T> + Send + Sync>;

pub struct LiveQuery<T> {
    query: Query<T>,
    tables: Vec<Table>,
    changes: Receiver<Table>,
    primed: bool,
}

impl<T> LiveQuery<T> {
    pub fn new(db: &Db, tables: &[Table], query: impl Fn() -> Result<T> + Send + Sync + 'static) -> Self {
        LiveQuery {
            query: Box::new(query),
            tables: tables.to_vec(),
            changes: db.subscribe(),
            primed: false,
        }
    }

    /// Runs the query now, without touching the subscription state.
    pub fn current(&self) -> Result<T> {
        (self.query)()
    }

    /// First call yields the initial snapshot; later calls wait for a change
    /// to a watched table and yield the refreshed result. Bursts of changes
    /// collapse into one snapshot. `None` once the database is gone.
    pub async fn next(&mut self) -> Option<Result<T>> {
        if !self.primed {
            return Some(self.prime());
        }

        loop {
            match self.changes.recv().await {
                Ok(table) if self.tables.contains(&table) => {
                    self.drain();
                    return Some(self.current());
                }
                Ok(_) => continue,
                // Missed notifications may have included ours
                Err(RecvError::Lagged(_)) => {
                    self.drain();
                    return Some(self.current());
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`next`](Self::next): `None` when nothing
    /// relevant changed since the previous snapshot.
    pub fn try_next(&mut self) -> Option<Result<T>> {
        if !self.primed {
            return Some(self.prime());
        }
        if self.drain() {
            Some(self.current())
        } else {
            None
        }
    }

    pub fn unsubscribe(self) {}

    /// Initial snapshot; changes queued before it are already reflected.
    fn prime(&mut self) -> Result<T> {
        self.primed = true;
        self.drain();
        self.current()
    }

    /// Consumes queued notifications, reporting whether any touched a
    /// watched table.
    fn drain(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.changes.try_recv() {
                Ok(table) => changed |= self.tables.contains(&table),
                Err(TryRecvError::Lagged(_)) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        changed
    }
}
