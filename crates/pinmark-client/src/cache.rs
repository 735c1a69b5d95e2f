use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use pinmark_types::Location;

pub type Snapshot = Arc<Vec<Location>>;

/// Client-side copy of the server's location list.
///
/// One cache per client, shared by every view through [`subscribe`]. Entries
/// are unique by id and kept in server order. Once [`close`]d the cache
/// ignores writes, so late responses land nowhere.
///
/// Every `upsert` and `remove` bumps the [`generation`]. A fetched list is
/// only swapped in through [`replace_all_since`] if no such write happened
/// after the fetch started.
///
/// [`subscribe`]: LocationCache::subscribe
/// [`close`]: LocationCache::close
/// [`generation`]: LocationCache::generation
/// [`replace_all_since`]: LocationCache::replace_all_since
pub struct LocationCache {
    tx: watch::Sender<Snapshot>,
    closed: AtomicBool,
    generation: AtomicU64,
}

impl Default for LocationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationCache {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            tx,
            closed: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Location> {
        self.tx.borrow().iter().find(|l| l.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Most recently created location.
    pub fn newest(&self) -> Option<Location> {
        self.tx.borrow().last().cloned()
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Count of single-entry writes so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Wholesale replacement from a fresh server list. Returns `false` when closed.
    pub fn replace_all(&self, locations: Vec<Location>) -> bool {
        if self.rejects_write("replace_all") {
            return false;
        }
        self.tx.send_replace(Arc::new(locations));
        true
    }

    /// Like [`replace_all`](Self::replace_all), but refuses a list fetched
    /// before the latest `upsert` or `remove`. `generation` is the value read
    /// when the fetch started.
    pub fn replace_all_since(&self, generation: u64, locations: Vec<Location>) -> bool {
        if self.rejects_write("replace_all") {
            return false;
        }
        // Checked under the channel lock, which upsert and remove also hold
        self.tx.send_if_modified(|list| {
            if self.generation() != generation {
                debug!("Discarding location list fetched at generation {}", generation);
                return false;
            }
            *list = Arc::new(locations);
            true
        })
    }

    /// Replaces the entry with the same id, or appends it.
    pub fn upsert(&self, location: Location) -> bool {
        if self.rejects_write("upsert") {
            return false;
        }
        self.tx.send_modify(|list| {
            self.generation.fetch_add(1, Ordering::AcqRel);
            let list = Arc::make_mut(list);
            match list.iter_mut().find(|l| l.id == location.id) {
                Some(existing) => *existing = location,
                None => list.push(location),
            }
        });
        true
    }

    pub fn remove(&self, id: Uuid) -> bool {
        if self.rejects_write("remove") {
            return false;
        }
        self.tx.send_if_modified(|list| {
            self.generation.fetch_add(1, Ordering::AcqRel);
            if !list.iter().any(|l| l.id == id) {
                return false;
            }
            Arc::make_mut(list).retain(|l| l.id != id);
            true
        });
        true
    }

    fn rejects_write(&self, op: &str) -> bool {
        let closed = self.is_closed();
        if closed {
            debug!("Dropping {} on closed location cache", op);
        }
        closed
    }
}
