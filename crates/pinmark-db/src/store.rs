use std::sync::Arc;

use pinmark_types::{DeleteOutcome, Location, LocationPatch, NewLocation, UpdateOutcome};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::Database;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot error: {0}")]
    Persist(#[from] anyhow::Error),
    #[error("snapshot task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Authoritative, insertion-ordered collection of locations.
///
/// Every operation takes the lock for its whole duration, so each one is
/// atomic on its own and concurrent writers resolve as last write wins.
/// With a snapshot attached, mutations are applied to a copy, written out as
/// the full list, and only then made visible.
pub struct LocationStore {
    locations: RwLock<Vec<Location>>,
    snapshot: Option<Arc<Database>>,
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationStore {
    /// Process-lifetime store with no persistence.
    pub fn new() -> Self {
        Self {
            locations: RwLock::new(Vec::new()),
            snapshot: None,
        }
    }

    /// Store seeded from, and written through to, the snapshot in `db`.
    pub fn with_snapshot(db: Database) -> Result<Self, StoreError> {
        let locations = db.load_locations()?.unwrap_or_default();
        info!("Loaded {} locations from snapshot", locations.len());
        Ok(Self {
            locations: RwLock::new(locations),
            snapshot: Some(Arc::new(db)),
        })
    }

    pub fn is_persistent(&self) -> bool {
        self.snapshot.is_some()
    }

    pub async fn list(&self) -> Vec<Location> {
        self.locations.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<Location> {
        self.locations.read().await.iter().find(|l| l.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.locations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.locations.read().await.is_empty()
    }

    pub async fn create(&self, new: NewLocation) -> Result<Location, StoreError> {
        let mut guard = self.locations.write().await;

        let id = loop {
            let candidate = Uuid::new_v4();
            if !guard.iter().any(|l| l.id == candidate) {
                break candidate;
            }
        };
        let location = new.into_location(id);

        let mut next = guard.clone();
        next.push(location.clone());
        self.persist(&next).await?;
        *guard = next;

        debug!("Created location {} ({})", location.id, location.name);
        Ok(location)
    }

    pub async fn update(&self, id: Uuid, patch: LocationPatch) -> Result<UpdateOutcome, StoreError> {
        let mut guard = self.locations.write().await;

        let Some(idx) = guard.iter().position(|l| l.id == id) else {
            warn!("Update for unknown location {}", id);
            return Ok(UpdateOutcome::NotFound);
        };

        let mut next = guard.clone();
        patch.apply(&mut next[idx]);
        let updated = next[idx].clone();
        self.persist(&next).await?;
        *guard = next;

        debug!("Updated location {}", id);
        Ok(UpdateOutcome::Updated(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteOutcome, StoreError> {
        let mut guard = self.locations.write().await;

        if !guard.iter().any(|l| l.id == id) {
            warn!("Delete for unknown location {}", id);
            return Ok(DeleteOutcome::NotFound);
        }

        let next: Vec<Location> = guard.iter().filter(|l| l.id != id).cloned().collect();
        self.persist(&next).await?;
        *guard = next;

        debug!("Deleted location {}", id);
        Ok(DeleteOutcome::Deleted(id))
    }

    /// Rewrites the whole snapshot. No-op without one.
    async fn persist(&self, locations: &[Location]) -> Result<(), StoreError> {
        let Some(db) = self.snapshot.clone() else {
            return Ok(());
        };

        // Run the blocking SQLite write off the async runtime
        let locations = locations.to_vec();
        tokio::task::spawn_blocking(move || db.save_locations(&locations))
            .await?
            .map_err(|e| {
                error!("Snapshot write failed: {}", e);
                StoreError::Persist(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_location(name: &str, lat: f64, lng: f64, color: &str) -> NewLocation {
        NewLocation {
            latitude: lat,
            longitude: lng,
            name: name.into(),
            color: color.into(),
            image_base64: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids_in_insertion_order() {
        let store = LocationStore::new();
        let a = store.create(new_location("A", 1.0, 2.0, "#fff")).await.unwrap();
        let b = store.create(new_location("A", 1.0, 2.0, "#fff")).await.unwrap();

        assert_ne!(a.id, b.id);
        let list = store.list().await;
        assert_eq!(list.iter().map(|l| l.id).collect::<Vec<_>>(), vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let store = LocationStore::new();
        let created = store.create(new_location("A", 1.0, 2.0, "#fff")).await.unwrap();

        let outcome = store
            .update(
                created.id,
                LocationPatch {
                    color: Some("#000".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let UpdateOutcome::Updated(loc) = outcome else {
            panic!("expected an update");
        };
        assert_eq!(loc.name, "A");
        assert_eq!(loc.latitude, 1.0);
        assert_eq!(loc.longitude, 2.0);
        assert_eq!(loc.color, "#000");
        assert_eq!(store.get(created.id).await, Some(loc));
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let store = LocationStore::new();
        let outcome = store
            .update(Uuid::new_v4(), LocationPatch::default())
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::NotFound);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let store = LocationStore::new();
        let created = store.create(new_location("A", 1.0, 2.0, "#fff")).await.unwrap();

        assert_eq!(store.delete(created.id).await.unwrap(), DeleteOutcome::Deleted(created.id));
        assert_eq!(store.delete(created.id).await.unwrap(), DeleteOutcome::NotFound);
        assert!(store.get(created.id).await.is_none());
    }

    #[tokio::test]
    async fn delete_keeps_order_of_the_rest() {
        let store = LocationStore::new();
        let a = store.create(new_location("A", 0.0, 0.0, "red")).await.unwrap();
        let b = store.create(new_location("B", 0.0, 0.0, "red")).await.unwrap();
        let c = store.create(new_location("C", 0.0, 0.0, "red")).await.unwrap();

        store.delete(b.id).await.unwrap();
        let ids: Vec<Uuid> = store.list().await.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn list_is_idempotent() {
        let store = LocationStore::new();
        store.create(new_location("A", 1.0, 2.0, "#fff")).await.unwrap();
        store.create(new_location("B", 3.0, 4.0, "#000")).await.unwrap();

        assert_eq!(store.list().await, store.list().await);
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pinmark.db");

        let kept = {
            let store = LocationStore::with_snapshot(Database::open(&path).unwrap()).unwrap();
            let home = store.create(new_location("Home", 10.0, 20.0, "#ff0000")).await.unwrap();
            let work = store.create(new_location("Work", 11.0, 21.0, "#00ff00")).await.unwrap();
            store.delete(work.id).await.unwrap();
            store
                .update(
                    home.id,
                    LocationPatch {
                        name: Some("Home2".into()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap()
                .into_option()
                .unwrap()
        };

        let reopened = LocationStore::with_snapshot(Database::open(&path).unwrap()).unwrap();
        assert!(reopened.is_persistent());
        assert_eq!(reopened.list().await, vec![kept]);
    }

    #[tokio::test]
    async fn failed_snapshot_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pinmark.db");

        let store = LocationStore::with_snapshot(Database::open(&path).unwrap()).unwrap();
        let home = store.create(new_location("Home", 10.0, 20.0, "#ff0000")).await.unwrap();

        // Pull the table out from under the store
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("DROP TABLE kv;")
            .unwrap();

        let err = store.create(new_location("Work", 1.0, 2.0, "#000")).await.unwrap_err();
        assert!(matches!(err, StoreError::Persist(_)), "{err}");
        assert_eq!(store.len().await, 1);

        let patch = LocationPatch {
            name: Some("Home2".into()),
            ..Default::default()
        };
        assert!(store.update(home.id, patch).await.is_err());
        assert_eq!(store.get(home.id).await, Some(home.clone()));

        assert!(store.delete(home.id).await.is_err());
        assert_eq!(store.list().await, vec![home]);
    }
}
