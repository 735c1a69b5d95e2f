use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use pinmark_types::{DeleteOutcome, Location, LocationPatch, NewLocation, UpdateOutcome};

use crate::api::LocationApi;
use crate::collaborators::KeyValueStore;
use crate::error::ClientError;

pub const LOCATIONS_KEY: &str = "locations";

/// [`LocationApi`] persisted on the device.
///
/// The whole list lives under [`LOCATIONS_KEY`] and is rewritten on every
/// mutation. The write lock keeps read-modify-write cycles from interleaving.
pub struct LocalLocationApi<K> {
    kv: K,
    write_lock: Mutex<()>,
}

impl<K: KeyValueStore> LocalLocationApi<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<Location>, ClientError> {
        match self.kv.get(LOCATIONS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, locations: &[Location]) -> Result<(), ClientError> {
        let raw = serde_json::to_string(locations)?;
        self.kv.set(LOCATIONS_KEY, raw).await
    }
}

#[async_trait]
impl<K: KeyValueStore> LocationApi for LocalLocationApi<K> {
    async fn list(&self) -> Result<Vec<Location>, ClientError> {
        self.load().await
    }

    async fn create(&self, new: &NewLocation) -> Result<Location, ClientError> {
        let _guard = self.write_lock.lock().await;
        let mut locations = self.load().await?;

        let location = new.clone().into_location(Uuid::new_v4());
        locations.push(location.clone());
        self.save(&locations).await?;

        debug!("Stored location {} locally", location.id);
        Ok(location)
    }

    async fn update(&self, id: Uuid, patch: &LocationPatch) -> Result<UpdateOutcome, ClientError> {
        let _guard = self.write_lock.lock().await;
        let mut locations = self.load().await?;

        let Some(location) = locations.iter_mut().find(|l| l.id == id) else {
            warn!("No local location {}", id);
            return Ok(UpdateOutcome::NotFound);
        };
        patch.apply(location);
        let updated = location.clone();

        self.save(&locations).await?;
        Ok(UpdateOutcome::Updated(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<DeleteOutcome, ClientError> {
        let _guard = self.write_lock.lock().await;
        let mut locations = self.load().await?;

        let before = locations.len();
        locations.retain(|l| l.id != id);
        if locations.len() == before {
            return Ok(DeleteOutcome::NotFound);
        }

        self.save(&locations).await?;
        Ok(DeleteOutcome::Deleted(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::MemoryKeyValueStore;

    fn new_location(name: &str) -> NewLocation {
        NewLocation {
            latitude: 1.0,
            longitude: 2.0,
            name: name.into(),
            color: "#fff".into(),
            image_base64: None,
        }
    }

    #[tokio::test]
    async fn empty_storage_lists_nothing() {
        let api = LocalLocationApi::new(MemoryKeyValueStore::new());
        assert!(api.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mutations_rewrite_the_whole_list() {
        let kv = MemoryKeyValueStore::new();
        let api = LocalLocationApi::new(kv);

        let a = api.create(&new_location("A")).await.unwrap();
        let b = api.create(&new_location("B")).await.unwrap();
        api.delete(a.id).await.unwrap();

        let raw = api.kv.get(LOCATIONS_KEY).await.unwrap().unwrap();
        let stored: Vec<Location> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![b]);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_id_are_not_found() {
        let api = LocalLocationApi::new(MemoryKeyValueStore::new());
        let id = Uuid::new_v4();

        assert_eq!(
            api.update(id, &LocationPatch::default()).await.unwrap(),
            UpdateOutcome::NotFound
        );
        assert_eq!(api.delete(id).await.unwrap(), DeleteOutcome::NotFound);
    }

    #[tokio::test]
    async fn corrupt_storage_is_a_decode_error() {
        let kv = MemoryKeyValueStore::new();
        kv.set(LOCATIONS_KEY, "not json".into()).await.unwrap();
        let api = LocalLocationApi::new(kv);

        assert!(matches!(api.list().await, Err(ClientError::Decode(_))));
    }
}
