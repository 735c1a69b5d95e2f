use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use pinmark_types::{Country, DeleteOutcome, Location, UpdateOutcome};

use crate::api::{CountryApi, LocationApi};
use crate::cache::LocationCache;
use crate::collaborators::{GeolocationProvider, NotificationScheduler, PhotoPicker};
use crate::draft::{LocationDraft, LocationEdit};
use crate::error::{ClientError, PermissionKind};
use crate::events::UiEvent;
use crate::map::{self, MapRegion};
use crate::notifications::NotificationFeed;

/// How many times `refresh` fetches before settling for the cached list.
pub const REFRESH_ATTEMPTS: usize = 3;

/// Applies the user's location intents against one backend and keeps the
/// shared cache in step with it.
///
/// Every failure is local to the call that caused it: the cache is left as
/// it was and the UI gets a one-shot error toast. Nothing is retried.
pub struct LocationClient<A> {
    api: A,
    cache: Arc<LocationCache>,
    feed: Arc<NotificationFeed>,
    events: mpsc::UnboundedSender<UiEvent>,
    scheduler: Option<Arc<dyn NotificationScheduler>>,
}

impl<A: LocationApi> LocationClient<A> {
    /// Returns the client and the receiving end of its UI event channel.
    pub fn new(api: A) -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let client = Self {
            api,
            cache: Arc::new(LocationCache::new()),
            feed: Arc::new(NotificationFeed::new()),
            events,
            scheduler: None,
        };
        (client, rx)
    }

    /// Also raise a device notification whenever a location is saved.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn NotificationScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &Arc<LocationCache> {
        &self.cache
    }

    pub fn notifications(&self) -> &Arc<NotificationFeed> {
        &self.feed
    }

    /// Cached locations, server order.
    pub fn locations(&self) -> Vec<Location> {
        self.cache.snapshot().as_ref().clone()
    }

    /// Stop accepting results; anything still in flight is discarded.
    pub fn dispose(&self) {
        self.cache.close();
    }

    /// Replaces the cache with the backend's current list.
    ///
    /// A list fetched while a create, update or delete landed in the cache is
    /// stale and gets fetched again. After [`REFRESH_ATTEMPTS`] stale lists
    /// the cache keeps what the local writes left in it.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        for attempt in 1..=REFRESH_ATTEMPTS {
            let generation = self.cache.generation();
            let locations = match self.api.list().await {
                Ok(locations) => locations,
                Err(e) => {
                    error!("Refresh failed: {}", e);
                    self.emit(UiEvent::error("Error fetching locations"));
                    return Err(e);
                }
            };

            let count = locations.len();
            if self.cache.replace_all_since(generation, locations) || self.cache.is_closed() {
                debug!("Refreshed {} locations", count);
                return Ok(());
            }
            debug!("Location list changed during refresh (attempt {})", attempt);
        }

        warn!("Giving up on refresh after {} stale lists", REFRESH_ATTEMPTS);
        Ok(())
    }

    /// Pull-to-refresh on the map: refresh, then centre on the newest pin.
    pub async fn refresh_and_focus(&self) -> Result<Option<MapRegion>, ClientError> {
        self.refresh().await?;
        let region = map::newest_region(&self.cache.snapshot());
        if region.is_some() {
            self.emit(UiEvent::success("Locations refreshed successfully!"));
        }
        Ok(region)
    }

    pub async fn create(&self, draft: LocationDraft) -> Result<Location, ClientError> {
        let new = match draft.validate() {
            Ok(new) => new,
            Err(e) => {
                warn!("Rejected location draft: {}", e);
                self.emit(UiEvent::error("Error saving location"));
                return Err(e);
            }
        };

        let location = match self.api.create(&new).await {
            Ok(location) => location,
            Err(e) => {
                error!("Create failed: {}", e);
                self.emit(UiEvent::error("Error saving location"));
                return Err(e);
            }
        };

        info!("Saved location {} ({})", location.id, location.name);
        self.cache.upsert(location.clone());
        self.feed.push(format!("Location \"{}\" saved", location.name));
        self.notify_device("Location saved", &location.name).await;
        self.emit(UiEvent::success("Location saved successfully!"));
        self.emit(UiEvent::NavigateToMap);
        Ok(location)
    }

    /// A missing id is not an error here: the cache stays as it was and the
    /// user is still sent back to the map.
    pub async fn update(&self, id: Uuid, edit: LocationEdit) -> Result<UpdateOutcome, ClientError> {
        let outcome = match self.api.update(id, &edit.into_patch()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Update of {} failed: {}", id, e);
                self.emit(UiEvent::error("Error editing location"));
                return Err(e);
            }
        };

        match &outcome {
            UpdateOutcome::Updated(location) => {
                self.cache.upsert(location.clone());
            }
            UpdateOutcome::NotFound => warn!("Location {} no longer exists on the server", id),
        }
        self.emit(UiEvent::success("Location edited successfully!"));
        self.emit(UiEvent::NavigateToMap);
        Ok(outcome)
    }

    /// Delete from a screen that stays open, such as the location list.
    ///
    /// Not-found counts as success; the id is gone from the cache either way.
    pub async fn delete(&self, id: Uuid) -> Result<DeleteOutcome, ClientError> {
        let outcome = match self.api.delete(id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Delete of {} failed: {}", id, e);
                self.emit(UiEvent::error("Error deleting location"));
                return Err(e);
            }
        };

        if outcome == DeleteOutcome::NotFound {
            warn!("Location {} was already gone", id);
        }
        self.cache.remove(id);
        self.emit(UiEvent::success("Location deleted successfully!"));
        Ok(outcome)
    }

    /// Delete from the edit screen, which closes back to the map afterwards.
    pub async fn delete_and_return(&self, id: Uuid) -> Result<DeleteOutcome, ClientError> {
        let outcome = self.delete(id).await?;
        self.emit(UiEvent::NavigateToMap);
        Ok(outcome)
    }

    /// Region around the device's current position.
    pub async fn current_region(&self, geo: &dyn GeolocationProvider) -> Result<MapRegion, ClientError> {
        if !geo.request_permission().await.is_granted() {
            self.emit(UiEvent::alert("Permission to access location was denied"));
            return Err(ClientError::PermissionDenied(PermissionKind::Location));
        }
        let position = geo.current_position().await?;
        Ok(MapRegion::from(position))
    }

    /// Picks a photo and returns it base64-encoded, or `None` if the user cancelled.
    pub async fn pick_photo(&self, picker: &dyn PhotoPicker) -> Result<Option<String>, ClientError> {
        if !picker.request_permission().await.is_granted() {
            self.emit(UiEvent::alert("Permission to access media library is required!"));
            return Err(ClientError::PermissionDenied(PermissionKind::MediaLibrary));
        }

        match picker.pick().await {
            Some(bytes) => Ok(Some(B64.encode(bytes))),
            None => {
                self.emit(UiEvent::alert("You did not select any image."));
                Ok(None)
            }
        }
    }

    /// Shows the photo attached to a cached location, if any.
    pub fn photo_of(&self, id: Uuid) -> Option<String> {
        let photo = self.cache.get(id).and_then(|l| l.image_base64);
        if photo.is_none() {
            self.emit(UiEvent::info("No image available for this location"));
        }
        photo
    }

    async fn notify_device(&self, title: &str, body: &str) {
        let Some(scheduler) = &self.scheduler else {
            return;
        };
        if scheduler.request_permission().await.is_granted() {
            scheduler.schedule(title, body);
        } else {
            warn!("Notification permission denied, skipping device notification");
        }
    }

    fn emit(&self, event: UiEvent) {
        // The UI may already be gone
        let _ = self.events.send(event);
    }
}

impl<A: LocationApi + CountryApi> LocationClient<A> {
    pub async fn countries(&self) -> Result<Vec<Country>, ClientError> {
        self.api.countries().await.inspect_err(|e| {
            error!("Country list failed: {}", e);
            self.emit(UiEvent::error("Error fetching countries"));
        })
    }

    /// Region for the country's default coordinates, `None` for an unknown code.
    pub async fn jump_to_country(&self, code: &str) -> Result<Option<MapRegion>, ClientError> {
        let country = self.api.country(code).await.inspect_err(|e| {
            error!("Country lookup for {} failed: {}", code, e);
            self.emit(UiEvent::error("Error fetching countries"));
        })?;
        Ok(country.as_ref().map(map::country_region))
    }
}
