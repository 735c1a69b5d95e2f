use async_graphql::{Context, EmptySubscription, ID, Object, Schema};
use tracing::{info, warn};
use uuid::Uuid;

use pinmark_types::{Country, DeleteOutcome, Location, LocationPatch, NewLocation, UpdateOutcome};

use crate::AppState;

pub type PinmarkSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build(state: AppState) -> PinmarkSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

async fn all_locations(ctx: &Context<'_>) -> async_graphql::Result<Vec<Location>> {
    let state = ctx.data::<AppState>()?;
    Ok(state.store.list().await)
}

/// Ids that don't parse can't match anything, so they resolve as not-found.
fn parse_id(id: &ID) -> Option<Uuid> {
    id.parse::<Uuid>().ok()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every saved location, oldest first.
    async fn locations(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Location>> {
        all_locations(ctx).await
    }

    #[graphql(name = "location", deprecation = "use `locations`")]
    async fn location_list(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Location>> {
        all_locations(ctx).await
    }

    async fn countries(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Country>> {
        let state = ctx.data::<AppState>()?;
        Ok(state.countries.all().to_vec())
    }

    async fn country(&self, ctx: &Context<'_>, code: String) -> async_graphql::Result<Option<Country>> {
        let state = ctx.data::<AppState>()?;
        Ok(state.countries.by_code(&code).cloned())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_location(
        &self,
        ctx: &Context<'_>,
        latitude: f64,
        longitude: f64,
        name: String,
        color: String,
        image_base64: Option<String>,
    ) -> async_graphql::Result<Location> {
        let state = ctx.data::<AppState>()?;
        let location = state
            .store
            .create(NewLocation {
                latitude,
                longitude,
                name,
                color,
                image_base64,
            })
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        info!("Location {} created", location.id);
        Ok(location)
    }

    /// Returns `null` when no location has this id.
    async fn update_location(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        longitude: Option<f64>,
        latitude: Option<f64>,
        color: Option<String>,
        image_base64: Option<String>,
    ) -> async_graphql::Result<Option<Location>> {
        let state = ctx.data::<AppState>()?;
        let Some(id) = parse_id(&id) else {
            warn!("updateLocation with malformed id {:?}", id.as_str());
            return Ok(None);
        };

        let patch = LocationPatch {
            name,
            latitude,
            longitude,
            color,
            image_base64,
        };
        let outcome = state
            .store
            .update(id, patch)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(match outcome {
            UpdateOutcome::Updated(location) => Some(location),
            UpdateOutcome::NotFound => None,
        })
    }

    /// `false` when no location has this id.
    async fn delete_location(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let state = ctx.data::<AppState>()?;
        let Some(id) = parse_id(&id) else {
            warn!("deleteLocation with malformed id {:?}", id.as_str());
            return Ok(false);
        };

        let outcome = state
            .store
            .delete(id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        if let DeleteOutcome::Deleted(id) = outcome {
            info!("Location {} deleted", id);
        }
        Ok(outcome.is_deleted())
    }
}
