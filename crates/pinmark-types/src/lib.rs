pub mod api;
pub mod models;

#[cfg(feature = "graphql")]
mod graphql;

pub use api::{DeleteOutcome, LocationPatch, NewLocation, UpdateOutcome};
pub use models::{Country, Location, Notification};
