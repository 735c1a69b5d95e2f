//! Client side of Pinmark: a single location cache observed by every view,
//! the create/update/delete contract against a [`LocationApi`] backend, and
//! the in-process notification feed.

pub mod api;
pub mod cache;
pub mod client;
pub mod collaborators;
pub mod config;
pub mod draft;
pub mod error;
pub mod events;
pub mod local;
pub mod map;
pub mod notifications;
pub mod transport;

pub use api::{CountryApi, LocationApi, RemoteLocationApi};
pub use cache::LocationCache;
pub use client::LocationClient;
pub use config::ClientConfig;
pub use draft::{LocationDraft, LocationEdit};
pub use error::{ClientError, PermissionKind};
pub use events::{ToastLevel, UiEvent};
pub use local::LocalLocationApi;
pub use map::MapRegion;
pub use notifications::NotificationFeed;
