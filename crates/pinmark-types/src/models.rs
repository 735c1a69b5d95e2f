use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved map pin.
///
/// `id` is assigned by the server on creation and never changes. Coordinates
/// are always present; the color tints the marker and the optional image is a
/// base64 payload shown on the detail screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
#[cfg_attr(feature = "graphql", graphql(complex))]
pub struct Location {
    #[cfg_attr(feature = "graphql", graphql(skip))]
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

impl Location {
    pub fn has_photo(&self) -> bool {
        self.image_base64.is_some()
    }
}

/// Read-only reference data used to jump the map to a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
#[cfg_attr(feature = "graphql", graphql(complex))]
pub struct Country {
    #[cfg_attr(feature = "graphql", graphql(skip))]
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub language: Vec<String>,
    pub default_latitude: f64,
    pub default_longitude: f64,
}

/// Client-local feed entry. Never leaves the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            timestamp: Utc::now(),
            read: false,
        }
    }
}
