use pinmark_types::{LocationPatch, NewLocation};

use crate::collaborators::Position;
use crate::error::ClientError;

/// Marker color applied when the user didn't pick one.
pub const DEFAULT_COLOR: &str = "#FF0000";

/// What the add-location form holds before submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationDraft {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub color: Option<String>,
    pub image_base64: Option<String>,
}

impl LocationDraft {
    /// Draft pinned at `position`, as when the user taps the map.
    pub fn at(position: Position) -> Self {
        Self {
            latitude: Some(position.latitude),
            longitude: Some(position.longitude),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn image_base64(mut self, image: impl Into<String>) -> Self {
        self.image_base64 = Some(image.into());
        self
    }

    pub fn validate(self) -> Result<NewLocation, ClientError> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ClientError::Validation("name is required".into()))?;
        let latitude = self
            .latitude
            .filter(|v| v.is_finite())
            .ok_or_else(|| ClientError::Validation("latitude is required".into()))?;
        let longitude = self
            .longitude
            .filter(|v| v.is_finite())
            .ok_or_else(|| ClientError::Validation("longitude is required".into()))?;
        let color = self
            .color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());

        Ok(NewLocation {
            latitude,
            longitude,
            name,
            color,
            image_base64: self.image_base64.filter(|img| !img.is_empty()),
        })
    }
}

/// Changes from the edit screen. Coordinates are read-only there, so an
/// edit can never move a pin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationEdit {
    pub name: Option<String>,
    pub color: Option<String>,
    /// `Some("")` removes the photo.
    pub image_base64: Option<String>,
}

impl LocationEdit {
    pub fn into_patch(self) -> LocationPatch {
        LocationPatch {
            name: self.name,
            latitude: None,
            longitude: None,
            color: self.color,
            image_base64: self.image_base64,
        }
    }
}
