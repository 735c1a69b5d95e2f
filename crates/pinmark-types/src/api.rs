use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Location;

// -- Create --

/// Fields for a new location. Everything but the image is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

impl NewLocation {
    pub fn into_location(self, id: Uuid) -> Location {
        Location {
            id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            color: self.color,
            image_base64: self.image_base64.filter(|img| !img.is_empty()),
        }
    }
}

// -- Update --

/// Partial update. `None` keeps the stored value.
///
/// An empty `image_base64` removes the photo, which is what the edit screen
/// sends when the user clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

impl LocationPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.color.is_none()
            && self.image_base64.is_none()
    }

    pub fn apply(&self, loc: &mut Location) {
        if let Some(name) = &self.name {
            loc.name = name.clone();
        }
        if let Some(lat) = self.latitude {
            loc.latitude = lat;
        }
        if let Some(lng) = self.longitude {
            loc.longitude = lng;
        }
        if let Some(color) = &self.color {
            loc.color = color.clone();
        }
        if let Some(img) = &self.image_base64 {
            loc.image_base64 = if img.is_empty() { None } else { Some(img.clone()) };
        }
    }
}

// -- Outcomes --

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(Location),
    NotFound,
}

impl UpdateOutcome {
    pub fn into_option(self) -> Option<Location> {
        match self {
            Self::Updated(loc) => Some(loc),
            Self::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Uuid),
    NotFound,
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Location {
        NewLocation {
            latitude: 1.0,
            longitude: 2.0,
            name: "A".into(),
            color: "#fff".into(),
            image_base64: None,
        }
        .into_location(Uuid::new_v4())
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut loc = sample();
        let patch = LocationPatch {
            color: Some("#000".into()),
            ..Default::default()
        };
        patch.apply(&mut loc);

        assert_eq!(loc.name, "A");
        assert_eq!(loc.latitude, 1.0);
        assert_eq!(loc.longitude, 2.0);
        assert_eq!(loc.color, "#000");
    }

    #[test]
    fn empty_image_clears_photo() {
        let mut loc = sample();
        LocationPatch {
            image_base64: Some("aGk=".into()),
            ..Default::default()
        }
        .apply(&mut loc);
        assert!(loc.has_photo());

        LocationPatch {
            image_base64: Some(String::new()),
            ..Default::default()
        }
        .apply(&mut loc);
        assert!(!loc.has_photo());
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(LocationPatch::default().is_empty());
        assert!(
            !LocationPatch {
                name: Some("B".into()),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn patch_omits_unset_fields_when_serialized() {
        let patch = LocationPatch {
            name: Some("Home2".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Home2" }));
    }
}
