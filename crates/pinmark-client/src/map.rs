use pinmark_types::{Country, Location};

use crate::collaborators::Position;

/// Zoom used whenever the map is re-centred.
pub const DEFAULT_DELTA: f64 = 0.01;

/// Visible map area, centre plus span in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn centered(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            latitude_delta: DEFAULT_DELTA,
            longitude_delta: DEFAULT_DELTA,
        }
    }

    /// Position the map starts on before anything is known (São Paulo).
    pub fn initial() -> Self {
        Self::centered(-23.55052, -46.633308)
    }

    pub fn center(&self) -> Position {
        Position {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl From<Position> for MapRegion {
    fn from(p: Position) -> Self {
        Self::centered(p.latitude, p.longitude)
    }
}

/// Region around the most recently created location.
pub fn newest_region(locations: &[Location]) -> Option<MapRegion> {
    locations.last().map(|l| MapRegion::centered(l.latitude, l.longitude))
}

pub fn country_region(country: &Country) -> MapRegion {
    MapRegion::centered(country.default_latitude, country.default_longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn newest_region_uses_last_location() {
        let make = |lat: f64, lng: f64| Location {
            id: Uuid::new_v4(),
            name: "p".into(),
            latitude: lat,
            longitude: lng,
            color: "red".into(),
            image_base64: None,
        };

        assert_eq!(newest_region(&[]), None);
        let region = newest_region(&[make(1.0, 2.0), make(3.0, 4.0)]).unwrap();
        assert_eq!(region.center(), Position { latitude: 3.0, longitude: 4.0 });
        assert_eq!(region.latitude_delta, DEFAULT_DELTA);
    }
}
