use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.longitude, coordinates.latitude)
    }
}

impl From<&Coordinates> for String {
    fn from(coordinates: &Coordinates) -> Self {
        format!("{},{}", coordinates.longitude, coordinates.latitude)
    }
}

/// Axis-aligned extent of a decoded path, southwest and northeast corners.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub southwest: Coordinates,
    pub northeast: Coordinates,
}
