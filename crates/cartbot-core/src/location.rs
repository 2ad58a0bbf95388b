use serde::{Deserialize, Serialize};

/// A latitude/longitude pair, as shared by a user through a location
/// attachment and persisted in their session.
///
/// Serializes as `{"latitude":f,"longitude":f}`, which is also the session
/// store wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
}

impl Location {
    /// Creates a location from a latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
