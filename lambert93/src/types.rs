//! Types de données pour le crate lambert93

/// Point en coordonnées planes Lambert 93 (mètres)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for PlanarPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Point en coordonnées géographiques WGS84 (degrés décimaux)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPoint {
    /// Latitude en degrés
    pub latitude: f64,
    /// Longitude en degrés
    pub longitude: f64,
}

impl GeodeticPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Couple (latitude, longitude)
    pub fn to_tuple(self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}
