//! # lambert93
//!
//! Conversion de coordonnées planes Lambert 93 (EPSG:2154) en coordonnées
//! géographiques WGS84 (EPSG:4326), en Rust pur.
//!
//! ## Features
//!
//! - Projection inverse conique conforme avec raffinement itératif de la latitude
//! - Arrêt sur tolérance et borne d'itérations, non-convergence signalée
//! - Constantes IGN nommées, dérivables depuis la définition géodésique
//! - Aucune I/O : fonction pure, utilisable depuis plusieurs threads
//!
//! ## Usage
//!
//! ```rust
//! use lambert93::{GeodeticConverter, PlanarPoint};
//!
//! let converter = GeodeticConverter::lambert93();
//! let geo = converter.convert(PlanarPoint::new(700000.0, 6600000.0))?;
//! assert!((geo.latitude - 46.5).abs() < 1e-9);
//! assert!((geo.longitude - 3.0).abs() < 1e-9);
//! # Ok::<(), lambert93::ConversionError>(())
//! ```

pub mod converter;
pub mod ellipsoid;
pub mod error;
pub mod latitude;
pub mod params;
pub mod types;

pub use converter::GeodeticConverter;
pub use ellipsoid::Ellipsoid;
pub use error::ConversionError;
pub use latitude::{IterationSettings, LatitudeRefinement, LatitudeSolution};
pub use params::{ProjectionParameters, SecantConeDefinition};
pub use types::{GeodeticPoint, PlanarPoint};

/// Convertit (x, y) Lambert 93 en WGS84 avec les paramètres IGN.
///
/// # Errors
///
/// Retourne `ConversionError` si le point est hors domaine ou si la latitude
/// ne converge pas.
pub fn to_wgs84(x: f64, y: f64) -> Result<GeodeticPoint, ConversionError> {
    GeodeticConverter::lambert93().convert_xy(x, y)
}
