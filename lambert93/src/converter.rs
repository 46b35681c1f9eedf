//! Projection inverse Lambert 93 (EPSG:2154) → WGS84 (EPSG:4326)
//!
//! Lambert Conformal Conic avec 2 parallèles standards

use tracing::trace;

use crate::error::ConversionError;
use crate::latitude::{solve_latitude, IterationSettings};
use crate::params::ProjectionParameters;
use crate::types::{GeodeticPoint, PlanarPoint};

/// Convertisseur sans état : fonction pure des paramètres et du point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeodeticConverter {
    params: ProjectionParameters,
    settings: IterationSettings,
}

impl GeodeticConverter {
    pub fn new(params: ProjectionParameters, settings: IterationSettings) -> Self {
        Self { params, settings }
    }

    /// Lambert 93 avec les réglages de convergence par défaut
    pub fn lambert93() -> Self {
        Self::default()
    }

    /// Remplace les réglages de convergence
    pub fn with_settings(self, settings: IterationSettings) -> Self {
        Self { settings, ..self }
    }

    pub fn params(&self) -> &ProjectionParameters {
        &self.params
    }

    pub fn settings(&self) -> &IterationSettings {
        &self.settings
    }

    /// Convertit un point Lambert 93 en latitude/longitude WGS84
    ///
    /// # Errors
    ///
    /// - `Domain` si le point n'est pas fini ou coïncide avec le pôle (Xs, Ys)
    /// - `NonConvergence` si le raffinement de la latitude n'aboutit pas
    pub fn convert(&self, point: PlanarPoint) -> Result<GeodeticPoint, ConversionError> {
        if !(point.x.is_finite() && point.y.is_finite()) {
            return Err(ConversionError::domain(format!(
                "non-finite input ({}, {})",
                point.x, point.y
            )));
        }

        let (xs, ys) = self.params.false_origin();
        let n = self.params.n();

        // Rayon et angle depuis le pôle
        let dx = point.x - xs;
        let dy = ys - point.y;
        let r = dx.hypot(dy);
        if r <= 0.0 {
            return Err(ConversionError::domain(
                "point coincides with the projection pole (R = 0)",
            ));
        }
        let gamma = dx.atan2(dy);

        // Latitude isométrique
        let ratio = r / self.params.c();
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(ConversionError::domain(format!(
                "ln(R / C) undefined for R / C = {}",
                ratio
            )));
        }
        let iso_lat = -ratio.ln() / n;

        // Latitude géographique
        let solution = solve_latitude(iso_lat, self.params.e(), &self.settings)?;

        // Longitude
        let lon = gamma / n + self.params.lon0().to_radians();

        trace!(
            x = point.x,
            y = point.y,
            iterations = solution.iterations,
            "Point converti"
        );

        Ok(GeodeticPoint::new(
            solution.latitude.to_degrees(),
            lon.to_degrees(),
        ))
    }

    /// Raccourci pour `convert(PlanarPoint::new(x, y))`
    pub fn convert_xy(&self, x: f64, y: f64) -> Result<GeodeticPoint, ConversionError> {
        self.convert(PlanarPoint::new(x, y))
    }
}
