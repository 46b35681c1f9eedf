//! Paramètres de la projection conique conforme de Lambert
//!
//! Deux représentations :
//! - [`ProjectionParameters`] : les constantes directement utilisées par
//!   l'inversion (e, n, C, Xs, Ys, λ0)
//! - [`SecantConeDefinition`] : la définition géodésique (ellipsoïde,
//!   parallèles standards, fausse origine) dont on dérive les constantes

use crate::ellipsoid::Ellipsoid;
use crate::error::ConversionError;
use crate::latitude::isometric_latitude;

/// Constantes de la projection, figées pour un couple projection/ellipsoïde
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParameters {
    /// Première excentricité de l'ellipsoïde
    e: f64,
    /// Exposant de la projection
    n: f64,
    /// Constante de la projection (mètres)
    c: f64,
    /// X du pôle de la projection dans le plan (mètres)
    xs: f64,
    /// Y du pôle de la projection dans le plan (mètres)
    ys: f64,
    /// Méridien central (degrés)
    lon0: f64,
}

impl ProjectionParameters {
    /// Lambert 93 (EPSG:2154) sur GRS80, constantes publiées par l'IGN
    pub const LAMBERT_93: ProjectionParameters = ProjectionParameters {
        e: 0.0818191910428158,
        n: 0.7256077650532670,
        c: 11754255.426096,
        xs: 700000.0,
        ys: 12655612.049876,
        lon0: 3.0,
    };

    /// Crée un jeu de paramètres validé
    pub fn new(
        e: f64,
        n: f64,
        c: f64,
        xs: f64,
        ys: f64,
        lon0: f64,
    ) -> Result<Self, ConversionError> {
        if [e, n, c, xs, ys, lon0].iter().any(|v| !v.is_finite()) {
            return Err(ConversionError::invalid_parameters(
                "projection constants must be finite",
            ));
        }
        if !(e > 0.0 && e < 1.0) {
            return Err(ConversionError::invalid_parameters(format!(
                "eccentricity must be in (0, 1), got {}",
                e
            )));
        }
        if n <= 0.0 {
            return Err(ConversionError::invalid_parameters(format!(
                "n must be positive, got {}",
                n
            )));
        }
        if c <= 0.0 {
            return Err(ConversionError::invalid_parameters(format!(
                "C must be positive, got {}",
                c
            )));
        }

        Ok(Self {
            e,
            n,
            c,
            xs,
            ys,
            lon0,
        })
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    /// Coordonnées (Xs, Ys) du pôle de la projection
    pub fn false_origin(&self) -> (f64, f64) {
        (self.xs, self.ys)
    }

    /// Méridien central en degrés
    pub fn lon0(&self) -> f64 {
        self.lon0
    }
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self::LAMBERT_93
    }
}

/// Définition d'une conique conforme sécante (2 parallèles standards)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecantConeDefinition {
    pub ellipsoid: Ellipsoid,
    /// Latitude origine (degrés)
    pub lat0: f64,
    /// Premier parallèle standard (degrés)
    pub lat1: f64,
    /// Deuxième parallèle standard (degrés)
    pub lat2: f64,
    /// False easting
    pub x0: f64,
    /// False northing
    pub y0: f64,
    /// Longitude origine (degrés)
    pub lon0: f64,
}

impl SecantConeDefinition {
    /// Lambert 93 (EPSG:2154)
    pub const LAMBERT_93: SecantConeDefinition = SecantConeDefinition {
        ellipsoid: Ellipsoid::GRS80,
        lat0: 46.5,
        lat1: 44.0,
        lat2: 49.0,
        x0: 700000.0,
        y0: 6600000.0,
        lon0: 3.0,
    };

    /// Calcule les constantes de la projection
    ///
    /// Échoue avec `InvalidParameters` pour une définition dégénérée
    /// (parallèles confondus, ellipsoïde sphérique).
    pub fn derive(&self) -> Result<ProjectionParameters, ConversionError> {
        let e = self.ellipsoid.e();
        let lat0 = self.lat0.to_radians();
        let lat1 = self.lat1.to_radians();
        let lat2 = self.lat2.to_radians();

        let n1 = self.ellipsoid.grande_normale(lat1);
        let n2 = self.ellipsoid.grande_normale(lat2);

        let iso_lat0 = isometric_latitude(lat0, e);
        let iso_lat1 = isometric_latitude(lat1, e);
        let iso_lat2 = isometric_latitude(lat2, e);

        // Exposant de la projection
        let n = ((n1 * lat1.cos()).ln() - (n2 * lat2.cos()).ln()) / (iso_lat2 - iso_lat1);

        // Constante C
        let c = (n1 * lat1.cos() / n) * (n * iso_lat1).exp();

        // Rayon à l'origine
        let r0 = c * (-n * iso_lat0).exp();

        ProjectionParameters::new(e, n, c, self.x0, self.y0 + r0, self.lon0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_lambert93_matches_constants() {
        let derived = SecantConeDefinition::LAMBERT_93.derive().unwrap();
        let fixed = ProjectionParameters::LAMBERT_93;

        assert!((derived.e() - fixed.e()).abs() < 1e-15, "e={}", derived.e());
        assert!((derived.n() - fixed.n()).abs() < 1e-12, "n={}", derived.n());
        assert!((derived.c() - fixed.c()).abs() < 1e-3, "C={}", derived.c());

        let (xs, ys) = derived.false_origin();
        assert_eq!(xs, 700000.0);
        assert!((ys - 12655612.049876).abs() < 1e-3, "ys={}", ys);
        assert_eq!(derived.lon0(), 3.0);
    }

    #[test]
    fn test_degenerate_cone_rejected() {
        let def = SecantConeDefinition {
            lat2: 44.0,
            ..SecantConeDefinition::LAMBERT_93
        };
        assert!(matches!(
            def.derive(),
            Err(ConversionError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_parameter_validation() {
        let p = ProjectionParameters::LAMBERT_93;
        let (xs, ys) = p.false_origin();

        assert!(ProjectionParameters::new(p.e(), p.n(), p.c(), xs, ys, p.lon0()).is_ok());
        assert!(ProjectionParameters::new(0.0, p.n(), p.c(), xs, ys, 3.0).is_err());
        assert!(ProjectionParameters::new(1.0, p.n(), p.c(), xs, ys, 3.0).is_err());
        assert!(ProjectionParameters::new(p.e(), -0.5, p.c(), xs, ys, 3.0).is_err());
        assert!(ProjectionParameters::new(p.e(), p.n(), 0.0, xs, ys, 3.0).is_err());
        assert!(ProjectionParameters::new(p.e(), p.n(), p.c(), f64::NAN, ys, 3.0).is_err());
    }
}
