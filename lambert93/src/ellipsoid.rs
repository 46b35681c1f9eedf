//! Définitions des ellipsoïdes

/// Ellipsoïde de référence défini par son demi-grand axe et son aplatissement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub a: f64,
    /// Aplatissement
    pub f: f64,
}

impl Ellipsoid {
    /// Ellipsoïde GRS80 (utilisé par RGF93 / Lambert 93)
    /// Note: Quasi identique à WGS84, différence < 0.1mm
    pub const GRS80: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        f: 1.0 / 298.257222101,
    };

    /// Ellipsoïde WGS84
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        f: 1.0 / 298.257223563,
    };

    /// Demi-petit axe (rayon polaire) en mètres
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// Première excentricité au carré
    pub fn e2(&self) -> f64 {
        2.0 * self.f - self.f * self.f
    }

    /// Première excentricité
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Grande normale (rayon de courbure dans le plan du premier vertical)
    pub fn grande_normale(&self, lat: f64) -> f64 {
        self.a / (1.0 - self.e2() * lat.sin().powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grs80_eccentricity() {
        // Valeur publiée par l'IGN pour Lambert 93
        assert!((Ellipsoid::GRS80.e() - 0.0818191910428158).abs() < 1e-15);
    }

    #[test]
    fn test_wgs84_close_to_grs80() {
        let db = (Ellipsoid::WGS84.b() - Ellipsoid::GRS80.b()).abs();
        assert!(db < 1e-3, "db={}", db);
    }

    #[test]
    fn test_grande_normale_equator() {
        let e = Ellipsoid::GRS80;
        assert_eq!(e.grande_normale(0.0), e.a);
        assert!(e.grande_normale(std::f64::consts::FRAC_PI_2) > e.a);
    }
}
