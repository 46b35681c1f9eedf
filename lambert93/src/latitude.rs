//! Latitude isométrique et inversion itérative vers la latitude géographique
//!
//! L'inversion n'a pas de forme fermée : on part de l'approximation sphérique
//! puis on raffine par point fixe jusqu'à ce que le pas passe sous la tolérance.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::error::ConversionError;

/// Tolérance par défaut sur le pas d'itération (radians)
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Nombre maximal d'itérations par défaut
pub const DEFAULT_MAX_ITERATIONS: u32 = 30;

/// Réglages de la boucle de convergence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationSettings {
    tolerance: f64,
    max_iterations: u32,
}

impl Default for IterationSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl IterationSettings {
    /// Crée des réglages validés
    pub fn new(tolerance: f64, max_iterations: u32) -> Result<Self, ConversionError> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConversionError::invalid_parameters(format!(
                "tolerance must be a positive finite number, got {}",
                tolerance
            )));
        }
        if max_iterations == 0 {
            return Err(ConversionError::invalid_parameters(
                "max_iterations must be at least 1",
            ));
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

/// Latitude géographique obtenue par raffinement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatitudeSolution {
    /// Latitude en radians
    pub latitude: f64,
    /// Nombre de raffinements effectués
    pub iterations: u32,
    /// Dernier pas |φk+1 - φk| en radians
    pub residual: f64,
}

/// Calcule la latitude isométrique
pub fn isometric_latitude(lat: f64, e: f64) -> f64 {
    let sin_lat = lat.sin();
    let term = ((1.0 - e * sin_lat) / (1.0 + e * sin_lat)).powf(e / 2.0);
    ((FRAC_PI_4 + lat / 2.0).tan() * term).ln()
}

/// Suite des latitudes φ1, φ2, ... produites par le point fixe
///
/// La graine φ0 (approximation sphérique) est disponible via [`seed`](Self::seed).
/// L'itérateur s'arrête après la première erreur de domaine.
#[derive(Debug, Clone)]
pub struct LatitudeRefinement {
    exp_iso: f64,
    e: f64,
    seed: f64,
    current: f64,
    failed: bool,
}

impl LatitudeRefinement {
    pub fn new(iso_lat: f64, e: f64) -> Self {
        let exp_iso = iso_lat.exp();
        let seed = 2.0 * exp_iso.atan() - FRAC_PI_2;
        Self {
            exp_iso,
            e,
            seed,
            current: seed,
            failed: false,
        }
    }

    /// Latitude sphérique de départ
    pub fn seed(&self) -> f64 {
        self.seed
    }
}

impl Iterator for LatitudeRefinement {
    type Item = Result<f64, ConversionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let e_sin = self.e * self.current.sin();
        let ratio = (1.0 + e_sin) / (1.0 - e_sin);
        if !(ratio.is_finite() && ratio > 0.0) {
            self.failed = true;
            return Some(Err(ConversionError::domain(format!(
                "conformal ratio (1 + e sin φ) / (1 - e sin φ) = {} at φ = {}",
                ratio, self.current
            ))));
        }

        self.current = 2.0 * (ratio.powf(self.e / 2.0) * self.exp_iso).atan() - FRAC_PI_2;
        Some(Ok(self.current))
    }
}

/// Calcule la latitude depuis la latitude isométrique (itératif)
///
/// # Errors
///
/// - `Domain` si la latitude isométrique n'est pas finie ou si le rapport
///   conforme devient non positif
/// - `NonConvergence` si la tolérance n'est pas atteinte en `max_iterations` pas
pub fn solve_latitude(
    iso_lat: f64,
    e: f64,
    settings: &IterationSettings,
) -> Result<LatitudeSolution, ConversionError> {
    if !iso_lat.is_finite() {
        return Err(ConversionError::domain(format!(
            "isometric latitude is not finite ({})",
            iso_lat
        )));
    }

    let refinement = LatitudeRefinement::new(iso_lat, e);
    let mut previous = refinement.seed();
    let mut residual = f64::INFINITY;

    for (i, next) in refinement
        .take(settings.max_iterations as usize)
        .enumerate()
    {
        let lat = next?;
        residual = (lat - previous).abs();
        if residual < settings.tolerance {
            return Ok(LatitudeSolution {
                latitude: lat,
                iterations: i as u32 + 1,
                residual,
            });
        }
        previous = lat;
    }

    Err(ConversionError::NonConvergence {
        iterations: settings.max_iterations,
        residual,
    })
}
