//! Types d'erreurs pour le crate lambert93

use thiserror::Error;

/// Erreurs pouvant survenir lors de la conversion Lambert 93 → WGS84
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Argument hors domaine (point confondu avec l'origine, log ou puissance
    /// d'un nombre non positif, entrée non finie)
    #[error("Domain error: {reason}")]
    Domain { reason: String },

    /// Le raffinement de la latitude n'a pas atteint la tolérance
    #[error("Latitude did not converge after {iterations} iterations (last step {residual:e} rad)")]
    NonConvergence { iterations: u32, residual: f64 },

    /// Jeu de paramètres ou de réglages rejeté
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

impl ConversionError {
    /// Crée une erreur de domaine avec contexte
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::Domain {
            reason: reason.into(),
        }
    }

    /// Crée une erreur de paramètres invalides
    pub fn invalid_parameters(reason: impl Into<String>) -> Self {
        Self::InvalidParameters(reason.into())
    }
}
