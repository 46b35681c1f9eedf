//! Types d'erreurs du convertisseur de fichiers

use lambert93::ConversionError;
use thiserror::Error;

/// Erreurs fatales pour un fichier (les enregistrements invalides sont
/// simplement ignorés et comptés dans le rapport)
#[derive(Debug, Error)]
pub enum DriverError {
    /// Erreur d'I/O lors de la lecture ou de l'écriture
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Erreur du lecteur/écrivain CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Moins de deux colonnes nommées : impossible de trouver X et Y
    #[error("Expected at least 2 named columns for X and Y, found {found}")]
    MissingCoordinateColumns { found: usize },

    /// Libellé d'encodage inconnu
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Séparateur non utilisable
    #[error("Invalid delimiter: {0:?}. Expected a single ASCII character or 'tab'")]
    InvalidDelimiter(String),

    /// Impossible de créer le pool de threads
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Erreur remontée par le convertisseur
    #[error(transparent)]
    Core(#[from] ConversionError),
}
