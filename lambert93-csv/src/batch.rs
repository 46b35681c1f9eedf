//! Conversion parallèle des enregistrements
//!
//! Chaque enregistrement est indépendant : parsing puis conversion par rayon,
//! l'ordre d'entrée est conservé. La politique « ignorer et compter » vit ici,
//! le convertisseur se contente de signaler ses erreurs.

use lambert93::{GeodeticConverter, GeodeticPoint};
use rayon::prelude::*;
use tracing::debug;

use crate::error::DriverError;
use crate::reader::{parse_decimal, InputRow};
use crate::report::SkippedRecord;

/// Enregistrement converti, prêt à être écrit
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedRecord {
    pub line: u64,
    /// Valeurs d'origine des colonnes conservées
    pub fields: Vec<String>,
    pub geodetic: GeodeticPoint,
}

/// Résultat du traitement d'un enregistrement
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Converted(ConvertedRecord),
    Skipped(SkippedRecord),
}

/// Parse puis convertit un enregistrement
pub fn convert_row(row: InputRow, converter: &GeodeticConverter) -> RecordOutcome {
    let (x, y) = match (parse_decimal(row.raw_x()), parse_decimal(row.raw_y())) {
        (Some(x), Some(y)) => (x, y),
        _ => {
            debug!(line = row.line, "Enregistrement non numérique ignoré");
            return RecordOutcome::Skipped(SkippedRecord::unparsable(
                row.line,
                row.raw_x(),
                row.raw_y(),
            ));
        }
    };

    match converter.convert_xy(x, y) {
        Ok(geodetic) => RecordOutcome::Converted(ConvertedRecord {
            line: row.line,
            fields: row.fields,
            geodetic,
        }),
        Err(e) => {
            debug!(line = row.line, x, y, error = %e, "Conversion impossible");
            RecordOutcome::Skipped(SkippedRecord::conversion(row.line, &e))
        }
    }
}

/// Convertit tous les enregistrements en parallèle, dans l'ordre d'entrée
///
/// Avec `jobs`, la conversion tourne dans un pool dédié de `jobs` threads.
pub fn convert_rows(
    rows: Vec<InputRow>,
    converter: &GeodeticConverter,
    jobs: Option<usize>,
) -> Result<Vec<RecordOutcome>, DriverError> {
    let work = || -> Vec<RecordOutcome> {
        rows.into_par_iter()
            .map(|row| convert_row(row, converter))
            .collect()
    };

    match jobs {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            Ok(pool.install(work))
        }
        None => Ok(work()),
    }
}
