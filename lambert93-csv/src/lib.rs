//! # lambert93-csv
//!
//! Conversion de fichiers délimités (CSV) contenant des coordonnées Lambert 93
//! vers WGS84, autour du convertisseur pur du crate `lambert93`.
//!
//! ## Features
//!
//! - X/Y détectés comme les deux premières colonnes nommées
//! - Séparateur décimal `.` ou `,` accepté en entrée
//! - Conversion parallèle (rayon), ordre des lignes conservé
//! - Lignes invalides ignorées et détaillées dans un rapport JSON
//!
//! ## Usage CLI
//!
//! ```bash
//! # Crée points.csv_WGS84.csv
//! lambert93-csv --input points.csv
//!
//! # Fichier latin1 séparé par des virgules, sortie à virgule décimale
//! lambert93-csv -i export.csv -d , --encoding latin1 --decimal comma --report rapport.json
//!
//! # Un seul point
//! lambert93-csv point 652709.401 6862421.769
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod reader;
pub mod report;
pub mod writer;

pub use config::{ConfigOverrides, DecimalSeparator, DriverConfig};
pub use error::DriverError;
pub use report::{ConversionReport, ConversionStatus, SkipReason};

use std::time::Instant;

use batch::RecordOutcome;
use reader::InputTable;
use tracing::info;

/// Convertit un fichier selon la configuration et retourne le rapport.
///
/// # Errors
///
/// Retourne `DriverError` si le fichier est illisible, s'il n'a pas deux
/// colonnes nommées pour X et Y, ou si la sortie ne peut pas être écrite.
/// Les enregistrements invalides ne sont pas des erreurs : ils sont comptés
/// dans le rapport.
pub fn run(config: &DriverConfig) -> Result<ConversionReport, DriverError> {
    let start = Instant::now();
    let mut report = ConversionReport::new(&config.input, &config.output);

    info!(
        input = %config.input.display(),
        encoding = config.encoding.name(),
        "Lecture du fichier"
    );
    let InputTable { columns, rows } =
        reader::read_table(&config.input, config.delimiter, config.encoding)?;

    info!(
        rows = rows.len(),
        x = %columns[0],
        y = %columns[1],
        "Colonnes X/Y détectées"
    );

    let converter = config.converter();
    let outcomes = batch::convert_rows(rows, &converter, config.jobs)?;

    let mut converted = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            RecordOutcome::Converted(record) => {
                report.record_converted();
                converted.push(record);
            }
            RecordOutcome::Skipped(skipped) => report.record_skipped(skipped),
        }
    }

    writer::write_file(&config.output, &columns, &converted, &config.layout())?;

    report.set_duration(start.elapsed());
    report.finalize();

    info!(
        output = %config.output.display(),
        converted = report.records_converted,
        skipped = report.records_skipped,
        "Conversion terminée"
    );

    Ok(report)
}
