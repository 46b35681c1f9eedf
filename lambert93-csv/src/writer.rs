//! Écriture du fichier de sortie
//!
//! Colonnes conservées, puis `spacer_columns` colonnes vides, puis
//! `latitude_wgs84` et `longitude_wgs84`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::batch::ConvertedRecord;
use crate::config::DecimalSeparator;
use crate::error::DriverError;

pub const LATITUDE_COLUMN: &str = "latitude_wgs84";
pub const LONGITUDE_COLUMN: &str = "longitude_wgs84";

/// Mise en forme des colonnes ajoutées
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLayout {
    pub delimiter: u8,
    pub decimal: DecimalSeparator,
    pub spacer_columns: usize,
    pub precision: Option<u8>,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            delimiter: b';',
            decimal: DecimalSeparator::Point,
            spacer_columns: 2,
            precision: None,
        }
    }
}

/// Formate une coordonnée (précision complète par défaut)
pub fn format_coordinate(value: f64, precision: Option<u8>, decimal: DecimalSeparator) -> String {
    let text = match precision {
        Some(p) => format!("{:.*}", p as usize, value),
        None => value.to_string(),
    };
    match decimal {
        DecimalSeparator::Point => text,
        DecimalSeparator::Comma => text.replace('.', ","),
    }
}

/// Écrit l'en-tête et les enregistrements convertis
pub fn write_table<W: Write>(
    out: W,
    columns: &[String],
    records: &[ConvertedRecord],
    layout: &OutputLayout,
) -> Result<(), DriverError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(layout.delimiter)
        .from_writer(out);

    let spacers = std::iter::repeat("").take(layout.spacer_columns);

    let header = columns
        .iter()
        .map(String::as_str)
        .chain(spacers.clone())
        .chain([LATITUDE_COLUMN, LONGITUDE_COLUMN]);
    writer.write_record(header)?;

    for record in records {
        let lat = format_coordinate(record.geodetic.latitude, layout.precision, layout.decimal);
        let lon = format_coordinate(record.geodetic.longitude, layout.precision, layout.decimal);
        let row = record
            .fields
            .iter()
            .map(String::as_str)
            .chain(spacers.clone())
            .chain([lat.as_str(), lon.as_str()]);
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Écrit le fichier de sortie
pub fn write_file(
    path: &Path,
    columns: &[String],
    records: &[ConvertedRecord],
    layout: &OutputLayout,
) -> Result<(), DriverError> {
    let file = File::create(path)?;
    write_table(BufWriter::new(file), columns, records, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambert93::GeodeticPoint;

    fn record(fields: &[&str], lat: f64, lon: f64) -> ConvertedRecord {
        ConvertedRecord {
            line: 2,
            fields: fields.iter().map(|s| s.to_string()).collect(),
            geodetic: GeodeticPoint::new(lat, lon),
        }
    }

    fn render(columns: &[&str], records: &[ConvertedRecord], layout: &OutputLayout) -> String {
        let columns: Vec<String> = columns.iter().map(|s| s.to_string()).collect();
        let mut buf = Vec::new();
        write_table(&mut buf, &columns, records, layout).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(48.5, None, DecimalSeparator::Point), "48.5");
        assert_eq!(format_coordinate(48.85669908, Some(3), DecimalSeparator::Point), "48.857");
        assert_eq!(format_coordinate(2.5, Some(2), DecimalSeparator::Comma), "2,50");
        assert_eq!(format_coordinate(-0.25, None, DecimalSeparator::Comma), "-0,25");
    }

    #[test]
    fn test_layout_with_spacers() {
        let out = render(
            &["X", "Y", "nom"],
            &[record(&["1", "2", "Paris"], 48.5, 2.25)],
            &OutputLayout::default(),
        );
        assert_eq!(
            out,
            "X;Y;nom;;;latitude_wgs84;longitude_wgs84\n1;2;Paris;;;48.5;2.25\n"
        );
    }

    #[test]
    fn test_layout_without_spacers() {
        let layout = OutputLayout {
            spacer_columns: 0,
            ..Default::default()
        };
        let out = render(&["X", "Y"], &[record(&["1", "2"], 46.5, 3.0)], &layout);
        assert_eq!(out, "X;Y;latitude_wgs84;longitude_wgs84\n1;2;46.5;3\n");
    }

    #[test]
    fn test_comma_output_is_quoted_when_it_clashes() {
        let layout = OutputLayout {
            delimiter: b',',
            decimal: DecimalSeparator::Comma,
            spacer_columns: 0,
            precision: Some(1),
        };
        let out = render(&["X", "Y"], &[record(&["1", "2"], 46.5, 3.0)], &layout);
        assert_eq!(out, "X,Y,latitude_wgs84,longitude_wgs84\n1,2,\"46,5\",\"3,0\"\n");
    }

    #[test]
    fn test_header_only() {
        let out = render(&["X", "Y"], &[], &OutputLayout::default());
        assert_eq!(out, "X;Y;;;latitude_wgs84;longitude_wgs84\n");
    }
}
