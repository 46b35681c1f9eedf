//! Lecture du fichier délimité d'entrée
//!
//! - Décodage avec l'encodage configuré (BOM détecté)
//! - Les colonnes sans nom sont écartées
//! - X et Y sont les deux premières colonnes nommées

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::Encoding;
use tracing::{debug, warn};

use crate::error::DriverError;

/// Table lue depuis le fichier d'entrée, restreinte aux colonnes nommées
#[derive(Debug, Clone, PartialEq)]
pub struct InputTable {
    /// Noms des colonnes conservées, X et Y en tête
    pub columns: Vec<String>,
    pub rows: Vec<InputRow>,
}

/// Un enregistrement, limité aux colonnes conservées
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    /// Numéro de ligne dans le fichier (1 = en-tête)
    pub line: u64,
    /// Valeurs brutes, alignées sur `InputTable::columns`
    pub fields: Vec<String>,
}

impl InputRow {
    /// Valeur brute de X (première colonne conservée)
    pub fn raw_x(&self) -> &str {
        &self.fields[0]
    }

    /// Valeur brute de Y (deuxième colonne conservée)
    pub fn raw_y(&self) -> &str {
        &self.fields[1]
    }
}

/// Lit et décode un fichier délimité
pub fn read_table(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<InputTable, DriverError> {
    let bytes = std::fs::read(path)?;
    let text = decode(&bytes, encoding);
    parse_table(&text, delimiter)
}

/// Décode les bytes avec l'encodage demandé (un BOM a priorité)
pub fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Cow<'a, str> {
    let (decoded, actual, had_errors) = encoding.decode(bytes);
    if actual != encoding {
        debug!(
            requested = encoding.name(),
            detected = actual.name(),
            "Encodage imposé par le BOM"
        );
    }
    if had_errors {
        warn!(
            encoding = actual.name(),
            "Séquences invalides remplacées lors du décodage"
        );
    }
    decoded
}

/// Parse le contenu texte d'un fichier délimité avec en-tête
pub fn parse_table(text: &str, delimiter: u8) -> Result<InputTable, DriverError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();

    // Filtrer les colonnes vides (sans nom ou juste des espaces)
    let kept: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.trim().is_empty())
        .map(|(i, _)| i)
        .collect();

    if kept.len() < 2 {
        return Err(DriverError::MissingCoordinateColumns { found: kept.len() });
    }

    let columns = kept.iter().map(|&i| headers[i].to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        // Les enregistrements courts sont complétés par des champs vides
        let fields = kept
            .iter()
            .map(|&i| record.get(i).unwrap_or("").to_string())
            .collect();
        rows.push(InputRow { line, fields });
    }

    debug!(
        columns = kept.len(),
        dropped = headers.len() - kept.len(),
        rows = rows.len(),
        "Table lue"
    );

    Ok(InputTable { columns, rows })
}

/// Parse un nombre décimal avec `.` ou `,` comme séparateur
/// - "652709,401" → 652709.401
/// - " +6862421.769 " → 6862421.769
/// - "", "abc", "1.2.3", "nan" → None
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let v = raw.trim();
    let (negative, digits) = match v.as_bytes().first() {
        Some(b'+') => (false, &v[1..]),
        Some(b'-') => (true, &v[1..]),
        _ => (false, v),
    };
    if digits.is_empty() || digits.starts_with(|c: char| c == '+' || c == '-') {
        return None;
    }

    let normalized: Cow<str> = if digits.contains(',') {
        Cow::Owned(digits.replace(',', "."))
    } else {
        Cow::Borrowed(digits)
    };

    let value: f64 = fast_float::parse(normalized.as_ref()).ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}
