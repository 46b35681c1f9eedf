//! Configuration du convertisseur de fichiers
//!
//! Valeurs par défaut, surchargées par les variables d'environnement
//! (`.env` compris), elles-mêmes surchargées par les options de la CLI.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use lambert93::{GeodeticConverter, IterationSettings};

use crate::error::DriverError;
use crate::writer::OutputLayout;

/// Suffixe ajouté au nom du fichier d'entrée pour le fichier de sortie
pub const OUTPUT_SUFFIX: &str = "_WGS84.csv";

/// Séparateur décimal utilisé pour écrire latitude/longitude
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecimalSeparator {
    /// Point (défaut)
    #[default]
    Point,
    /// Virgule (tableurs en français)
    Comma,
}

impl std::str::FromStr for DecimalSeparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "point" | "dot" | "." => Ok(DecimalSeparator::Point),
            "comma" | "virgule" | "," => Ok(DecimalSeparator::Comma),
            _ => Err(format!("Invalid decimal separator: {}. Use: point, comma", s)),
        }
    }
}

/// Configuration complète d'une conversion de fichier
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Séparateur de champs (entrée et sortie)
    pub delimiter: u8,
    pub output_decimal: DecimalSeparator,
    /// Encodage du fichier d'entrée (la sortie est toujours en UTF-8)
    pub encoding: &'static Encoding,
    /// Colonnes vides insérées avant latitude/longitude
    pub spacer_columns: usize,
    /// Nombre de décimales (None = précision complète)
    pub precision: Option<u8>,
    /// Nombre de threads (None = défaut rayon)
    pub jobs: Option<usize>,
    pub iteration: IterationSettings,
}

/// Surcharges issues de la ligne de commande
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output: Option<PathBuf>,
    pub delimiter: Option<String>,
    pub decimal: Option<DecimalSeparator>,
    pub encoding: Option<String>,
    pub spacers: Option<usize>,
    pub precision: Option<u8>,
    pub jobs: Option<usize>,
    pub tolerance: Option<f64>,
    pub max_iterations: Option<u32>,
}

impl DriverConfig {
    /// Configuration par défaut pour un fichier d'entrée
    pub fn new(input: &Path) -> Self {
        Self {
            input: input.to_path_buf(),
            output: default_output_path(input),
            delimiter: b';',
            output_decimal: DecimalSeparator::Point,
            encoding: encoding_rs::UTF_8,
            spacer_columns: 2,
            precision: None,
            jobs: None,
            iteration: IterationSettings::default(),
        }
    }

    /// Charge la configuration depuis les variables d'environnement
    pub fn from_env(input: &Path) -> Self {
        Self::from_lookup(input, |key| std::env::var(key).ok())
    }

    /// Variante de [`from_env`](Self::from_env) avec une source de variables explicite
    pub fn from_lookup(input: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::new(input);
        Self {
            delimiter: lookup("LAMBERT93_DELIMITER")
                .and_then(|d| parse_delimiter(&d).ok())
                .unwrap_or(defaults.delimiter),
            output_decimal: lookup("LAMBERT93_DECIMAL")
                .and_then(|d| d.parse().ok())
                .unwrap_or(defaults.output_decimal),
            encoding: lookup("LAMBERT93_ENCODING")
                .and_then(|label| encoding_for_label(&label).ok())
                .unwrap_or(defaults.encoding),
            spacer_columns: lookup("LAMBERT93_SPACERS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.spacer_columns),
            ..defaults
        }
    }

    /// Applique les options de la CLI (prioritaires sur l'environnement)
    pub fn apply(mut self, overrides: ConfigOverrides) -> Result<Self, DriverError> {
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(delimiter) = overrides.delimiter {
            self.delimiter = parse_delimiter(&delimiter)?;
        }
        if let Some(decimal) = overrides.decimal {
            self.output_decimal = decimal;
        }
        if let Some(label) = overrides.encoding {
            self.encoding = encoding_for_label(&label)?;
        }
        if let Some(spacers) = overrides.spacers {
            self.spacer_columns = spacers;
        }
        if overrides.precision.is_some() {
            self.precision = overrides.precision;
        }
        if overrides.jobs.is_some() {
            self.jobs = overrides.jobs;
        }
        if overrides.tolerance.is_some() || overrides.max_iterations.is_some() {
            self.iteration = IterationSettings::new(
                overrides.tolerance.unwrap_or(self.iteration.tolerance()),
                overrides
                    .max_iterations
                    .unwrap_or(self.iteration.max_iterations()),
            )?;
        }
        Ok(self)
    }

    /// Convertisseur Lambert 93 avec les réglages de convergence configurés
    pub fn converter(&self) -> GeodeticConverter {
        GeodeticConverter::lambert93().with_settings(self.iteration)
    }

    /// Mise en forme des colonnes de sortie
    pub fn layout(&self) -> OutputLayout {
        OutputLayout {
            delimiter: self.delimiter,
            decimal: self.output_decimal,
            spacer_columns: self.spacer_columns,
            precision: self.precision,
        }
    }
}

/// Chemin de sortie : nom complet du fichier d'entrée suffixé par `_WGS84.csv`
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

/// Interprète un séparateur de champs ("tab" ou un caractère ASCII)
pub fn parse_delimiter(raw: &str) -> Result<u8, DriverError> {
    if matches!(raw, "tab" | "\\t") {
        return Ok(b'\t');
    }

    match raw.as_bytes() {
        [b] if b.is_ascii() && !matches!(*b, b'"' | b'\n' | b'\r') => Ok(*b),
        _ => Err(DriverError::InvalidDelimiter(raw.to_string())),
    }
}

/// Résout un libellé d'encodage WHATWG (utf-8, latin1, windows-1252...)
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, DriverError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| DriverError::UnknownEncoding(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("points.csv")),
            PathBuf::from("points.csv_WGS84.csv")
        );
        assert_eq!(
            default_output_path(Path::new("/data/releves")),
            PathBuf::from("/data/releves_WGS84.csv")
        );
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("\"").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_decimal_separator_from_str() {
        assert_eq!("point".parse::<DecimalSeparator>(), Ok(DecimalSeparator::Point));
        assert_eq!("COMMA".parse::<DecimalSeparator>(), Ok(DecimalSeparator::Comma));
        assert_eq!(",".parse::<DecimalSeparator>(), Ok(DecimalSeparator::Comma));
        assert!("semicolon".parse::<DecimalSeparator>().is_err());
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!(encoding_for_label("latin1").unwrap(), encoding_rs::WINDOWS_1252);
        assert_eq!(encoding_for_label("UTF-8").unwrap(), encoding_rs::UTF_8);
        assert!(matches!(
            encoding_for_label("klingon"),
            Err(DriverError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("LAMBERT93_DELIMITER", ","),
            ("LAMBERT93_DECIMAL", "comma"),
            ("LAMBERT93_ENCODING", "latin1"),
            ("LAMBERT93_SPACERS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = DriverConfig::from_lookup(Path::new("in.csv"), |k| {
            vars.get(k).map(|v| v.to_string())
        });

        assert_eq!(config.delimiter, b',');
        assert_eq!(config.output_decimal, DecimalSeparator::Comma);
        assert_eq!(config.encoding, encoding_rs::WINDOWS_1252);
        // Valeur invalide : on garde le défaut
        assert_eq!(config.spacer_columns, 2);
        assert_eq!(config.output, PathBuf::from("in.csv_WGS84.csv"));
    }

    #[test]
    fn test_overrides_win() {
        let config = DriverConfig::new(Path::new("in.csv"))
            .apply(ConfigOverrides {
                output: Some(PathBuf::from("out.csv")),
                delimiter: Some("tab".into()),
                spacers: Some(0),
                precision: Some(7),
                max_iterations: Some(12),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(config.output, PathBuf::from("out.csv"));
        assert_eq!(config.delimiter, b'\t');
        assert_eq!(config.spacer_columns, 0);
        assert_eq!(config.precision, Some(7));
        assert_eq!(config.iteration.max_iterations(), 12);
        assert_eq!(config.iteration.tolerance(), 1e-12);
        assert_eq!(config.converter().settings().max_iterations(), 12);
    }

    #[test]
    fn test_invalid_overrides() {
        let base = DriverConfig::new(Path::new("in.csv"));
        assert!(base
            .clone()
            .apply(ConfigOverrides {
                encoding: Some("nope".into()),
                ..Default::default()
            })
            .is_err());
        assert!(matches!(
            base.apply(ConfigOverrides {
                tolerance: Some(-1.0),
                ..Default::default()
            }),
            Err(DriverError::Core(_))
        ));
    }
}
