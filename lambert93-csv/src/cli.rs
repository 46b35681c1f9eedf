//! Définition et implémentation des commandes CLI
//!
//! - commande par défaut : fichier CSV Lambert 93 → CSV avec latitude/longitude
//! - `point` : un seul couple X/Y

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use lambert93_csv::{ConfigOverrides, ConversionStatus, DecimalSeparator, DriverConfig};
use tracing::info;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single Lambert-93 point and print "latitude;longitude"
    Point {
        /// X (easting) in metres
        #[arg(allow_hyphen_values = true)]
        x: f64,

        /// Y (northing) in metres
        #[arg(allow_hyphen_values = true)]
        y: f64,
    },
}

/// Options de la conversion de fichier (commande par défaut)
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Input file with Lambert-93 X/Y in its first two named columns (prompted if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (défaut : <input>_WGS84.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Field delimiter, a single character or "tab" (défaut : env LAMBERT93_DELIMITER / ;)
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Decimal separator for latitude/longitude: point, comma (défaut : env LAMBERT93_DECIMAL / point)
    #[arg(long)]
    pub decimal: Option<DecimalSeparator>,

    /// Input encoding label, e.g. utf-8, latin1 (défaut : env LAMBERT93_ENCODING / utf-8)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Empty columns inserted before latitude/longitude (défaut : env LAMBERT93_SPACERS / 2)
    #[arg(long)]
    pub spacers: Option<usize>,

    /// Decimal places for latitude/longitude (défaut : précision complète)
    #[arg(long)]
    pub precision: Option<u8>,

    /// Number of worker threads
    #[arg(long, alias = "threads")]
    pub jobs: Option<usize>,

    /// Convergence tolerance on latitude, in radians (défaut : 1e-12)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Maximum latitude refinement iterations (défaut : 30)
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Write the conversion report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl ConvertArgs {
    /// Surcharges de configuration portées par la ligne de commande
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output: self.output.clone(),
            delimiter: self.delimiter.clone(),
            decimal: self.decimal,
            encoding: self.encoding.clone(),
            spacers: self.spacers,
            precision: self.precision,
            jobs: self.jobs,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}

/// Exécute la conversion d'un fichier
pub fn cmd_convert(input: &Path, args: &ConvertArgs) -> Result<()> {
    let config = DriverConfig::from_env(input)
        .apply(args.overrides())
        .context("Invalid configuration")?;

    println!("=== Lambert 93 → WGS84 ===");
    println!("Input: {}", config.input.display());
    println!("Output: {}", config.output.display());
    println!("Delimiter: {:?}", config.delimiter as char);
    println!("Encoding: {}", config.encoding.name());
    println!("Decimal separator: {:?}", config.output_decimal);

    let report = lambert93_csv::run(&config)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    report.display();

    if let Some(path) = &args.report {
        report
            .save_to_file(path)
            .with_context(|| format!("Cannot write report to {}", path.display()))?;
        info!(report = %path.display(), "Rapport JSON écrit");
    }

    if report.status == ConversionStatus::Failed {
        anyhow::bail!(
            "No record could be converted ({} skipped)",
            report.records_skipped
        );
    }

    println!(
        "Conversion terminée avec succès ! Fichier créé : {}",
        config.output.display()
    );
    Ok(())
}

/// Convertit et affiche un point
pub fn cmd_point(x: f64, y: f64) -> Result<()> {
    let geo = lambert93::to_wgs84(x, y)
        .with_context(|| format!("Cannot convert ({}, {})", x, y))?;
    println!("{};{}", geo.latitude, geo.longitude);
    Ok(())
}

/// Demande le chemin du fichier d'entrée sur l'entrée standard
pub fn prompt_input_path() -> Result<PathBuf> {
    print!("Chemin (ou nom) du fichier CSV (Lambert-93) : ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Cannot read the input path from stdin")?;

    let path = line.trim();
    if path.is_empty() {
        anyhow::bail!("No input file given");
    }
    Ok(PathBuf::from(path))
}
