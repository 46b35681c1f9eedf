//! Point d'entrée CLI pour lambert93-csv

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::{Commands, ConvertArgs};

/// Convertir des coordonnées Lambert 93 (EPSG:2154) en WGS84 (EPSG:4326)
#[derive(Parser)]
#[command(name = "lambert93-csv")]
#[command(author, version)]
#[command(about = "Convertir les coordonnées Lambert 93 d'un fichier CSV en latitude/longitude WGS84")]
#[command(long_about = "Lit un fichier délimité dont les deux premières colonnes nommées sont X et Y en Lambert 93,\najoute latitude_wgs84 et longitude_wgs84 et écrit <input>_WGS84.csv.\n\nUtilisez 'point' pour convertir un seul couple X/Y.")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Sous-commande (défaut: conversion de fichier)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Arguments pour la conversion de fichier (commande par défaut)
    #[command(flatten)]
    convert: ConvertArgs,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Some(Commands::Point { x, y }) => {
            info!(x, y, "Conversion d'un point");
            cli::cmd_point(x, y)?;
        }
        None => {
            // Commande par défaut: conversion de fichier
            let input = match &cli.convert.input {
                Some(path) => path.clone(),
                None => cli::prompt_input_path()?,
            };
            info!(input = %input.display(), "Conversion Lambert 93 → WGS84");
            cli::cmd_convert(&input, &cli.convert)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Sur stderr : stdout porte le résultat de `point`
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
