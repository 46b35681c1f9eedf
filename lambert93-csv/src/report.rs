//! Rapport de conversion avec graceful degradation
//!
//! Les enregistrements non convertibles sont ignorés et détaillés ici,
//! le reste du fichier est écrit normalement.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use lambert93::ConversionError;
use serde::Serialize;

/// Nombre d'enregistrements ignorés affichés sur la console
const DISPLAY_LIMIT: usize = 20;

/// Statut global de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConversionStatus {
    /// Tous les enregistrements ont été convertis
    Success,
    /// Conversion réussie avec des enregistrements ignorés
    PartialSuccess,
    /// Aucun enregistrement converti
    Failed,
    /// Fichier sans enregistrement
    Empty,
}

/// Raison pour laquelle un enregistrement a été ignoré
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// X ou Y n'est pas un nombre
    Unparsable,
    /// Le convertisseur a rejeté le point
    Conversion,
}

/// Enregistrement ignoré avec contexte
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRecord {
    /// Numéro de ligne dans le fichier d'entrée
    pub line: u64,
    pub reason: SkipReason,
    pub message: String,
}

impl SkippedRecord {
    pub fn unparsable(line: u64, raw_x: &str, raw_y: &str) -> Self {
        Self {
            line,
            reason: SkipReason::Unparsable,
            message: format!("Not a coordinate pair: ({:?}, {:?})", raw_x, raw_y),
        }
    }

    pub fn conversion(line: u64, error: &ConversionError) -> Self {
        Self {
            line,
            reason: SkipReason::Conversion,
            message: error.to_string(),
        }
    }
}

/// Rapport complet de conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Fichier d'entrée
    pub input: String,
    /// Fichier de sortie
    pub output: String,
    /// Durée de la conversion
    pub duration_secs: f64,
    /// Statut global
    pub status: ConversionStatus,

    /// Nombre d'enregistrements lus
    pub records_read: usize,
    /// Nombre d'enregistrements convertis
    pub records_converted: usize,
    /// Nombre d'enregistrements ignorés
    pub records_skipped: usize,

    /// Détail des enregistrements ignorés
    pub skipped: Vec<SkippedRecord>,
}

impl Default for ConversionReport {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            duration_secs: 0.0,
            status: ConversionStatus::Empty,
            records_read: 0,
            records_converted: 0,
            records_skipped: 0,
            skipped: Vec::new(),
        }
    }
}

impl ConversionReport {
    /// Crée un nouveau rapport pour un couple entrée/sortie
    pub fn new(input: &Path, output: &Path) -> Self {
        Self {
            input: input.display().to_string(),
            output: output.display().to_string(),
            ..Default::default()
        }
    }

    /// Enregistre un point converti
    pub fn record_converted(&mut self) {
        self.records_read += 1;
        self.records_converted += 1;
    }

    /// Enregistre un enregistrement ignoré
    pub fn record_skipped(&mut self, skipped: SkippedRecord) {
        self.records_read += 1;
        self.records_skipped += 1;
        self.skipped.push(skipped);
    }

    /// Définit la durée de la conversion
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = if self.records_read == 0 {
            ConversionStatus::Empty
        } else if self.records_converted == 0 {
            ConversionStatus::Failed
        } else if self.records_skipped > 0 {
            ConversionStatus::PartialSuccess
        } else {
            ConversionStatus::Success
        };
    }

    /// Nombre d'enregistrements ignorés pour une raison donnée
    pub fn skipped_by(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("CONVERSION REPORT - Lambert 93 → WGS84");
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);
        println!("Input: {}", self.input);
        println!("Output: {}", self.output);

        println!("\n--- SUMMARY ---");
        println!(
            "Records: {} read, {} converted, {} skipped",
            self.records_read, self.records_converted, self.records_skipped
        );

        if !self.skipped.is_empty() {
            println!(
                "\n--- SKIPPED ({}: {} unparsable, {} rejected) ---",
                self.skipped.len(),
                self.skipped_by(SkipReason::Unparsable),
                self.skipped_by(SkipReason::Conversion)
            );
            for s in self.skipped.iter().take(DISPLAY_LIMIT) {
                println!("  line {}: {:?} {}", s.line, s.reason, s.message);
            }
            if self.skipped.len() > DISPLAY_LIMIT {
                println!("  ... and {} more", self.skipped.len() - DISPLAY_LIMIT);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} converted, {} skipped",
            self.input, self.records_converted, self.records_skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_default() {
        let report = ConversionReport::default();
        assert_eq!(report.status, ConversionStatus::Empty);
        assert_eq!(report.records_read, 0);
    }

    #[test]
    fn test_record_counts() {
        let mut report = ConversionReport::new(Path::new("in.csv"), Path::new("out.csv"));
        report.record_converted();
        report.record_converted();
        report.record_skipped(SkippedRecord::unparsable(4, "abc", "1"));
        report.record_skipped(SkippedRecord::conversion(
            5,
            &ConversionError::domain("R = 0"),
        ));

        assert_eq!(report.records_read, 4);
        assert_eq!(report.records_converted, 2);
        assert_eq!(report.records_skipped, 2);
        assert_eq!(report.skipped_by(SkipReason::Unparsable), 1);
        assert_eq!(report.skipped_by(SkipReason::Conversion), 1);
        assert!(report.skipped[1].message.contains("R = 0"));
    }

    #[test]
    fn test_finalize_success() {
        let mut report = ConversionReport::default();
        report.record_converted();
        report.finalize();
        assert_eq!(report.status, ConversionStatus::Success);
    }

    #[test]
    fn test_finalize_partial_success() {
        let mut report = ConversionReport::default();
        report.record_converted();
        report.record_skipped(SkippedRecord::unparsable(3, "", ""));
        report.finalize();
        assert_eq!(report.status, ConversionStatus::PartialSuccess);
    }

    #[test]
    fn test_finalize_failed_and_empty() {
        let mut report = ConversionReport::default();
        report.finalize();
        assert_eq!(report.status, ConversionStatus::Empty);

        report.record_skipped(SkippedRecord::unparsable(2, "x", "y"));
        report.finalize();
        assert_eq!(report.status, ConversionStatus::Failed);
    }

    #[test]
    fn test_summary_and_json() {
        let mut report = ConversionReport::new(Path::new("points.csv"), Path::new("out.csv"));
        report.record_converted();
        report.finalize();

        assert!(report.summary().contains("points.csv"));
        assert!(report.summary().contains("1 converted"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "Success");
        assert_eq!(json["records_converted"], 1);
    }
}
