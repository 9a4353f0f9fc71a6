use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::PrepConfig;
use crate::dedup::{self, DedupOutcome};
use crate::errors::PrepError;
use crate::report::sample_output_name;
use crate::sampler;
use crate::table::CsvTable;

/// Per-input outcome of the sampling stage.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub enum SampleOutcome {
    /// The input loaded and a sample file was written next to it.
    Sampled {
        source_rows: usize,
        source_columns: usize,
        sample_rows: usize,
        output: String,
    },
    /// The input file did not exist; nothing was written.
    Missing,
    /// Loading, sampling, or writing failed; later inputs still ran.
    Failed { reason: String },
}

/// A produced file that exists on disk after the run.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct OutputFile {
    /// Bare file name inside the data directory.
    pub name: String,
    /// Size on disk in bytes.
    pub bytes: u64,
}

/// Everything a completed run reports: per-input sampling outcomes, the
/// duplicate cleanup result, and the produced files found on disk.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    /// Configuration the run executed with.
    pub config: PrepConfig,
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// Total run duration in milliseconds.
    pub elapsed_ms: u64,
    /// Sampling outcome per input, in configured order.
    pub samples: IndexMap<String, SampleOutcome>,
    /// Result of collapsing the duplicate pair.
    pub dedup: DedupOutcome,
    /// Expected output files that exist after the run, with byte sizes.
    pub outputs: Vec<OutputFile>,
}

impl RunReport {
    /// Warnings for inputs and duplicate candidates that were absent.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (name, outcome) in &self.samples {
            if matches!(outcome, SampleOutcome::Missing) {
                warnings.push(format!("input file '{name}' not found, skipped"));
            }
        }
        for name in self.dedup.missing_candidates() {
            warnings.push(format!(
                "duplicate candidate '{name}' not found, cleanup skipped"
            ));
        }
        warnings
    }
}

/// Orchestrates a full preparation run over one data directory: sample every
/// configured input, collapse the duplicate pair, then report what exists.
pub struct SamplePrep {
    config: PrepConfig,
}

impl SamplePrep {
    /// Validate `config` and wrap it into a ready-to-run preparer.
    pub fn new(config: PrepConfig) -> Result<Self, PrepError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration this preparer runs with.
    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Execute the full run.
    ///
    /// Per-input failures and duplicate-cleanup failures are recorded in the
    /// report instead of aborting, so this always returns a complete report.
    pub fn run(&self) -> RunReport {
        let started_at = Utc::now();
        let timer = Instant::now();

        let mut samples = IndexMap::new();
        for name in &self.config.sample_inputs {
            samples.insert(name.clone(), self.sample_one(name));
        }

        let dedup = dedup::resolve_duplicates(self.config.data_dir(), &self.config.duplicates);
        if let DedupOutcome::Failed { reason } = &dedup {
            eprintln!("[rowsample] duplicate cleanup failed: {reason}");
        }

        let outputs = self.scan_outputs();

        RunReport {
            config: self.config.clone(),
            started_at,
            elapsed_ms: timer.elapsed().as_millis() as u64,
            samples,
            dedup,
            outputs,
        }
    }

    fn sample_one(&self, name: &str) -> SampleOutcome {
        let path = self.config.resolve(name);
        if !path.exists() {
            warn!(input = %name, "input file not found, skipped");
            return SampleOutcome::Missing;
        }
        match self.sample_file(name, &path) {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("[rowsample] sampling '{name}' failed: {err}");
                SampleOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn sample_file(&self, name: &str, path: &Path) -> Result<SampleOutcome, PrepError> {
        let table = CsvTable::load(path)?;
        let amount = sampler::sample_size(
            table.row_count(),
            self.config.min_sample_rows,
            self.config.sample_divisor,
        );
        let indices = sampler::draw_sample_indices(table.row_count(), amount, self.config.seed);
        let output = sample_output_name(name);
        table.write_subset(&self.config.resolve(&output), &indices)?;
        debug!(
            input = %name,
            source_rows = table.row_count(),
            sample_rows = indices.len(),
            output = %output,
            "wrote sample file"
        );
        Ok(SampleOutcome::Sampled {
            source_rows: table.row_count(),
            source_columns: table.column_count(),
            sample_rows: indices.len(),
            output,
        })
    }

    fn scan_outputs(&self) -> Vec<OutputFile> {
        let mut expected: IndexSet<String> = self
            .config
            .sample_inputs
            .iter()
            .map(|name| sample_output_name(name))
            .collect();
        expected.insert(self.config.duplicates.canonical.clone());

        let mut outputs = Vec::new();
        for name in expected {
            if let Ok(meta) = fs::metadata(self.config.resolve(&name)) {
                outputs.push(OutputFile {
                    name,
                    bytes: meta.len(),
                });
            }
        }
        outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_with_rows(rows: usize) -> String {
        let mut body = String::from("id,value\n");
        for idx in 0..rows {
            body.push_str(&format!("{idx},v{idx}\n"));
        }
        body
    }

    #[test]
    fn every_missing_file_surfaces_as_its_own_warning() {
        let dir = tempfile::tempdir().unwrap();
        let config = PrepConfig::default().with_data_dir(dir.path());
        let report = SamplePrep::new(config).unwrap().run();

        let warnings = report.warnings();
        assert_eq!(warnings.len(), 5);
        assert!(warnings[..3]
            .iter()
            .all(|warning| warning.ends_with("not found, skipped")));
        assert!(warnings[3..]
            .iter()
            .all(|warning| warning.ends_with("cleanup skipped")));
        assert!(report.outputs.is_empty());
    }

    #[test]
    fn a_broken_input_does_not_stop_the_remaining_inputs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("first.csv"), "a,b\n1\n").unwrap();
        fs::write(dir.path().join("second.csv"), csv_with_rows(40)).unwrap();

        let config = PrepConfig::default()
            .with_data_dir(dir.path())
            .with_sample_policy(4, 10)
            .with_sample_inputs(["first.csv", "second.csv"]);
        let report = SamplePrep::new(config).unwrap().run();

        assert!(matches!(
            report.samples["first.csv"],
            SampleOutcome::Failed { .. }
        ));
        assert_eq!(
            report.samples["second.csv"],
            SampleOutcome::Sampled {
                source_rows: 40,
                source_columns: 2,
                sample_rows: 4,
                output: "second_sample.csv".to_string(),
            }
        );
        assert!(dir.path().join("second_sample.csv").exists());
        assert!(!dir.path().join("first_sample.csv").exists());
    }

    #[test]
    fn produced_files_cover_samples_and_the_canonical_totals() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rows.csv"), csv_with_rows(30)).unwrap();
        fs::write(dir.path().join("df_total_0910.csv"), "id\n1\n").unwrap();
        fs::write(dir.path().join("df_total_0910_.csv"), "id\n1\n2\n").unwrap();

        let config = PrepConfig::default()
            .with_data_dir(dir.path())
            .with_sample_policy(3, 10)
            .with_sample_inputs(["rows.csv"]);
        let report = SamplePrep::new(config).unwrap().run();

        assert!(matches!(report.dedup, DedupOutcome::Resolved { .. }));
        let names: Vec<&str> = report
            .outputs
            .iter()
            .map(|output| output.name.as_str())
            .collect();
        assert_eq!(names, ["rows_sample.csv", "df_total_main.csv"]);
        assert!(report.outputs.iter().all(|output| output.bytes > 0));
        assert!(report.warnings().is_empty());
    }
}
