use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::{inputs, sampling};
use crate::errors::PrepError;

/// Duplicate-candidate pair resolved to a single canonical file.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DuplicatePair {
    /// First-listed candidate; wins byte-size ties.
    pub first: String,
    /// Second candidate.
    pub second: String,
    /// Name the surviving candidate is renamed to.
    pub canonical: String,
}

impl Default for DuplicatePair {
    fn default() -> Self {
        Self {
            first: inputs::TOTALS_PRIMARY.to_string(),
            second: inputs::TOTALS_SECONDARY.to_string(),
            canonical: inputs::TOTALS_CANONICAL.to_string(),
        }
    }
}

/// Top-level pipeline configuration.
#[derive(Clone, Debug, Serialize)]
pub struct PrepConfig {
    /// Directory input files are read from and outputs are written to.
    pub data_dir: PathBuf,
    /// RNG seed used for sampling. Each input is drawn with a fresh RNG
    /// seeded from this value, so one file's sample never depends on
    /// whether the others were present.
    pub seed: u64,
    /// Lower bound on the sample size before clamping to the row count.
    pub min_sample_rows: usize,
    /// Divisor for the proportional part of the sample size (10 keeps roughly 10%).
    pub sample_divisor: usize,
    /// Input file names slated for sampling, processed in order.
    pub sample_inputs: Vec<String>,
    /// Duplicate pair resolved after the sampling steps.
    pub duplicates: DuplicatePair,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            seed: sampling::DEFAULT_SEED,
            min_sample_rows: sampling::MIN_SAMPLE_ROWS,
            sample_divisor: sampling::SAMPLE_DIVISOR,
            sample_inputs: inputs::DEFAULT_SAMPLE_INPUTS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            duplicates: DuplicatePair::default(),
        }
    }
}

impl PrepConfig {
    /// Set the directory inputs are resolved against.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Override the deterministic sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the sample-size policy `max(min_rows, rows / divisor)`.
    pub fn with_sample_policy(mut self, min_rows: usize, divisor: usize) -> Self {
        self.min_sample_rows = min_rows;
        self.sample_divisor = divisor;
        self
    }

    /// Replace the default sampling inputs, preserving the given order.
    pub fn with_sample_inputs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sample_inputs = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the duplicate pair resolved after sampling.
    pub fn with_duplicates(mut self, duplicates: DuplicatePair) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Resolve a file name against the data directory.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    /// Borrow the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), PrepError> {
        if self.min_sample_rows == 0 {
            return Err(PrepError::Configuration(
                "min_sample_rows must be at least 1".to_string(),
            ));
        }
        if self.sample_divisor == 0 {
            return Err(PrepError::Configuration(
                "sample_divisor must be at least 1".to_string(),
            ));
        }
        if self.duplicates.first == self.duplicates.second {
            return Err(PrepError::Configuration(format!(
                "duplicate candidates must differ, got '{}' twice",
                self.duplicates.first
            )));
        }
        if self.duplicates.canonical == self.duplicates.first
            || self.duplicates.canonical == self.duplicates.second
        {
            return Err(PrepError::Configuration(format!(
                "canonical name '{}' must differ from both duplicate candidates",
                self.duplicates.canonical
            )));
        }
        Ok(())
    }
}
