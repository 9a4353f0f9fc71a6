use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::DuplicatePair;
use crate::errors::PrepError;

/// Outcome of collapsing a duplicated totals pair into one canonical file.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub enum DedupOutcome {
    /// Both candidates were present; the smaller one survived under the
    /// canonical name and the other was deleted.
    Resolved {
        kept: String,
        kept_bytes: u64,
        removed: String,
        removed_bytes: u64,
        canonical: String,
    },
    /// One or both candidates were absent, so nothing was renamed or deleted.
    Skipped { missing: Vec<String> },
    /// A metadata read or file operation failed partway through.
    Failed { reason: String },
}

impl DedupOutcome {
    /// Candidate names that were absent, empty unless the cleanup was skipped.
    pub fn missing_candidates(&self) -> &[String] {
        match self {
            DedupOutcome::Skipped { missing } => missing,
            _ => &[],
        }
    }
}

/// Collapse the duplicate pair inside `dir` down to `pair.canonical`.
///
/// The candidate with the smaller byte size is renamed to the canonical name
/// and the other is deleted; equal sizes keep the first-listed candidate.
/// Missing candidates downgrade the whole operation to
/// [`DedupOutcome::Skipped`], and filesystem failures are reported through
/// [`DedupOutcome::Failed`] rather than surfaced as hard errors.
pub fn resolve_duplicates(dir: &Path, pair: &DuplicatePair) -> DedupOutcome {
    let first_path = dir.join(&pair.first);
    let second_path = dir.join(&pair.second);

    let mut missing = Vec::new();
    for (name, path) in [(&pair.first, &first_path), (&pair.second, &second_path)] {
        if !path.exists() {
            warn!(candidate = %name, "duplicate candidate not found, cleanup skipped");
            missing.push(name.clone());
        }
    }
    if !missing.is_empty() {
        return DedupOutcome::Skipped { missing };
    }

    match collapse_pair(dir, pair, &first_path, &second_path) {
        Ok(outcome) => outcome,
        Err(err) => DedupOutcome::Failed {
            reason: err.to_string(),
        },
    }
}

fn collapse_pair(
    dir: &Path,
    pair: &DuplicatePair,
    first_path: &Path,
    second_path: &Path,
) -> Result<DedupOutcome, PrepError> {
    let first_bytes = fs::metadata(first_path)?.len();
    let second_bytes = fs::metadata(second_path)?.len();

    let keep_first = first_bytes <= second_bytes;
    let (kept, kept_bytes, kept_path) = if keep_first {
        (&pair.first, first_bytes, first_path)
    } else {
        (&pair.second, second_bytes, second_path)
    };
    let (removed, removed_bytes, removed_path) = if keep_first {
        (&pair.second, second_bytes, second_path)
    } else {
        (&pair.first, first_bytes, first_path)
    };

    fs::rename(kept_path, dir.join(&pair.canonical))?;
    fs::remove_file(removed_path)?;
    debug!(
        kept = %kept,
        kept_bytes,
        removed = %removed,
        canonical = %pair.canonical,
        "collapsed duplicate pair"
    );

    Ok(DedupOutcome::Resolved {
        kept: kept.clone(),
        kept_bytes,
        removed: removed.clone(),
        removed_bytes,
        canonical: pair.canonical.clone(),
    })
}
