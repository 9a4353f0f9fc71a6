use std::path::Path;

use crate::constants::report::BYTES_PER_MEBIBYTE;
use crate::constants::sampling::SAMPLE_SUFFIX;

/// Format a byte count as binary megabytes with one decimal, e.g. `"1.5 MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    let megabytes = bytes as f64 / BYTES_PER_MEBIBYTE as f64;
    format!("{megabytes:.1} MB")
}

/// Derive the sample output name for an input file name:
/// `joined_gdf.csv` becomes `joined_gdf_sample.csv`.
///
/// The derivation works on the file stem, so inputs are expected to be bare
/// file names rather than paths.
pub fn sample_output_name(input: &str) -> String {
    let path = Path::new(input);
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(input);
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem}{SAMPLE_SUFFIX}.{ext}"),
        None => format!("{stem}{SAMPLE_SUFFIX}"),
    }
}
