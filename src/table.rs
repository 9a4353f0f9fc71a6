use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, WriterBuilder};

use crate::errors::PrepError;

/// A CSV file loaded whole: one header record plus its data rows.
///
/// Rows are kept as raw `ByteRecord`s so quoting, embedded separators, and
/// non-ASCII payloads survive the load/write round unchanged.
#[derive(Debug)]
pub struct CsvTable {
    headers: ByteRecord,
    rows: Vec<ByteRecord>,
}

impl CsvTable {
    /// Load an entire CSV file into memory.
    ///
    /// The first record is treated as the header row; a file without one is
    /// rejected with [`PrepError::MissingHeader`].
    pub fn load(path: &Path) -> Result<Self, PrepError> {
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(BufReader::new(file));

        let headers = reader.byte_headers()?.clone();
        if headers.is_empty() {
            return Err(PrepError::MissingHeader {
                path: path.to_path_buf(),
            });
        }

        let mut rows = Vec::new();
        for result in reader.byte_records() {
            rows.push(result?);
        }

        Ok(Self { headers, rows })
    }

    /// Header record of the loaded file.
    pub fn headers(&self) -> &ByteRecord {
        &self.headers
    }

    /// Number of data rows (the header does not count).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the header row.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Write the header plus the rows at `indices`, in the given order.
    ///
    /// Every index must be below [`CsvTable::row_count`]; callers draw them
    /// from the table they are writing from.
    pub fn write_subset(&self, path: &Path, indices: &[usize]) -> Result<(), PrepError> {
        let file = File::create(path)?;
        let mut writer = WriterBuilder::new().from_writer(BufWriter::new(file));

        writer.write_byte_record(&self.headers)?;
        for &idx in indices {
            writer.write_byte_record(&self.rows[idx])?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_fixture(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("write fixture");
        path
    }

    #[test]
    fn load_reports_shape_and_preserves_headers() {
        let dir = tempdir().expect("tempdir");
        let path = write_fixture(dir.path(), "shape.csv", "id,name,score\n1,a,0.5\n2,b,0.9\n");

        let table = CsvTable::load(&path).expect("load");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.headers(), &ByteRecord::from(vec!["id", "name", "score"]));
    }

    #[test]
    fn subset_round_trip_keeps_quoted_fields_intact() {
        let dir = tempdir().expect("tempdir");
        let path = write_fixture(
            dir.path(),
            "quoted.csv",
            "name,desc\n\"John\",\"Line1\nLine2\"\n\"Kim\",\"123 Main St, Apt 4\"\n",
        );

        let table = CsvTable::load(&path).expect("load");
        let out = dir.path().join("quoted_out.csv");
        table.write_subset(&out, &[1, 0]).expect("write subset");

        let reread = CsvTable::load(&out).expect("reload");
        assert_eq!(reread.row_count(), 2);
        assert_eq!(reread.headers(), table.headers());

        let mut reader = csv::Reader::from_path(&out).expect("open output");
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|record| {
                record
                    .expect("record")
                    .iter()
                    .map(|field| field.to_string())
                    .collect()
            })
            .collect();
        assert_eq!(rows[0], vec!["Kim", "123 Main St, Apt 4"]);
        assert_eq!(rows[1], vec!["John", "Line1\nLine2"]);
    }

    #[test]
    fn header_only_file_loads_with_zero_rows() {
        let dir = tempdir().expect("tempdir");
        let path = write_fixture(dir.path(), "empty.csv", "id,value\n");

        let table = CsvTable::load(&path).expect("load");
        assert_eq!(table.row_count(), 0);

        let out = dir.path().join("empty_out.csv");
        table.write_subset(&out, &[]).expect("write header only");
        let written = fs::read_to_string(&out).expect("read output");
        assert_eq!(written, "id,value\n");
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = write_fixture(dir.path(), "zero.csv", "");

        let err = CsvTable::load(&path).expect_err("empty file must not load");
        assert!(matches!(err, PrepError::MissingHeader { .. }));
    }

    #[test]
    fn ragged_rows_fail_the_load() {
        let dir = tempdir().expect("tempdir");
        let path = write_fixture(dir.path(), "ragged.csv", "a,b\n1\n");

        let err = CsvTable::load(&path).expect_err("ragged row must not load");
        assert!(matches!(err, PrepError::Csv(_)));
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let dir = tempdir().expect("tempdir");
        let err = CsvTable::load(&dir.path().join("absent.csv")).expect_err("missing file");
        assert!(matches!(err, PrepError::Io(_)));
    }
}
