use csv_lens_common::{CsvLensError, Result};
use std::path::{Path, PathBuf};

/// A header row plus data rows, every cell kept as text.
///
/// Rows always have the same arity as the header. Operations never mutate a
/// table; filtering and aggregation build new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if header.is_empty() {
            return Err(CsvLensError::EmptyData);
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != header.len()) {
            return Err(CsvLensError::RowArity {
                row: i + 1,
                expected: header.len(),
                found: row.len(),
            });
        }
        Ok(Self { header, rows })
    }

    /// Build from string literals, mostly for tests and fixtures.
    pub fn from_rows<S: AsRef<str>>(rows: &[&[S]]) -> Result<Self> {
        let mut iter = rows
            .iter()
            .map(|r| r.iter().map(|c| c.as_ref().to_owned()).collect::<Vec<_>>());
        let header = iter.next().ok_or(CsvLensError::EmptyData)?;
        Self::new(header, iter.collect())
    }

    /// Same header, different rows. Callers pass rows taken from `self`.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == self.header.len()));
        Self {
            header: self.header.clone(),
            rows,
        }
    }

    pub(crate) fn single_cell(name: &str, value: String) -> Self {
        Self {
            header: vec![name.to_owned()],
            rows: vec![vec![value]],
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header; duplicates resolve to the first one.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CsvLensError::UnknownColumn(name.to_owned()))
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |r| r[index].as_str())
    }
}

pub fn load(path: &Path) -> Result<Table> {
    load_with_delimiter(path, b',')
}

pub fn load_with_delimiter(path: &Path, delimiter: u8) -> Result<Table> {
    let path = expand_home(path);
    if !path.exists() {
        return Err(CsvLensError::NotFound(path));
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_path(&path)?;
    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record?.iter().map(str::to_owned).collect::<Vec<_>>(),
        None => return Err(CsvLensError::EmptyData),
    };
    let mut rows = Vec::new();
    for record in records {
        rows.push(record?.iter().map(str::to_owned).collect::<Vec<_>>());
    }
    log::debug!(
        "loaded {} with {} columns and {} data rows",
        path.display(),
        header.len(),
        rows.len()
    );
    Table::new(header, rows)
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(content: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(tmp, "{content}").unwrap();
        tmp
    }

    #[test]
    fn loads_header_and_rows() {
        let tmp = write_tmp("a,b\n1,x\n2,y\n");
        let t = load(tmp.path()).unwrap();
        assert_eq!(t.header(), ["a", "b"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows()[1], ["2", "y"]);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let tmp = write_tmp("name,price\n\"tv, 55in\",700\n");
        let t = load(tmp.path()).unwrap();
        assert_eq!(t.rows()[0][0], "tv, 55in");
    }

    #[test]
    fn custom_delimiter() {
        let tmp = write_tmp("a;b\n1;2\n");
        let t = load_with_delimiter(tmp.path(), b';').unwrap();
        assert_eq!(t.header(), ["a", "b"]);
        assert_eq!(t.rows()[0], ["1", "2"]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load(Path::new("no_such_file.csv")).unwrap_err();
        assert!(matches!(err, CsvLensError::NotFound(_)));
    }

    #[test]
    fn empty_file_is_empty_data() {
        let tmp = write_tmp("");
        assert!(matches!(load(tmp.path()), Err(CsvLensError::EmptyData)));
    }

    #[test]
    fn header_only_has_no_rows() {
        let tmp = write_tmp("a,b\n");
        let t = load(tmp.path()).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.header().len(), 2);
    }

    #[test]
    fn ragged_file_fails() {
        let tmp = write_tmp("a,b\n1,2,3\n");
        assert!(matches!(load(tmp.path()), Err(CsvLensError::Csv(_))));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Table::from_rows(&[&["a", "b"][..], &["1"][..]]).unwrap_err();
        assert!(matches!(err, CsvLensError::RowArity { row: 1, expected: 2, found: 1 }));
    }

    #[test]
    fn column_index_lookup() {
        let t = Table::from_rows(&[&["a", "b", "a"][..]]).unwrap();
        assert_eq!(t.column_index("b").unwrap(), 1);
        assert_eq!(t.column_index("a").unwrap(), 0);
        assert!(matches!(t.column_index("c"), Err(CsvLensError::UnknownColumn(c)) if c == "c"));
    }
}
