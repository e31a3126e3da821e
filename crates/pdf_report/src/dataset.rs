//! Tabular input for reports.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Errors raised while reading or validating a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("cannot open '{}'", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read CSV data")]
    Parse(#[from] csv::Error),
    #[error("dataset has no rows")]
    Empty,
    #[error("row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Rows of text fields; the first row is the header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Builds a dataset, checking that every row has as many fields as the header.
    pub fn from_rows<R, F>(rows: impl IntoIterator<Item = R>) -> Result<Self, DatasetError>
    where
        R: IntoIterator<Item = F>,
        F: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        let Some(expected) = rows.first().map(Vec::len) else {
            return Err(DatasetError::Empty);
        };
        if let Some((row, fields)) = rows
            .iter()
            .enumerate()
            .find(|(_, fields)| fields.len() != expected)
        {
            return Err(DatasetError::RaggedRow {
                row,
                expected,
                found: fields.len(),
            });
        }

        Ok(Self { rows })
    }

    /// Parses comma-separated records from `reader`; no row is treated as a header implicitly.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            match record {
                Ok(record) => rows.push(record.iter().map(str::to_owned).collect::<Vec<_>>()),
                Err(err) => {
                    if let csv::ErrorKind::UnequalLengths {
                        expected_len, len, ..
                    } = err.kind()
                    {
                        return Err(DatasetError::RaggedRow {
                            row: rows.len(),
                            expected: *expected_len as usize,
                            found: *len as usize,
                        });
                    }
                    return Err(err.into());
                }
            }
        }

        Self::from_rows(rows)
    }

    /// Reads the CSV file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        log::debug!(
            "loaded {} rows x {} columns from {}",
            dataset.rows.len(),
            dataset.column_count(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// All rows after the header.
    pub fn body(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }

    pub fn column_count(&self) -> usize {
        self.header().len()
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, DatasetError};

    #[test]
    fn first_row_is_header() {
        let data = Dataset::from_reader("Name,Qty\nWidget,3\nGadget,12\n".as_bytes())
            .expect("valid csv");
        assert_eq!(data.header(), ["Name", "Qty"]);
        assert_eq!(data.row_count(), 2);
        assert_eq!(data.body()[1], ["Gadget", "12"]);
    }

    #[test]
    fn header_only_is_valid() {
        let data = Dataset::from_rows([["A", "B", "C"]]).expect("header only");
        assert_eq!(data.column_count(), 3);
        assert!(data.body().is_empty());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            Dataset::from_reader("".as_bytes()),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = Dataset::from_reader("a,b,c\n1,2\n".as_bytes());
        assert!(matches!(
            result,
            Err(DatasetError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        ));

        let result = Dataset::from_rows(vec![vec!["a", "b"], vec!["1", "2"], vec!["x"]]);
        assert!(matches!(result, Err(DatasetError::RaggedRow { row: 2, .. })));
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let data = Dataset::from_reader("Item,Note\n\"Bolt, M6\",ok\n".as_bytes()).expect("csv");
        assert_eq!(data.body()[0][0], "Bolt, M6");
    }
}
