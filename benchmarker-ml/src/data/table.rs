//! In-memory tabular dataset read from a delimited file.

use crate::data::schema::{SchemaDefinition, infer_schema, parse_cell};
use crate::data::split::split_indices;
use crate::error::BenchError;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Rows of typed cells under a header.
///
/// Missing fields are stored as `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// Build a table, checking that every row matches the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, BenchError> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(BenchError::dataset(format!(
                "row {i} has {} fields, header has {}",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Read a delimited file with a header row.
    pub fn from_csv_path(path: &Path, delimiter: u8) -> Result<Self, BenchError> {
        let file = std::fs::File::open(path)?;
        let table = Self::from_csv_reader(file, delimiter)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "Loaded table"
        );
        Ok(table)
    }

    /// Read delimited text with a header row from any reader.
    pub fn from_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, BenchError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if columns.is_empty() || columns.iter().all(String::is_empty) {
            return Err(BenchError::dataset("Empty CSV header"));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(parse_cell).collect());
        }
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, failing if it is absent.
    pub fn column_index(&self, name: &str) -> Result<usize, BenchError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| BenchError::column_not_found(name.to_string()))
    }

    /// All values of one column, in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<&Value>, BenchError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Keep only the named columns, in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, BenchError> {
        let indices = names
            .iter()
            .map(|n| self.column_index(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Self { columns, rows })
    }

    /// Remove every row that has at least one missing value.
    pub fn drop_missing(mut self) -> Self {
        let before = self.rows.len();
        self.rows.retain(|row| row.iter().all(|cell| !cell.is_null()));
        tracing::debug!(
            dropped = before - self.rows.len(),
            kept = self.rows.len(),
            "Dropped rows with missing values"
        );
        self
    }

    /// Remove the rows whose `column` value is missing.
    pub fn drop_missing_in(&self, column: &str) -> Result<Self, BenchError> {
        let idx = self.column_index(column)?;
        Ok(Self {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| !row[idx].is_null())
                .cloned()
                .collect(),
        })
    }

    /// Partition rows into `(held_out, remainder)` by a seeded shuffle.
    ///
    /// The held-out part has `round(rows * fraction)` rows. Both parts keep
    /// their input row order, and the same seed always picks the same rows.
    pub fn random_split(&self, fraction: f64, seed: u64) -> (Self, Self) {
        let (held_out, remainder) = split_indices(self.rows.len(), fraction, seed);
        (self.take_rows(&held_out), self.take_rows(&remainder))
    }

    fn take_rows(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Infer the schema from the current rows.
    pub fn schema(&self) -> SchemaDefinition {
        infer_schema(&self.columns, &self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FRAUD_CSV: &str = "\
step,type,amount,nameOrig,isFraud
1,PAYMENT,9839.64,C1231006815,0
1,TRANSFER,181.0,C1305486145,1
2,CASH_OUT,,C840083671,1
";

    fn numbered_table(n: usize) -> DataTable {
        let rows = (0..n).map(|i| vec![json!(i)]).collect();
        DataTable::new(vec!["id".into()], rows).unwrap()
    }

    #[test]
    fn test_from_csv_reader() {
        let table = DataTable::from_csv_reader(FRAUD_CSV.as_bytes(), b',').unwrap();
        assert_eq!(table.column_count(), 5);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows()[0][1], json!("PAYMENT"));
        assert_eq!(table.rows()[2][2], Value::Null);
    }

    #[test]
    fn test_ragged_csv_rejected() {
        let result = DataTable::from_csv_reader("a,b\n1,2\n3\n".as_bytes(), b',');
        assert!(matches!(result, Err(BenchError::Csv(_))));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = DataTable::new(vec!["a".into(), "b".into()], vec![vec![json!(1)]]);
        assert!(matches!(result, Err(BenchError::Dataset(_))));
    }

    #[test]
    fn test_select_reorders_and_drops() {
        let table = DataTable::from_csv_reader(FRAUD_CSV.as_bytes(), b',').unwrap();
        let selected = table.select(&["isFraud", "step"]).unwrap();
        assert_eq!(selected.columns(), &["isFraud".to_string(), "step".to_string()]);
        assert_eq!(selected.rows()[1], vec![json!(1), json!(1)]);
    }

    #[test]
    fn test_select_unknown_column() {
        let table = DataTable::from_csv_reader(FRAUD_CSV.as_bytes(), b',').unwrap();
        let result = table.select(&["step", "oldbalanceOrg"]);
        assert!(matches!(result, Err(BenchError::ColumnNotFound(c)) if c == "oldbalanceOrg"));
    }

    #[test]
    fn test_drop_missing() {
        let table = DataTable::from_csv_reader(FRAUD_CSV.as_bytes(), b',').unwrap();
        let cleaned = table.drop_missing();
        assert_eq!(cleaned.row_count(), 2);
    }

    #[test]
    fn test_drop_missing_in() {
        let table = DataTable::from_csv_reader(FRAUD_CSV.as_bytes(), b',').unwrap();
        assert_eq!(table.drop_missing_in("amount").unwrap().row_count(), 2);
        assert_eq!(table.drop_missing_in("type").unwrap().row_count(), 3);
        assert!(table.drop_missing_in("nope").is_err());
    }

    #[test]
    fn test_random_split_sizes() {
        let table = numbered_table(1000);
        let (test, train) = table.random_split(0.20, 5);
        assert_eq!(test.row_count(), 200);
        assert_eq!(train.row_count(), 800);
    }

    #[test]
    fn test_random_split_is_reproducible() {
        let table = numbered_table(1000);
        let (first, _) = table.random_split(0.20, 5);
        let (second, _) = table.random_split(0.20, 5);
        assert_eq!(first, second);

        let (other_seed, _) = table.random_split(0.20, 6);
        assert_ne!(first, other_seed);
    }

    #[test]
    fn test_random_split_empty_table() {
        let table = numbered_table(0);
        let (test, train) = table.random_split(0.20, 5);
        assert!(test.is_empty());
        assert!(train.is_empty());
    }
}
