//! Conversion of typed table cells into the numeric arrays the ML library consumes.
//!
//! Encoders are learned from the training table and reused unchanged for the
//! held-out table, so both sides share one category numbering.

use crate::data::schema::ColumnType;
use crate::data::table::DataTable;
use crate::error::BenchError;
use ndarray::{Array1, Array2};
use serde_json::Value;
use std::collections::BTreeMap;

/// How one feature column is turned into a number.
#[derive(Debug, Clone)]
enum ColumnEncoding {
    /// Numbers and booleans pass through; missing cells take the training mean.
    Numeric { fill: f64 },
    /// Sorted categories mapped to 0, 1, 2, ...; unseen categories map past the end.
    Ordinal { categories: BTreeMap<String, usize> },
}

/// Encodes every non-target column of a table into a feature matrix.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    features: Vec<(String, ColumnEncoding)>,
}

impl FeatureEncoder {
    /// Learn encodings for all columns except `target`.
    ///
    /// Columns that encode to a single value over the table's rows carry no
    /// information and are left out.
    pub fn fit(table: &DataTable, target: &str) -> Result<Self, BenchError> {
        table.column_index(target)?;
        let schema = table.schema();

        let mut features = Vec::new();
        for column in schema.columns.iter().filter(|c| c.name != target) {
            let values = table.column_values(&column.name)?;
            let encoding = match column.dtype {
                ColumnType::String => ColumnEncoding::Ordinal {
                    categories: ordinal_categories(&values),
                },
                ColumnType::Null => ColumnEncoding::Numeric { fill: 0.0 },
                _ => ColumnEncoding::Numeric {
                    fill: numeric_mean(&values),
                },
            };
            if is_constant(&column.name, &encoding, &values)? {
                tracing::debug!(column = %column.name, "Skipping constant feature column");
                continue;
            }
            features.push((column.name.clone(), encoding));
        }

        if features.is_empty() {
            return Err(BenchError::dataset(format!(
                "no feature columns besides target '{target}'"
            )));
        }
        Ok(Self { features })
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.features.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Encode the learned feature columns of `table` into a row-major matrix.
    pub fn transform(&self, table: &DataTable) -> Result<Array2<f64>, BenchError> {
        let indices = self
            .features
            .iter()
            .map(|(name, _)| table.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut data = Vec::with_capacity(table.row_count() * self.features.len());
        for row in table.rows() {
            for ((name, encoding), &idx) in self.features.iter().zip(&indices) {
                data.push(encode_cell(name, encoding, &row[idx])?);
            }
        }
        Ok(Array2::from_shape_vec(
            (table.row_count(), self.features.len()),
            data,
        )?)
    }
}

fn encode_cell(name: &str, encoding: &ColumnEncoding, cell: &Value) -> Result<f64, BenchError> {
    match encoding {
        ColumnEncoding::Numeric { fill } => match cell {
            Value::Null => Ok(*fill),
            other => numeric_value(other).ok_or_else(|| {
                BenchError::dataset(format!("non-numeric value {other} in column '{name}'"))
            }),
        },
        ColumnEncoding::Ordinal { categories } => {
            let key = category_key(cell);
            Ok(categories
                .get(&key)
                .copied()
                .unwrap_or(categories.len()) as f64)
        }
    }
}

/// Whether every cell of a non-empty column encodes to the same number.
fn is_constant(
    name: &str,
    encoding: &ColumnEncoding,
    values: &[&Value],
) -> Result<bool, BenchError> {
    let encoded = values
        .iter()
        .map(|v| encode_cell(name, encoding, v))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(encoded
        .first()
        .is_some_and(|first| encoded.iter().all(|v| v == first)))
}

fn ordinal_categories(values: &[&Value]) -> BTreeMap<String, usize> {
    let mut keys: Vec<String> = values.iter().map(|v| category_key(v)).collect();
    keys.sort();
    keys.dedup();
    keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect()
}

fn numeric_mean(values: &[&Value]) -> f64 {
    let numbers: Vec<f64> = values.iter().filter_map(|v| numeric_value(v)).collect();
    if numbers.is_empty() {
        0.0
    } else {
        numbers.iter().sum::<f64>() / numbers.len() as f64
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Category label of a cell; numbers and booleans use their text form.
fn category_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Maps class labels of the target column to dense indices.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    target: String,
    classes: BTreeMap<String, usize>,
}

impl LabelEncoder {
    pub fn fit(table: &DataTable, target: &str) -> Result<Self, BenchError> {
        let values = table.column_values(target)?;
        if values.iter().any(|v| v.is_null()) {
            return Err(BenchError::dataset(format!(
                "target column '{target}' has missing labels"
            )));
        }
        Ok(Self {
            target: target.to_string(),
            classes: ordinal_categories(&values),
        })
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn class_names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    /// Encode the target column; labels unseen at fit time get indices past
    /// the known classes, so a model can never predict them correctly.
    pub fn transform(&self, table: &DataTable) -> Result<Array1<usize>, BenchError> {
        let mut unseen: BTreeMap<String, usize> = BTreeMap::new();
        let labels = table
            .column_values(&self.target)?
            .into_iter()
            .map(|v| {
                let key = category_key(v);
                match self.classes.get(&key) {
                    Some(&idx) => idx,
                    None => {
                        let next = self.classes.len() + unseen.len();
                        *unseen.entry(key).or_insert(next)
                    }
                }
            })
            .collect();
        Ok(labels)
    }
}

/// Numeric regression targets from a column with no missing values.
pub fn numeric_targets(table: &DataTable, target: &str) -> Result<Array1<f64>, BenchError> {
    table
        .column_values(target)?
        .into_iter()
        .map(|v| {
            numeric_value(v).ok_or_else(|| {
                BenchError::dataset(format!("non-numeric target {v} in column '{target}'"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fraud_table() -> DataTable {
        DataTable::new(
            vec!["type".into(), "amount".into(), "flagged".into(), "isFraud".into()],
            vec![
                vec![json!("PAYMENT"), json!(10.0), json!(false), json!(0)],
                vec![json!("TRANSFER"), json!(30.0), json!(true), json!(1)],
                vec![json!("CASH_OUT"), Value::Null, json!(false), json!(1)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_feature_encoder_excludes_target() {
        let encoder = FeatureEncoder::fit(&fraud_table(), "isFraud").unwrap();
        assert_eq!(encoder.feature_names(), vec!["type", "amount", "flagged"]);
    }

    #[test]
    fn test_feature_encoder_transform() {
        let table = fraud_table();
        let encoder = FeatureEncoder::fit(&table, "isFraud").unwrap();
        let x = encoder.transform(&table).unwrap();
        assert_eq!(x.dim(), (3, 3));
        // CASH_OUT < PAYMENT < TRANSFER
        assert_eq!(x[[0, 0]], 1.0);
        assert_eq!(x[[1, 0]], 2.0);
        assert_eq!(x[[2, 0]], 0.0);
        // missing amount takes the mean of 10 and 30
        assert_eq!(x[[2, 1]], 20.0);
        assert_eq!(x[[1, 2]], 1.0);
    }

    #[test]
    fn test_unseen_category_maps_past_end() {
        let encoder = FeatureEncoder::fit(&fraud_table(), "isFraud").unwrap();
        let other = DataTable::new(
            vec!["type".into(), "amount".into(), "flagged".into(), "isFraud".into()],
            vec![vec![json!("DEBIT"), json!(1.0), json!(true), json!(0)]],
        )
        .unwrap();
        let x = encoder.transform(&other).unwrap();
        assert_eq!(x[[0, 0]], 3.0);
    }

    #[test]
    fn test_feature_encoder_skips_constant_columns() {
        let table = DataTable::new(
            vec!["kind".into(), "flag".into(), "amount".into(), "isFraud".into()],
            vec![
                vec![json!("PAYMENT"), json!(false), json!(10.0), json!(0)],
                vec![json!("PAYMENT"), json!(false), json!(30.0), json!(1)],
                vec![json!("PAYMENT"), Value::Null, json!(20.0), json!(1)],
            ],
        )
        .unwrap();
        let encoder = FeatureEncoder::fit(&table, "isFraud").unwrap();
        assert_eq!(encoder.feature_names(), vec!["amount"]);
        assert_eq!(encoder.transform(&table).unwrap().dim(), (3, 1));
    }

    #[test]
    fn test_feature_encoder_all_constant_is_an_error() {
        let table = DataTable::new(
            vec!["flag".into(), "y".into()],
            vec![vec![json!(0), json!(1.0)], vec![json!(0), json!(2.0)]],
        )
        .unwrap();
        assert!(matches!(
            FeatureEncoder::fit(&table, "y"),
            Err(BenchError::Dataset(_))
        ));
    }

    #[test]
    fn test_feature_encoder_missing_target() {
        let result = FeatureEncoder::fit(&fraud_table(), "label");
        assert!(matches!(result, Err(BenchError::ColumnNotFound(_))));
    }

    #[test]
    fn test_label_encoder() {
        let table = fraud_table();
        let labels = LabelEncoder::fit(&table, "isFraud").unwrap();
        assert_eq!(labels.class_count(), 2);
        assert_eq!(labels.class_names(), vec!["0", "1"]);
        let y = labels.transform(&table).unwrap();
        assert_eq!(y.to_vec(), vec![0, 1, 1]);
    }

    #[test]
    fn test_label_encoder_unseen_label() {
        let labels = LabelEncoder::fit(&fraud_table(), "isFraud").unwrap();
        let other = DataTable::new(
            vec!["type".into(), "amount".into(), "flagged".into(), "isFraud".into()],
            vec![
                vec![json!("PAYMENT"), json!(1.0), json!(true), json!(2)],
                vec![json!("PAYMENT"), json!(1.0), json!(true), json!(2)],
            ],
        )
        .unwrap();
        assert_eq!(labels.transform(&other).unwrap().to_vec(), vec![2, 2]);
    }

    #[test]
    fn test_numeric_targets() {
        let y = numeric_targets(&fraud_table(), "amount");
        assert!(matches!(y, Err(BenchError::Dataset(_))));
        let y = numeric_targets(&fraud_table().drop_missing(), "amount").unwrap();
        assert_eq!(y.to_vec(), vec![10.0, 30.0]);
    }
}
