//! Cell parsing and column type inference for tabular datasets.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Float,
    String,
    Boolean,
    Null,
}

impl ColumnType {
    /// Whether the column can be fed to a model without category encoding.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Boolean)
    }
}

/// Schema definition for a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub columns: Vec<ColumnSchema>,
}

impl SchemaDefinition {
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Schema for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub dtype: ColumnType,
    pub nullable: bool,
}

/// Parse one raw delimited field into a typed cell.
///
/// Empty fields are missing values.
pub fn parse_cell(raw: &str) -> Value {
    let s = raw.trim();
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = s.parse::<f64>() {
        return serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::String(s.to_string())
}

/// Infer column type from a sample of values.
pub fn infer_column_type(values: &[&Value]) -> ColumnType {
    let mut has_int = false;
    let mut has_float = false;
    let mut has_bool = false;
    let mut has_string = false;

    for v in values {
        match v {
            Value::Number(n) => {
                if n.is_f64() {
                    has_float = true;
                } else {
                    has_int = true;
                }
            }
            Value::Bool(_) => has_bool = true,
            Value::String(_) => has_string = true,
            _ => {}
        }
    }

    // A column mixing booleans and numbers can only be treated as categories.
    if has_string || (has_bool && (has_int || has_float)) {
        return ColumnType::String;
    }
    if has_float {
        return ColumnType::Float;
    }
    if has_int {
        return ColumnType::Integer;
    }
    if has_bool {
        return ColumnType::Boolean;
    }
    ColumnType::Null
}

/// Infer schema from column names and rows.
pub fn infer_schema(columns: &[String], rows: &[Vec<Value>]) -> SchemaDefinition {
    let columns = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values: Vec<&Value> = rows.iter().filter_map(|row| row.get(i)).collect();
            ColumnSchema {
                name: name.clone(),
                dtype: infer_column_type(&values),
                nullable: values.iter().any(|v| v.is_null()),
            }
        })
        .collect();

    SchemaDefinition { columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("42"), json!(42));
        assert_eq!(parse_cell(" 1.5 "), json!(1.5));
        assert_eq!(parse_cell("True"), json!(true));
        assert_eq!(parse_cell("false"), json!(false));
        assert_eq!(parse_cell("PAYMENT"), json!("PAYMENT"));
        assert_eq!(parse_cell(""), Value::Null);
        assert_eq!(parse_cell("   "), Value::Null);
    }

    #[test]
    fn test_infer_column_type_int() {
        let values = [json!(1), json!(2), json!(3)];
        let refs: Vec<&Value> = values.iter().collect();
        assert_eq!(infer_column_type(&refs), ColumnType::Integer);
    }

    #[test]
    fn test_infer_column_type_mixed_numbers_is_float() {
        let values = [json!(1), json!(2.5), Value::Null];
        let refs: Vec<&Value> = values.iter().collect();
        assert_eq!(infer_column_type(&refs), ColumnType::Float);
    }

    #[test]
    fn test_infer_column_type_string() {
        let values = [json!("a"), json!(3)];
        let refs: Vec<&Value> = values.iter().collect();
        assert_eq!(infer_column_type(&refs), ColumnType::String);
    }

    #[test]
    fn test_infer_schema() {
        let columns = vec!["type".to_string(), "amount".to_string()];
        let rows = vec![
            vec![json!("CASH_OUT"), json!(181.0)],
            vec![json!("PAYMENT"), Value::Null],
        ];
        let schema = infer_schema(&columns, &rows);
        assert_eq!(schema.columns.len(), 2);
        assert_eq!(schema.columns[0].dtype, ColumnType::String);
        assert!(!schema.columns[0].nullable);
        let amount = schema.column("amount").unwrap();
        assert_eq!(amount.dtype, ColumnType::Float);
        assert!(amount.nullable);
        assert!(amount.dtype.is_numeric());
    }
}
