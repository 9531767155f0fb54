/// Column-labelled table (the pandas-like dataframe shape)

use super::ModelError;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Table with ordered column names and row-major cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<JsonValue>>,
}

impl DataTable {
    /// Creates a table; every row must have one cell per column
    pub fn new(columns: Vec<String>, rows: Vec<Vec<JsonValue>>) -> Result<Self, ModelError> {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(ModelError::RowWidth {
                    row: index,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
        }

        Ok(DataTable { columns, rows })
    }

    /// Parses `{"headers": [...], "data": [[...], ...]}`
    pub fn from_json(value: &JsonValue) -> Result<Self, ModelError> {
        let invalid = |field: &str, message: &str| ModelError::InvalidTable {
            field: field.to_string(),
            message: message.to_string(),
        };

        let headers = value
            .get("headers")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| invalid("headers", "expected a list of column names"))?;
        let columns = headers
            .iter()
            .map(|h| h.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| invalid("headers", "column names must be strings"))?;

        let data = value
            .get("data")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| invalid("data", "expected a list of rows"))?;
        let rows = data
            .iter()
            .map(|row| row.as_array().cloned())
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| invalid("data", "every row must be a list"))?;

        DataTable::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<JsonValue>] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_checks_row_width() {
        let result = DataTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![json!(1), json!(2)], vec![json!(3)]],
        );
        assert_eq!(
            result.unwrap_err(),
            ModelError::RowWidth {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_from_json() {
        let table = DataTable::from_json(&json!({
            "headers": ["name", "age"],
            "data": [["ada", 36], ["alan", 41]]
        }))
        .unwrap();

        assert_eq!(table.columns(), &["name".to_string(), "age".to_string()]);
        assert_eq!(table.rows()[1], vec![json!("alan"), json!(41)]);
    }

    #[test]
    fn test_from_json_missing_headers() {
        let result = DataTable::from_json(&json!({"data": []}));
        assert!(result.unwrap_err().to_string().contains("headers"));
    }
}
