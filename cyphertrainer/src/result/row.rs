// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Result rows

use super::value::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Single result row: field name to value bindings
///
/// Field order carries no meaning; two rows are equal when they bind the same
/// field names to equal values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub values: BTreeMap<String, Value>,
}

impl Row {
    /// Create a new empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from a map of values
    pub fn from_values(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }

    /// Create a row from positional values with their column names
    pub fn from_positional(values: Vec<Value>, columns: &[String]) -> Self {
        Self {
            values: columns.iter().cloned().zip(values).collect(),
        }
    }

    /// Builder-style helper used heavily by tests and the exporter
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Get a value by field name
    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Field names in sorted order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert to a JSON object (used to deserialize rows into typed records)
    pub fn to_json(&self) -> serde_json::Value {
        Value::Map(self.values.clone()).to_json()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Map(self.values.clone()))
    }
}

/// Render an ordered row sequence as `[{..}, {..}]`
pub fn format_rows(rows: &[Row]) -> String {
    let rendered: Vec<String> = rows.iter().map(Row::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_ignore_field_insertion_order() {
        let a = Row::new().with("x", 1i64).with("y", "a");
        let b = Row::new().with("y", "a").with("x", 1i64);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rows_are_field_set_sensitive() {
        let a = Row::new().with("x", 1i64);
        let b = Row::new().with("x", 1i64).with("y", Value::Null);
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_positional() {
        let columns = vec!["c".to_string(), "name".to_string()];
        let row = Row::from_positional(vec![Value::Integer(3), Value::from("Ann")], &columns);
        assert_eq!(row.get_value("c"), Some(&Value::Integer(3)));
        assert_eq!(row.to_string(), "{c: 3, name: 'Ann'}");
    }

    #[test]
    fn test_format_rows() {
        let rows = vec![Row::new().with("c", 0i64), Row::new().with("c", 1i64)];
        assert_eq!(format_rows(&rows), "[{c: 0}, {c: 1}]");
        assert_eq!(format_rows(&[]), "[]");
    }
}
