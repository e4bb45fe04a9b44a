// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Terminal output: console rendering and row tables

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use cyphertrainer::{ConsoleLogger, Row, Value};

/// Console that writes colored lines to the terminal
pub struct ColoredConsole;

impl ConsoleLogger for ColoredConsole {
    fn error(&mut self, message: &str) {
        eprintln!("{}", message.red());
    }

    fn failure(&mut self, message: &str) {
        println!("{}", message.yellow());
    }

    fn success(&mut self, message: &str) {
        println!("{}", message.green());
    }

    fn information(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Row formatter for the terminal
pub struct ResultFormatter;

impl ResultFormatter {
    /// Format rows as a table; columns are the union of every row's fields
    pub fn format_rows(rows: &[Row]) -> String {
        if rows.is_empty() {
            return format!("{}\n", "No rows".yellow());
        }

        let mut columns: Vec<&str> = Vec::new();
        for row in rows {
            for name in row.field_names() {
                if !columns.contains(&name) {
                    columns.push(name);
                }
            }
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            columns
                .iter()
                .map(|col| Cell::new(col).fg(Color::Green))
                .collect::<Vec<_>>(),
        );

        for row in rows {
            let row_values: Vec<String> = columns
                .iter()
                .map(|col| {
                    row.get_value(col)
                        .map(Self::value_to_string)
                        .unwrap_or_default()
                })
                .collect();
            table.add_row(row_values);
        }

        let mut output = table.to_string();
        output.push('\n');
        output.push_str(&format!("Rows: {}\n", rows.len()));
        output
    }

    /// Convert a Value to a display string
    fn value_to_string(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => "NULL".to_string(),
            other => other.to_string(),
        }
    }
}
