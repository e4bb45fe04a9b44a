// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Order-sensitive comparison of row sequences and mismatch reports

use super::row::{format_rows, Row};
use super::value::Value;

/// Outcome of comparing an actual row sequence with the expected one
#[derive(Debug, Clone, PartialEq)]
pub enum ResultComparison {
    Match,
    Mismatch(ResultDiff),
}

impl ResultComparison {
    pub fn is_match(&self) -> bool {
        matches!(self, ResultComparison::Match)
    }
}

/// Difference found in a single row position
#[derive(Debug, Clone, PartialEq)]
pub enum RowDifference {
    /// Expected row has no counterpart in the actual result
    MissingRow { index: usize, expected: Row },
    /// Actual row has no counterpart in the expected result
    UnexpectedRow { index: usize, actual: Row },
    /// Both rows exist but differ field by field
    Fields {
        index: usize,
        missing: Vec<String>,
        unexpected: Vec<String>,
        changed: Vec<FieldChange>,
    },
}

/// A field present in both rows with unequal values
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub expected: Value,
    pub actual: Value,
}

/// Everything needed to explain a mismatch to the trainee
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDiff {
    pub expected: Vec<Row>,
    pub actual: Vec<Row>,
    pub differences: Vec<RowDifference>,
    /// Same rows in a different order
    pub order_only: bool,
}

/// Compare two row sequences, position by position
pub fn compare(expected: &[Row], actual: &[Row]) -> ResultComparison {
    if expected == actual {
        return ResultComparison::Match;
    }

    let mut differences = Vec::new();
    for index in 0..expected.len().max(actual.len()) {
        match (expected.get(index), actual.get(index)) {
            (Some(e), Some(a)) if e != a => differences.push(field_difference(index, e, a)),
            (Some(e), None) => differences.push(RowDifference::MissingRow {
                index,
                expected: e.clone(),
            }),
            (None, Some(a)) => differences.push(RowDifference::UnexpectedRow {
                index,
                actual: a.clone(),
            }),
            _ => {}
        }
    }

    ResultComparison::Mismatch(ResultDiff {
        expected: expected.to_vec(),
        actual: actual.to_vec(),
        differences,
        order_only: is_permutation(expected, actual),
    })
}

fn field_difference(index: usize, expected: &Row, actual: &Row) -> RowDifference {
    let missing = expected
        .field_names()
        .filter(|name| actual.get_value(name).is_none())
        .map(str::to_string)
        .collect();
    let unexpected = actual
        .field_names()
        .filter(|name| expected.get_value(name).is_none())
        .map(str::to_string)
        .collect();
    let changed = expected
        .values
        .iter()
        .filter_map(|(field, expected_value)| match actual.get_value(field) {
            Some(actual_value) if actual_value != expected_value => Some(FieldChange {
                field: field.clone(),
                expected: expected_value.clone(),
                actual: actual_value.clone(),
            }),
            _ => None,
        })
        .collect();

    RowDifference::Fields {
        index,
        missing,
        unexpected,
        changed,
    }
}

/// Multiset equality; `Value` has no `Hash`/`Ord`, so match greedily
fn is_permutation(expected: &[Row], actual: &[Row]) -> bool {
    if expected.len() != actual.len() {
        return false;
    }
    let mut used = vec![false; actual.len()];
    expected.iter().all(|e| {
        match actual
            .iter()
            .enumerate()
            .position(|(i, a)| !used[i] && a == e)
        {
            Some(i) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

impl ResultDiff {
    /// Human-readable, multi-line mismatch report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Expected {} row(s) but your statement returned {} row(s).",
            self.expected.len(),
            self.actual.len()
        ));

        if self.order_only {
            lines.push("The rows are correct but they come back in a different order.".to_string());
        }

        for difference in &self.differences {
            match difference {
                RowDifference::MissingRow { index, expected } => {
                    lines.push(format!("Row {}: missing, expected {}", index + 1, expected));
                }
                RowDifference::UnexpectedRow { index, actual } => {
                    lines.push(format!("Row {}: unexpected {}", index + 1, actual));
                }
                RowDifference::Fields {
                    index,
                    missing,
                    unexpected,
                    changed,
                } => {
                    lines.push(format!("Row {}:", index + 1));
                    if !missing.is_empty() {
                        lines.push(format!("  missing field(s): {}", missing.join(", ")));
                    }
                    if !unexpected.is_empty() {
                        lines.push(format!("  unexpected field(s): {}", unexpected.join(", ")));
                    }
                    for change in changed {
                        lines.push(format!(
                            "  field `{}`: expected {}, got {}",
                            change.field, change.expected, change.actual
                        ));
                    }
                }
            }
        }

        lines.push(format!("Expected: {}", format_rows(&self.expected)));
        lines.push(format!("Actual:   {}", format_rows(&self.actual)));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(c: i64) -> Row {
        Row::new().with("c", c)
    }

    #[test]
    fn test_identical_results_match() {
        assert!(compare(&[count(0)], &[count(0)]).is_match());
        assert!(compare(&[], &[]).is_match());
    }

    #[test]
    fn test_numeric_types_compare_semantically() {
        let expected = vec![Row::new().with("avg", 2i64)];
        let actual = vec![Row::new().with("avg", 2.0)];
        assert!(compare(&expected, &actual).is_match());
    }

    #[test]
    fn test_integer_beyond_float_precision_is_mismatch() {
        let expected = vec![count(9_007_199_254_740_993)];
        let actual = vec![Row::new().with("c", 9_007_199_254_740_992.0)];
        assert!(!compare(&expected, &actual).is_match());
        assert!(!compare(&actual, &expected).is_match());
    }

    #[test]
    fn test_value_mismatch_names_both_values() {
        let comparison = compare(&[count(0)], &[count(1)]);
        let ResultComparison::Mismatch(diff) = comparison else {
            panic!("expected mismatch");
        };
        let report = diff.report();
        assert!(report.contains("field `c`: expected 0, got 1"), "{}", report);
        assert!(report.contains("Expected: [{c: 0}]"));
        assert!(report.contains("Actual:   [{c: 1}]"));
        assert!(!diff.order_only);
    }

    #[test]
    fn test_permutation_is_mismatch_with_order_hint() {
        let expected = vec![count(1), count(2)];
        let actual = vec![count(2), count(1)];
        let ResultComparison::Mismatch(diff) = compare(&expected, &actual) else {
            panic!("permutation must not match");
        };
        assert!(diff.order_only);
        assert!(diff.report().contains("different order"));
    }

    #[test]
    fn test_renamed_field_reports_missing_and_unexpected() {
        let expected = vec![Row::new().with("name", "Ann")];
        let actual = vec![Row::new().with("n.name", "Ann")];
        let ResultComparison::Mismatch(diff) = compare(&expected, &actual) else {
            panic!("renamed field must not match");
        };
        assert_eq!(
            diff.differences,
            vec![RowDifference::Fields {
                index: 0,
                missing: vec!["name".to_string()],
                unexpected: vec!["n.name".to_string()],
                changed: vec![],
            }]
        );
    }

    #[test]
    fn test_extra_and_missing_rows() {
        let ResultComparison::Mismatch(diff) = compare(&[count(1)], &[count(1), count(2)]) else {
            panic!("extra row must not match");
        };
        assert!(matches!(
            diff.differences.as_slice(),
            [RowDifference::UnexpectedRow { index: 1, .. }]
        ));

        let ResultComparison::Mismatch(diff) = compare(&[count(1)], &[]) else {
            panic!("missing row must not match");
        };
        assert!(diff.report().contains("Row 1: missing, expected {c: 1}"));
    }
}
