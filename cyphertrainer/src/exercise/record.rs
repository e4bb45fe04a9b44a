// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Persisted exercise records and bundle files

use super::model::{Exercise, ExerciseId, ExerciseKind};
use crate::error::{ExportError, SequenceError, TrainerResult};
use crate::result::ExpectedResult;
use crate::txn::TransactionalExecutor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current bundle file format version
pub const BUNDLE_FORMAT_VERSION: u32 = 1;

/// Reads exercise nodes in rank order
pub const LOAD_EXERCISES_QUERY: &str = "MATCH (e:Exercise) \
     RETURN e.id AS id, e.rank AS rank, e.instructions AS instructions, \
     e.solutionQuery AS solutionQuery, e.validationQuery AS validationQuery, \
     e.result AS result \
     ORDER BY e.rank ASC";

/// Stored form of an exercise, as found in bundle files and on `:Exercise` nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    pub id: u64,
    pub rank: u32,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_query: Option<String>,
    /// Present iff the exercise requires writes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_query: Option<String>,
    /// Base-64 expected-result payload
    pub result: String,
}

impl ExerciseRecord {
    /// Convert to an exercise; the payload must be valid base-64 but is not decoded
    pub fn into_exercise(self) -> Result<Exercise, SequenceError> {
        let id = ExerciseId(self.id);
        let expected_result = ExpectedResult::from_base64(&self.result)
            .map_err(|source| SequenceError::InvalidPayload { id, source })?;

        let kind = match self.validation_query {
            Some(validation_query) => ExerciseKind::Write { validation_query },
            None => ExerciseKind::Read,
        };

        let exercise = Exercise::new(id, self.rank, self.instructions, kind, expected_result);
        Ok(match self.solution_query {
            Some(solution) => exercise.with_solution(solution),
            None => exercise,
        })
    }
}

/// Exercise bundle file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseBundle {
    pub format_version: u32,
    pub exported_at: DateTime<Utc>,
    pub exercises: Vec<ExerciseRecord>,
}

impl ExerciseBundle {
    pub fn new(exercises: Vec<ExerciseRecord>) -> Self {
        Self {
            format_version: BUNDLE_FORMAT_VERSION,
            exported_at: Utc::now(),
            exercises,
        }
    }

    pub fn read_from(path: &Path) -> Result<Self, SequenceError> {
        let text = std::fs::read_to_string(path)?;
        let bundle: ExerciseBundle = serde_json::from_str(&text)?;
        if bundle.format_version != BUNDLE_FORMAT_VERSION {
            return Err(SequenceError::Format(serde::de::Error::custom(format!(
                "unsupported bundle format version {}",
                bundle.format_version
            ))));
        }
        Ok(bundle)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// Read the `:Exercise` nodes stored in the graph, in rank order
///
/// The read runs in a rolled-back transaction. Nodes whose properties do not
/// form a record are skipped.
pub fn load_from_graph(executor: &TransactionalExecutor) -> TrainerResult<Vec<ExerciseRecord>> {
    let rows = executor.run(|tx| tx.run(LOAD_EXERCISES_QUERY))?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::from_value::<ExerciseRecord>(row.to_json()) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping malformed exercise node {}: {}", row, e),
        }
    }

    log::info!("Loaded {} exercise(s) from the graph", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Row;

    fn sample_record() -> ExerciseRecord {
        let expected = ExpectedResult::from_rows(&[Row::new().with("c", 1i64)]).unwrap();
        ExerciseRecord {
            id: 7,
            rank: 2,
            instructions: "Create a person".to_string(),
            solution_query: Some("CREATE (:Person)".to_string()),
            validation_query: Some("MATCH (p:Person) RETURN count(p) AS c".to_string()),
            result: expected.to_base64(),
        }
    }

    #[test]
    fn test_record_uses_camel_case() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert!(json.get("solutionQuery").is_some());
        assert!(json.get("validationQuery").is_some());

        let read = ExerciseRecord {
            validation_query: None,
            ..sample_record()
        };
        let json = serde_json::to_value(read).unwrap();
        assert!(json.get("validationQuery").is_none());
    }

    #[test]
    fn test_record_to_exercise() {
        let exercise = sample_record().into_exercise().unwrap();
        assert_eq!(exercise.id(), ExerciseId(7));
        assert!(exercise.requires_writes());
        assert_eq!(
            exercise.expected_result().decode().unwrap(),
            vec![Row::new().with("c", 1i64)]
        );
        assert_eq!(exercise.solution_query(), Some("CREATE (:Person)"));
        assert_eq!(
            exercise.write_validation_query(),
            Some("MATCH (p:Person) RETURN count(p) AS c")
        );
    }

    #[test]
    fn test_record_with_bad_base64() {
        let record = ExerciseRecord {
            result: "not base64!".to_string(),
            ..sample_record()
        };
        assert!(matches!(
            record.into_exercise(),
            Err(SequenceError::InvalidPayload { id: ExerciseId(7), .. })
        ));
    }

    #[test]
    fn test_bundle_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exercises.json");

        let bundle = ExerciseBundle::new(vec![sample_record()]);
        bundle.write_to(&path).unwrap();
        assert_eq!(ExerciseBundle::read_from(&path).unwrap(), bundle);
    }

    #[test]
    fn test_bundle_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exercises.json");

        let mut bundle = ExerciseBundle::new(Vec::new());
        bundle.format_version = 9;
        bundle.write_to(&path).unwrap();
        assert!(matches!(
            ExerciseBundle::read_from(&path),
            Err(SequenceError::Format(_))
        ));
    }
}
