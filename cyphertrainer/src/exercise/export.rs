// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Exercise export
//!
//! Drafts carry the queries only. Exporting runs each draft against the
//! database inside a rolled-back transaction, snapshots the rows its solution
//! produces and emits records ready to be loaded by a trainee session.

use super::record::{ExerciseBundle, ExerciseRecord};
use crate::error::ExportError;
use crate::result::ExpectedResult;
use crate::txn::TransactionalExecutor;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Exercise as authored, before its expected result is known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraft {
    pub instructions: String,
    /// For read drafts the answer itself; for write drafts the query reading
    /// back the state `write_query` leaves behind
    pub solution_query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_query: Option<String>,
}

impl ExerciseDraft {
    pub fn read(instructions: impl Into<String>, solution_query: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            solution_query: solution_query.into(),
            write_query: None,
        }
    }

    pub fn write(
        instructions: impl Into<String>,
        write_query: impl Into<String>,
        solution_query: impl Into<String>,
    ) -> Self {
        Self {
            instructions: instructions.into(),
            solution_query: solution_query.into(),
            write_query: Some(write_query.into()),
        }
    }

    /// Read a JSON array of drafts
    pub fn load_all(path: &Path) -> Result<Vec<Self>, ExportError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Turns drafts into exercise records
#[derive(Debug, Clone)]
pub struct ExerciseExporter {
    executor: TransactionalExecutor,
}

impl ExerciseExporter {
    pub fn new(executor: TransactionalExecutor) -> Self {
        Self { executor }
    }

    /// Export drafts in order; ranks and ids are assigned 1..N
    pub fn export(&self, drafts: &[ExerciseDraft]) -> Result<Vec<ExerciseRecord>, ExportError> {
        drafts
            .iter()
            .enumerate()
            .map(|(index, draft)| self.export_draft(index + 1, draft))
            .collect()
    }

    pub fn export_bundle(&self, drafts: &[ExerciseDraft]) -> Result<ExerciseBundle, ExportError> {
        Ok(ExerciseBundle::new(self.export(drafts)?))
    }

    fn export_draft(&self, position: usize, draft: &ExerciseDraft) -> Result<ExerciseRecord, ExportError> {
        let rows = self
            .executor
            .run(|tx| {
                if let Some(write_query) = &draft.write_query {
                    tx.run(write_query)?;
                }
                tx.run(&draft.solution_query)
            })
            .map_err(|source| ExportError::Draft {
                index: position,
                source,
            })?;

        let expected = ExpectedResult::from_rows(&rows)?;
        log::debug!("Draft #{} produced {} row(s)", position, rows.len());

        let (solution_query, validation_query) = match &draft.write_query {
            Some(write_query) => (write_query.clone(), Some(draft.solution_query.clone())),
            None => (draft.solution_query.clone(), None),
        };

        Ok(ExerciseRecord {
            id: position as u64,
            rank: position as u32,
            instructions: draft.instructions.clone(),
            solution_query: Some(solution_query),
            validation_query,
            result: expected.to_base64(),
        })
    }
}

/// Cypher script that stores the records as `:Exercise` nodes
pub fn to_cypher_script(records: &[ExerciseRecord]) -> String {
    let mut script = String::new();
    for record in records {
        script.push_str(&format!(
            "MERGE (e:Exercise {{id: {}}}) SET e.rank = {}, e.instructions = {}, \
             e.solutionQuery = {}, e.validationQuery = {}, e.result = {};\n",
            record.id,
            record.rank,
            cypher_string(&record.instructions),
            optional_cypher_string(record.solution_query.as_deref()),
            optional_cypher_string(record.validation_query.as_deref()),
            cypher_string(&record.result),
        ));
    }
    script
}

fn optional_cypher_string(value: Option<&str>) -> String {
    value.map_or_else(|| "null".to_string(), cypher_string)
}

/// Single-quoted Cypher string literal
fn cypher_string(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('\'');
    for c in value.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '\'' => literal.push_str("\\'"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c => literal.push(c),
        }
    }
    literal.push('\'');
    literal
}
