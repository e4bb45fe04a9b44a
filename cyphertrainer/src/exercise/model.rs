// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Exercise model

use crate::result::ExpectedResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exercise identifier, unique within a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(pub u64);

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an exercise is checked on the statement's rows or on the graph
/// state the statement leaves behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseKind {
    /// The trainee statement's own rows are compared
    Read,
    /// The trainee statement writes; `validation_query` then reads the
    /// resulting state in the same transaction and its rows are compared
    Write { validation_query: String },
}

/// Single trainer exercise
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    id: ExerciseId,
    rank: u32,
    instructions: String,
    solution_query: Option<String>,
    kind: ExerciseKind,
    expected_result: ExpectedResult,
}

impl Exercise {
    pub fn new(
        id: ExerciseId,
        rank: u32,
        instructions: impl Into<String>,
        kind: ExerciseKind,
        expected_result: ExpectedResult,
    ) -> Self {
        Self {
            id,
            rank,
            instructions: instructions.into(),
            solution_query: None,
            kind,
            expected_result,
        }
    }

    /// Exercise checked on the trainee statement's rows
    pub fn read(
        id: u64,
        rank: u32,
        instructions: impl Into<String>,
        expected_result: ExpectedResult,
    ) -> Self {
        Self::new(
            ExerciseId(id),
            rank,
            instructions,
            ExerciseKind::Read,
            expected_result,
        )
    }

    /// Exercise checked through a validation query run after the trainee statement
    pub fn write(
        id: u64,
        rank: u32,
        instructions: impl Into<String>,
        validation_query: impl Into<String>,
        expected_result: ExpectedResult,
    ) -> Self {
        Self::new(
            ExerciseId(id),
            rank,
            instructions,
            ExerciseKind::Write {
                validation_query: validation_query.into(),
            },
            expected_result,
        )
    }

    /// Attach the reference answer
    pub fn with_solution(mut self, solution_query: impl Into<String>) -> Self {
        self.solution_query = Some(solution_query.into());
        self
    }

    pub fn id(&self) -> ExerciseId {
        self.id
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn solution_query(&self) -> Option<&str> {
        self.solution_query.as_deref()
    }

    pub fn kind(&self) -> &ExerciseKind {
        &self.kind
    }

    pub fn expected_result(&self) -> &ExpectedResult {
        &self.expected_result
    }

    pub fn requires_writes(&self) -> bool {
        matches!(self.kind, ExerciseKind::Write { .. })
    }

    /// Query that reads back the state a write exercise must produce
    pub fn write_validation_query(&self) -> Option<&str> {
        match &self.kind {
            ExerciseKind::Write { validation_query } => Some(validation_query),
            ExerciseKind::Read => None,
        }
    }
}
