// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Statement validation against an exercise's expected result

use crate::error::{TrainerError, TrainerResult};
use crate::exercise::Exercise;
use crate::result::{compare, ResultComparison};
use crate::txn::TransactionalExecutor;

/// Report attached to a passing outcome
pub const PASSED_REPORT: &str = "Your statement returned the expected result.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Passed,
    /// The statement ran but produced different rows
    Mismatch,
    /// The database rejected or failed the statement
    ExecutionError,
}

/// Result of validating one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    kind: OutcomeKind,
    report: String,
}

impl ValidationOutcome {
    pub fn passed(report: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Passed,
            report: report.into(),
        }
    }

    pub fn mismatch(report: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Mismatch,
            report: report.into(),
        }
    }

    pub fn execution_error(message: &str) -> Self {
        Self {
            kind: OutcomeKind::ExecutionError,
            report: format!("An execution error occurred: {}", message),
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    pub fn report(&self) -> &str {
        &self.report
    }

    pub fn is_successful(&self) -> bool {
        self.kind == OutcomeKind::Passed
    }
}

/// Runs trainee statements in throw-away transactions and checks their rows
#[derive(Debug, Clone)]
pub struct SessionValidator {
    executor: TransactionalExecutor,
}

impl SessionValidator {
    pub fn new(executor: TransactionalExecutor) -> Self {
        Self { executor }
    }

    /// Validate `statement` against `exercise`
    ///
    /// Database failures become `ExecutionError` outcomes. The only error
    /// returned is a corrupt expected result, checked before anything runs.
    pub fn validate(&self, statement: &str, exercise: &Exercise) -> TrainerResult<ValidationOutcome> {
        let expected = exercise
            .expected_result()
            .decode()
            .map_err(|source| TrainerError::CorruptExercise {
                id: exercise.id(),
                source,
            })?;

        let actual = self.executor.run(|tx| {
            let rows = tx.run(statement)?;
            match exercise.write_validation_query() {
                Some(validation_query) => tx.run(validation_query),
                None => Ok(rows),
            }
        });

        let actual = match actual {
            Ok(rows) => rows,
            Err(failure) => {
                log::debug!("Exercise {}: execution failed: {}", exercise.id(), failure);
                return Ok(ValidationOutcome::execution_error(failure.report_message()));
            }
        };

        let outcome = match compare(&expected, &actual) {
            ResultComparison::Match => ValidationOutcome::passed(PASSED_REPORT),
            ResultComparison::Mismatch(diff) => ValidationOutcome::mismatch(diff.report()),
        };
        log::debug!("Exercise {}: {:?}", exercise.id(), outcome.kind());
        Ok(outcome)
    }
}
