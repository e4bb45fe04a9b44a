// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Trainee session: walks a trainee through an exercise sequence

use super::validator::{SessionValidator, ValidationOutcome};
use crate::error::{TrainerError, TrainerResult};
use crate::exercise::{Exercise, ExerciseSequence};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Session identifier, used for log correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Working on the exercise at this index
    InProgress(usize),
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl fmt::Display for SessionProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} exercise(s) completed, {} remaining",
            self.completed, self.total, self.remaining
        )
    }
}

/// One trainee's pass through an exercise sequence
///
/// The cursor only moves forward, one exercise per passing statement.
#[derive(Debug)]
pub struct TraineeSession {
    id: SessionId,
    sequence: Arc<ExerciseSequence>,
    cursor: usize,
    validator: SessionValidator,
}

impl TraineeSession {
    pub fn new(sequence: Arc<ExerciseSequence>, validator: SessionValidator) -> Self {
        let id = SessionId::new();
        log::info!(
            "Session {} started with {} exercise(s)",
            id,
            sequence.len()
        );
        Self {
            id,
            sequence,
            cursor: 0,
            validator,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn is_completed(&self) -> bool {
        self.cursor >= self.sequence.len()
    }

    pub fn current_exercise(&self) -> TrainerResult<&Exercise> {
        self.sequence
            .get(self.cursor)
            .ok_or(TrainerError::SessionCompleted)
    }

    pub fn state(&self) -> SessionState {
        if self.is_completed() {
            SessionState::Completed
        } else {
            SessionState::InProgress(self.cursor)
        }
    }

    pub fn progress(&self) -> SessionProgress {
        let total = self.sequence.len();
        let completed = self.cursor.min(total);
        SessionProgress {
            total,
            completed,
            remaining: total - completed,
            is_complete: completed == total,
        }
    }

    /// Start over from the first exercise
    pub fn restart(&mut self) {
        log::info!("Session {} restarted", self.id);
        self.cursor = 0;
    }

    /// Validate a statement against the current exercise, advancing on success
    pub fn validate(&mut self, statement: &str) -> TrainerResult<ValidationOutcome> {
        let outcome = self
            .validator
            .validate(statement, self.current_exercise()?)?;

        if outcome.is_successful() {
            self.cursor += 1;
            match self.state() {
                SessionState::InProgress(index) => {
                    log::info!("Session {} moved to exercise #{}", self.id, index + 1)
                }
                SessionState::Completed => log::info!("Session {} completed", self.id),
            }
        }

        Ok(outcome)
    }
}
