// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Trainer error types

use crate::config::ConfigError;
use crate::exercise::ExerciseId;
use crate::result::CodecError;
use crate::txn::ExecutionFailure;
use thiserror::Error;

/// Errors raised while building or loading an exercise sequence
#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("Duplicate exercise id: {0}")]
    DuplicateId(ExerciseId),

    #[error("Duplicate exercise rank: {0}")]
    DuplicateRank(u32),

    #[error("Invalid expected result for exercise {id}: {source}")]
    InvalidPayload { id: ExerciseId, source: CodecError },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Errors raised while exporting exercise drafts
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Draft #{index} failed: {source}")]
    Draft {
        index: usize,
        source: ExecutionFailure,
    },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Top-level trainer errors
#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("Session is completed: no exercise left")]
    SessionCompleted,

    #[error("Exercise {id} has a corrupt expected result: {source}")]
    CorruptExercise { id: ExerciseId, source: CodecError },

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionFailure),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type TrainerResult<T> = Result<T, TrainerError>;
