// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Execution failure types

use std::time::Duration;
use thiserror::Error;

/// What went wrong while talking to the database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The database could not be reached or refused the session
    Connection,
    /// The engine rejected or failed a statement
    Statement,
    /// The round-trip exceeded the configured statement timeout
    Timeout,
    /// The transaction could not be rolled back
    Rollback,
    /// The database answered with something the driver cannot interpret
    Protocol,
}

/// Failure raised while executing statements inside a transaction
///
/// Drivers fill in `code` and `engine_message` when the database reports the
/// error itself, so callers never need to dig through wrapped errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ExecutionFailure {
    pub kind: FailureKind,
    pub message: String,
    /// Engine status code, e.g. `Neo.ClientError.Statement.SyntaxError`
    pub code: Option<String>,
    /// Message reported by the database engine
    pub engine_message: Option<String>,
}

impl ExecutionFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            engine_message: None,
        }
    }

    /// Statement rejected by the engine, with its status code and message
    pub fn statement(code: impl Into<String>, engine_message: impl Into<String>) -> Self {
        let code = code.into();
        let engine_message = engine_message.into();
        Self {
            kind: FailureKind::Statement,
            message: format!("{}: {}", code, engine_message),
            code: Some(code),
            engine_message: Some(engine_message),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Connection, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Protocol, message)
    }

    pub fn rollback(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Rollback, message)
    }

    pub fn timeout(limit: Option<Duration>) -> Self {
        let message = match limit {
            Some(limit) => format!("statement timed out after {} ms", limit.as_millis()),
            None => "statement timed out".to_string(),
        };
        Self::new(FailureKind::Timeout, message)
    }

    /// Message to show a trainee: the engine's own words when available
    pub fn report_message(&self) -> &str {
        self.engine_message.as_deref().unwrap_or(&self.message)
    }

    /// Whether the engine classified this as a syntax error
    pub fn is_syntax_error(&self) -> bool {
        self.code
            .as_deref()
            .map_or(false, |code| code.ends_with("SyntaxError"))
    }
}

pub type ExecutionResult<T> = Result<T, ExecutionFailure>;
