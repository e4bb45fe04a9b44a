// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Statement syntax checking

use crate::txn::TransactionalExecutor;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static OFFSET_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"offset: (\d+)").ok());

/// Syntax problem found in a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    /// Character offset into the statement, when known
    pub position: Option<usize>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    pub fn at(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position: Some(position),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} (at offset {})", self.message, position),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Checks statements before they are executed
pub trait StatementValidator {
    /// Syntax errors in `statement`; empty when it parses
    fn validate(&self, statement: &str) -> Vec<SyntaxError>;
}

/// Validator that asks the database to `EXPLAIN` the statement
///
/// Only failures the engine classifies as syntax errors are reported. Any
/// other failure is left for execution to report.
#[derive(Debug, Clone)]
pub struct ExplainValidator {
    executor: TransactionalExecutor,
}

impl ExplainValidator {
    pub fn new(executor: TransactionalExecutor) -> Self {
        Self { executor }
    }
}

impl StatementValidator for ExplainValidator {
    fn validate(&self, statement: &str) -> Vec<SyntaxError> {
        if statement.trim().is_empty() {
            return vec![SyntaxError::new("Statement is empty")];
        }

        let explain = format!("EXPLAIN {}", statement);
        match self.executor.run(|tx| tx.run(&explain)) {
            Ok(_) => Vec::new(),
            Err(failure) if failure.is_syntax_error() => {
                let message = failure.report_message();
                vec![SyntaxError {
                    message: message.to_string(),
                    position: parse_offset(message),
                }]
            }
            Err(failure) => {
                log::debug!("EXPLAIN failed without a syntax error: {}", failure);
                Vec::new()
            }
        }
    }
}

fn parse_offset(message: &str) -> Option<usize> {
    OFFSET_PATTERN
        .as_ref()?
        .captures(message)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
