// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Fallback command: treat the input as a Cypher statement

use super::command::{Command, CommandFlow};
use super::logger::ConsoleLogger;
use crate::error::TrainerResult;
use crate::session::TraineeSession;
use crate::syntax::StatementValidator;

pub const SYNTAX_ERROR_HEADER: &str = "An error occurred with your query. See details below:";
pub const COMPLETED_MESSAGE: &str = "Congrats, you're done!!!";
pub const NEXT_EXERCISE_MESSAGE: &str = "Now moving on to next exercise! See instructions below...";
pub const ALREADY_COMPLETED_MESSAGE: &str =
    "All exercises are completed. Type :reset to start over or :exit to leave.";

/// Validates the statement against the current exercise and reports the outcome
pub struct StatementCommand {
    validator: Box<dyn StatementValidator>,
}

impl StatementCommand {
    pub fn new(validator: Box<dyn StatementValidator>) -> Self {
        Self { validator }
    }
}

impl Command for StatementCommand {
    fn name(&self) -> &str {
        "statement"
    }

    fn help(&self) -> &str {
        "Any other input is run as a Cypher statement against the current exercise"
    }

    fn matches(&self, input: &str) -> bool {
        !input.trim_start().starts_with(':')
    }

    fn accept(
        &self,
        session: &mut TraineeSession,
        input: &str,
        console: &mut dyn ConsoleLogger,
    ) -> TrainerResult<CommandFlow> {
        if session.is_completed() {
            console.information(ALREADY_COMPLETED_MESSAGE);
            return Ok(CommandFlow::Continue);
        }

        let errors = self.validator.validate(input);
        if !errors.is_empty() {
            console.error(SYNTAX_ERROR_HEADER);
            for error in &errors {
                console.error(&error.to_string());
            }
            return Ok(CommandFlow::Continue);
        }

        let outcome = session.validate(input)?;
        if !outcome.is_successful() {
            console.failure(outcome.report());
            return Ok(CommandFlow::Continue);
        }

        if session.is_completed() {
            console.success(COMPLETED_MESSAGE);
            return Ok(CommandFlow::Continue);
        }

        console.success(outcome.report());
        console.information(NEXT_EXERCISE_MESSAGE);
        console.information(session.current_exercise()?.instructions());
        Ok(CommandFlow::Continue)
    }
}
