// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Command dispatch

use super::builtin::{ExitCommand, HelpCommand, InstructionsCommand, ProgressCommand, ResetCommand};
use super::command::{Command, CommandFlow};
use super::logger::ConsoleLogger;
use super::statement::StatementCommand;
use crate::error::TrainerResult;
use crate::session::TraineeSession;
use crate::syntax::StatementValidator;

/// Routes console input to the first matching command, falling back to
/// running it as a statement
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    fallback: StatementCommand,
}

impl CommandRegistry {
    pub fn new(validator: Box<dyn StatementValidator>) -> Self {
        let builtins: Vec<Box<dyn Command>> = vec![
            Box::new(InstructionsCommand),
            Box::new(ProgressCommand),
            Box::new(ResetCommand),
            Box::new(ExitCommand),
        ];

        let fallback = StatementCommand::new(validator);
        let mut entries = vec![(":help".to_string(), "Show this help".to_string())];
        entries.extend(
            builtins
                .iter()
                .map(|c| (c.name().to_string(), c.help().to_string())),
        );

        let mut commands: Vec<Box<dyn Command>> = vec![Box::new(HelpCommand::new(entries))];
        commands.extend(builtins);

        Self { commands, fallback }
    }

    /// Names of the `:` commands, in dispatch order
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    pub fn dispatch(
        &self,
        session: &mut TraineeSession,
        input: &str,
        console: &mut dyn ConsoleLogger,
    ) -> TrainerResult<CommandFlow> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(CommandFlow::Continue);
        }

        if let Some(command) = self.commands.iter().find(|c| c.matches(input)) {
            log::debug!("Dispatching {}", command.name());
            return command.accept(session, input, console);
        }

        if !self.fallback.matches(input) {
            console.error(&format!(
                "Unknown command '{}'. Type :help to list commands.",
                input
            ));
            return Ok(CommandFlow::Continue);
        }

        let statement = strip_terminator(input);
        if statement.is_empty() {
            return Ok(CommandFlow::Continue);
        }
        self.fallback.accept(session, statement, console)
    }
}

/// Remove the trailing `;` statement terminator
pub fn strip_terminator(input: &str) -> &str {
    let input = input.trim();
    input.strip_suffix(';').unwrap_or(input).trim_end()
}
