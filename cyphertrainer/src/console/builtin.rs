// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Built-in `:` commands

use super::command::{Command, CommandFlow};
use super::logger::ConsoleLogger;
use crate::error::TrainerResult;
use crate::session::TraineeSession;

fn is_command(input: &str, name: &str) -> bool {
    input.trim().eq_ignore_ascii_case(name)
}

/// Print the current exercise's instructions, or the completion notice
fn show_current(session: &TraineeSession, console: &mut dyn ConsoleLogger) {
    match session.current_exercise() {
        Ok(exercise) => {
            let progress = session.progress();
            console.information(&format!(
                "Exercise {}/{}:",
                progress.completed + 1,
                progress.total
            ));
            console.information(exercise.instructions());
        }
        Err(_) => console.information("All exercises are completed."),
    }
}

/// Lists commands
pub struct HelpCommand {
    entries: Vec<(String, String)>,
}

impl HelpCommand {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        ":help"
    }

    fn help(&self) -> &str {
        "Show this help"
    }

    fn matches(&self, input: &str) -> bool {
        is_command(input, ":help")
    }

    fn accept(
        &self,
        _session: &mut TraineeSession,
        _input: &str,
        console: &mut dyn ConsoleLogger,
    ) -> TrainerResult<CommandFlow> {
        console.information("Available commands:");
        for (name, help) in &self.entries {
            console.information(&format!("  {:<15} {}", name, help));
        }
        console.information("Statements end with ';' and may span several lines.");
        Ok(CommandFlow::Continue)
    }
}

pub struct InstructionsCommand;

impl Command for InstructionsCommand {
    fn name(&self) -> &str {
        ":instructions"
    }

    fn help(&self) -> &str {
        "Show the current exercise's instructions"
    }

    fn matches(&self, input: &str) -> bool {
        is_command(input, ":instructions")
    }

    fn accept(
        &self,
        session: &mut TraineeSession,
        _input: &str,
        console: &mut dyn ConsoleLogger,
    ) -> TrainerResult<CommandFlow> {
        show_current(session, console);
        Ok(CommandFlow::Continue)
    }
}

pub struct ProgressCommand;

impl Command for ProgressCommand {
    fn name(&self) -> &str {
        ":progress"
    }

    fn help(&self) -> &str {
        "Show how many exercises are completed"
    }

    fn matches(&self, input: &str) -> bool {
        is_command(input, ":progress")
    }

    fn accept(
        &self,
        session: &mut TraineeSession,
        _input: &str,
        console: &mut dyn ConsoleLogger,
    ) -> TrainerResult<CommandFlow> {
        console.information(&session.progress().to_string());
        Ok(CommandFlow::Continue)
    }
}

pub struct ResetCommand;

impl Command for ResetCommand {
    fn name(&self) -> &str {
        ":reset"
    }

    fn help(&self) -> &str {
        "Start over from the first exercise"
    }

    fn matches(&self, input: &str) -> bool {
        is_command(input, ":reset")
    }

    fn accept(
        &self,
        session: &mut TraineeSession,
        _input: &str,
        console: &mut dyn ConsoleLogger,
    ) -> TrainerResult<CommandFlow> {
        session.restart();
        console.information("Session restarted. See instructions below...");
        show_current(session, console);
        Ok(CommandFlow::Continue)
    }
}

pub struct ExitCommand;

impl Command for ExitCommand {
    fn name(&self) -> &str {
        ":exit"
    }

    fn help(&self) -> &str {
        "Leave the trainer (also :quit)"
    }

    fn matches(&self, input: &str) -> bool {
        is_command(input, ":exit") || is_command(input, ":quit")
    }

    fn accept(
        &self,
        _session: &mut TraineeSession,
        _input: &str,
        console: &mut dyn ConsoleLogger,
    ) -> TrainerResult<CommandFlow> {
        console.information("Goodbye!");
        Ok(CommandFlow::Exit)
    }
}
