// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Console command abstraction

use super::logger::ConsoleLogger;
use crate::error::TrainerResult;
use crate::session::TraineeSession;

/// What the console loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFlow {
    Continue,
    Exit,
}

/// Console command
pub trait Command {
    fn name(&self) -> &str;

    /// One-line description shown by `:help`
    fn help(&self) -> &str;

    fn matches(&self, input: &str) -> bool;

    fn accept(
        &self,
        session: &mut TraineeSession,
        input: &str,
        console: &mut dyn ConsoleLogger,
    ) -> TrainerResult<CommandFlow>;
}
