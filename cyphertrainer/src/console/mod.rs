// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Console front-end contract
//!
//! Front ends feed complete inputs to `CommandRegistry::dispatch` and render
//! what commands report through their `ConsoleLogger`.

pub mod builtin;
pub mod command;
pub mod logger;
pub mod registry;
pub mod statement;

pub use builtin::{ExitCommand, HelpCommand, InstructionsCommand, ProgressCommand, ResetCommand};
pub use command::{Command, CommandFlow};
pub use logger::ConsoleLogger;
pub use registry::{strip_terminator, CommandRegistry};
pub use statement::{
    StatementCommand, ALREADY_COMPLETED_MESSAGE, COMPLETED_MESSAGE, NEXT_EXERCISE_MESSAGE,
    SYNTAX_ERROR_HEADER,
};
