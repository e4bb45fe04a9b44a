// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Interactive training console

use super::output::ColoredConsole;
use colored::Colorize;
use cyphertrainer::exercise::load_from_graph;
use cyphertrainer::{
    CommandFlow, CommandRegistry, ExerciseSequence, ExplainValidator, SessionValidator,
    TraineeSession, TrainerConfig, TrainerError,
};
use rustyline::{error::ReadlineError, CompletionType, Config, EditMode, Editor};
use std::path::PathBuf;
use std::sync::Arc;

/// Handle the train command
pub fn handle_train(
    mut config: TrainerConfig,
    exercises: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let executor = super::connect(&mut config)?;

    let sequence = match exercises.or_else(|| config.exercises.clone()) {
        Some(path) => ExerciseSequence::load(&path)?,
        None => ExerciseSequence::from_records(load_from_graph(&executor)?)?,
    };

    if let Err(e) = sequence.verify() {
        eprintln!("{}", format!("Exercise data fault: {}", e).red());
        return Err(e.into());
    }

    if sequence.is_empty() {
        println!("{}", "No exercises found.".yellow());
        return Ok(());
    }

    let mut session = TraineeSession::new(
        Arc::new(sequence),
        SessionValidator::new(executor.clone()),
    );
    let registry = CommandRegistry::new(Box::new(ExplainValidator::new(executor)));
    let mut console = ColoredConsole;

    println!("{}", "CypherTrainer".bold().green());
    println!("Type ':help' for commands, ':exit' or ':quit' to exit");
    println!("Multi-line statements supported - use ';' to terminate\n");
    println!("{}", format!("Connected as: {}", config.username).cyan());
    println!("Session ID: {}\n", session.id());
    registry.dispatch(&mut session, ":instructions", &mut console)?;

    // Create REPL editor
    let editor_config = Config::builder()
        .edit_mode(EditMode::Emacs)
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();

    let mut rl = Editor::<(), _>::with_config(editor_config)?;

    let history_path = config.history_file.clone();
    if let Some(parent) = history_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let _ = rl.load_history(&history_path);

    let mut buffer = String::new();
    let mut outcome: Result<(), Box<dyn std::error::Error>> = Ok(());

    loop {
        let prompt = if buffer.is_empty() {
            let progress = session.progress();
            format!(
                "{}> ",
                format!("cypher[{}/{}]", progress.completed, progress.total).cyan()
            )
        } else {
            format!("{}> ", "...".cyan())
        };

        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                if !buffer.is_empty() {
                    buffer.clear();
                    println!("{}", "\nStatement buffer cleared".yellow());
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim();
        if buffer.is_empty() && trimmed.is_empty() {
            continue;
        }

        // `:` commands run immediately; statements wait for their terminator
        let input = if buffer.is_empty() && trimmed.starts_with(':') {
            trimmed.to_string()
        } else {
            buffer.push_str(&line);
            buffer.push('\n');
            if !trimmed.ends_with(';') {
                continue;
            }
            std::mem::take(&mut buffer).trim().to_string()
        };

        rl.add_history_entry(input.as_str())?;

        match registry.dispatch(&mut session, &input, &mut console) {
            Ok(CommandFlow::Continue) => {}
            Ok(CommandFlow::Exit) => break,
            Err(e @ TrainerError::CorruptExercise { .. }) => {
                log::error!("Exercise data fault: {}", e);
                eprintln!("{}", format!("Exercise data fault: {}", e).red());
                outcome = Err(e.into());
                break;
            }
            Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
        }
    }

    let _ = rl.save_history(&history_path);
    outcome
}
