// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Inspect command handler

use super::output::ResultFormatter;
use colored::Colorize;
use cyphertrainer::{ExerciseKind, ExerciseSequence};
use std::path::PathBuf;

/// Print every exercise of a bundle with its decoded expected rows
pub fn handle_inspect(exercises: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let sequence = ExerciseSequence::load(&exercises)?;
    println!(
        "{}",
        format!("{} exercise(s) in {}", sequence.len(), exercises.display())
            .bold()
            .green()
    );

    let mut corrupt = 0;
    for exercise in &sequence {
        let kind = match exercise.kind() {
            ExerciseKind::Read => "read",
            ExerciseKind::Write { .. } => "write",
        };
        println!(
            "\n{} (id {}, {})",
            format!("#{}", exercise.rank()).bold(),
            exercise.id(),
            kind
        );
        println!("{}", exercise.instructions());
        if let Some(solution) = exercise.solution_query() {
            println!("  {} {}", "solution:".cyan(), solution);
        }
        if let Some(validation) = exercise.write_validation_query() {
            println!("  {} {}", "validation:".cyan(), validation);
        }

        match exercise.expected_result().decode() {
            Ok(rows) => print!("{}", ResultFormatter::format_rows(&rows)),
            Err(e) => {
                corrupt += 1;
                println!("{}", format!("Corrupt expected result: {}", e).red());
            }
        }
    }

    if corrupt > 0 {
        return Err(format!("{} exercise(s) have corrupt expected results", corrupt).into());
    }
    Ok(())
}
