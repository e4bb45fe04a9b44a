// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Export command handler

use super::commands::ExportFormat;
use colored::Colorize;
use cyphertrainer::exercise::to_cypher_script;
use cyphertrainer::{ExerciseBundle, ExerciseDraft, ExerciseExporter, TrainerConfig};
use std::path::PathBuf;

/// Run every draft once and write the resulting exercises
pub fn handle_export(
    mut config: TrainerConfig,
    drafts: PathBuf,
    output: PathBuf,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let drafts = ExerciseDraft::load_all(&drafts)?;
    println!("Exporting {} draft(s)...", drafts.len());

    let executor = super::connect(&mut config)?;
    let records = ExerciseExporter::new(executor).export(&drafts)?;

    match format {
        ExportFormat::Json => ExerciseBundle::new(records.clone()).write_to(&output)?,
        ExportFormat::Cypher => std::fs::write(&output, to_cypher_script(&records))?,
    }

    println!(
        "{}",
        format!("Exported {} exercise(s) to {}", records.len(), output.display()).green()
    );
    Ok(())
}
