// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CypherTrainer CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    match &cli.command {
        Commands::Version => {
            println!("{} {}", "CypherTrainer".bold().green(), cyphertrainer::VERSION);
            println!("Interactive Cypher exercise trainer");
            Ok(())
        }

        Commands::Inspect { exercises } => cli::handle_inspect(exercises.clone()),

        Commands::Train { exercises } => {
            let config = cli::resolve_config(&cli)?;
            cli::handle_train(config, exercises.clone())
        }

        Commands::Export {
            drafts,
            output,
            format,
        } => {
            let config = cli::resolve_config(&cli)?;
            cli::handle_export(config, drafts.clone(), output.clone(), *format)
        }
    }
}
