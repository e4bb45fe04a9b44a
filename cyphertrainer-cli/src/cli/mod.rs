// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for CypherTrainer
//!
//! Provides the interactive training console, exercise export and bundle
//! inspection.

pub mod commands;
pub mod export;
pub mod inspect;
pub mod output;
pub mod train;

pub use commands::{Cli, Commands, ExportFormat};
pub use export::handle_export;
pub use inspect::handle_inspect;
pub use train::handle_train;

use cyphertrainer::{HttpGraphDatabase, TrainerConfig, TransactionalExecutor};
use std::sync::Arc;

/// Configuration file values overridden by command-line flags
pub fn resolve_config(cli: &Cli) -> Result<TrainerConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => TrainerConfig::load(path)?,
        None => TrainerConfig::default(),
    };

    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(database) = &cli.database {
        config.database = database.clone();
    }
    if let Some(user) = &cli.user {
        config.username = user.clone();
    }
    if let Some(password) = &cli.password {
        config.password = Some(password.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Open the configured database, prompting for a password when none is set
pub fn connect(config: &mut TrainerConfig) -> Result<TransactionalExecutor, Box<dyn std::error::Error>> {
    if config.password.is_none() {
        print!("Password for {}: ", config.username);
        std::io::Write::flush(&mut std::io::stdout())?;
        let password = rpassword::read_password()?;
        if !password.is_empty() {
            config.password = Some(password);
        }
    }

    let database = HttpGraphDatabase::from_config(config);
    log::info!("Connecting to {}", cyphertrainer::GraphDatabase::describe(&database));

    Ok(TransactionalExecutor::new(Arc::new(database)).with_timeout(config.statement_timeout()))
}
