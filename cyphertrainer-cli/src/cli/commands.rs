// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cyphertrainer")]
#[command(about = "Interactive, transaction-safe Cypher exercise trainer", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<log::Level>,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database HTTP endpoint, e.g. http://localhost:7474
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Database name
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Username
    #[arg(short = 'u', long = "user", global = true)]
    pub user: Option<String>,

    /// Password (prompted for when needed and not given)
    #[arg(short = 'p', long, global = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive training session
    Train {
        /// Exercise bundle; defaults to the configured bundle, then to the
        /// :Exercise nodes stored in the database
        #[arg(short, long)]
        exercises: Option<PathBuf>,
    },

    /// Run exercise drafts once and capture their expected results
    Export {
        /// JSON array of drafts
        #[arg(short, long)]
        drafts: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },

    /// Show the exercises of a bundle and their expected rows
    Inspect {
        #[arg(short, long)]
        exercises: PathBuf,
    },

    /// Show version information
    Version,
}

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Exercise bundle file
    Json,
    /// Cypher script storing :Exercise nodes
    Cypher,
}
