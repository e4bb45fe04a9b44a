// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CypherTrainer - An interactive, transaction-safe Cypher exercise trainer
//!
//! A trainee works through a rank-ordered sequence of exercises. Each
//! statement they type runs against a live graph database inside a
//! transaction that is always rolled back, and the rows it produces are
//! compared with the exercise's stored expected result.
//!
//! # Features
//!
//! - **Rollback-only execution**: nothing a trainee runs is ever committed
//! - **Read and write exercises**: write exercises are checked through a
//!   validation query run in the same transaction
//! - **Versioned result snapshots**: expected results are stored in a
//!   checksummed binary format, base-64 encoded in exercise records
//! - **Precise feedback**: mismatches are reported field by field
//! - **Exercise export**: authored drafts are run once to capture their
//!   expected results
//!
//! # Usage
//!
//! ```bash
//! # Capture expected results for authored drafts
//! cyphertrainer export --drafts drafts.json --output exercises.json
//!
//! # Start a training session
//! cyphertrainer -u neo4j train --exercises exercises.json
//! ```

pub mod config;
pub mod console;
pub mod driver;
pub mod error;
pub mod exercise;
pub mod result;
pub mod session;
pub mod syntax;
pub mod txn;

pub use config::{ConfigError, TrainerConfig};
pub use console::{CommandFlow, CommandRegistry, ConsoleLogger};
pub use driver::{GraphDatabase, Parameters, Transaction, TransactionOptions};
#[cfg(feature = "http-driver")]
pub use driver::HttpGraphDatabase;
pub use error::{ExportError, SequenceError, TrainerError, TrainerResult};
pub use exercise::{
    Exercise, ExerciseBundle, ExerciseDraft, ExerciseExporter, ExerciseId, ExerciseKind,
    ExerciseRecord, ExerciseSequence,
};
pub use result::{CodecError, ExpectedResult, Row, Value};
pub use session::{
    SessionProgress, SessionState, SessionValidator, TraineeSession, ValidationOutcome,
};
pub use syntax::{ExplainValidator, StatementValidator, SyntaxError};
pub use txn::{ExecutionFailure, ExecutionResult, FailureKind, TransactionalExecutor};

/// CypherTrainer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
