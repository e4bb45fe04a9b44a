// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction execution for the trainer
//!
//! Candidate statements must never leave a trace in the database, so the
//! only way this crate runs statements is through [`TransactionalExecutor`],
//! which always rolls back.
//!
//! # Features
//! - Scoped transactions with guaranteed rollback (also on panic)
//! - Engine-reported failures surfaced as structured [`ExecutionFailure`]s
//! - Per-transaction ids for log correlation

pub mod error;
pub mod executor;
pub mod state;

pub use error::{ExecutionFailure, ExecutionResult, FailureKind};
pub use executor::{TransactionHandle, TransactionalExecutor};
pub use state::{TransactionId, TransactionState, TransactionStatus};
