// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Database capability contract
//!
//! The trainer needs very little from a graph database: open a transaction,
//! run statements in it and collect their rows, and roll it back. Transport
//! and wire protocol live behind these traits.
//!
//! - [`GraphDatabase`] opens transactions
//! - [`Transaction`] executes statements and rolls back
//! - [`http`] talks to a Neo4j-compatible HTTP transactional endpoint

#[cfg(feature = "http-driver")]
pub mod http;

use crate::result::{Row, Value};
use crate::txn::error::ExecutionResult;
use std::collections::BTreeMap;
use std::time::Duration;

#[cfg(feature = "http-driver")]
pub use http::HttpGraphDatabase;

/// Statement parameters, bound by name (`$name` in Cypher)
pub type Parameters = BTreeMap<String, Value>;

/// Options applied when a transaction is opened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionOptions {
    /// Upper bound for any single database round-trip
    pub timeout: Option<Duration>,
}

/// A database that can open transactions
pub trait GraphDatabase: Send + Sync {
    /// Open a new transaction
    fn begin(&self, options: &TransactionOptions) -> ExecutionResult<Box<dyn Transaction + '_>>;

    /// Short description for logs (endpoint, database name)
    fn describe(&self) -> String;
}

/// An open database transaction
///
/// Implementations must tolerate `rollback` after the engine already
/// discarded the transaction (for example after a failed statement).
pub trait Transaction {
    /// Execute one statement and collect its rows in order
    fn execute(&mut self, statement: &str, parameters: &Parameters) -> ExecutionResult<Vec<Row>>;

    /// Discard every change made in this transaction
    fn rollback(&mut self) -> ExecutionResult<()>;
}
