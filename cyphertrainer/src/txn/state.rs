// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction identity and lifecycle state
//!
//! Every transaction the trainer opens is rolled back; the status is tracked
//! for logging and for the rollback guard.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_TRANSACTION_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a transaction, process-wide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Allocate the next transaction id
    pub fn next() -> Self {
        TransactionId(NEXT_TRANSACTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the underlying ID value
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "txn_{}", self.0)
    }
}

/// Transaction lifecycle states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Transaction is open and accepting statements
    Active,
    /// Transaction has been rolled back
    RolledBack,
    /// Rollback was attempted and failed
    Failed(String),
}

/// Bookkeeping for one executor transaction
#[derive(Debug, Clone)]
pub struct TransactionState {
    pub id: TransactionId,
    pub status: TransactionStatus,
    pub started: Instant,
    /// Number of statements executed so far
    pub statements: usize,
}

impl TransactionState {
    pub fn new() -> Self {
        Self {
            id: TransactionId::next(),
            status: TransactionStatus::Active,
            started: Instant::now(),
            statements: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TransactionStatus::Active
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for TransactionState {
    fn default() -> Self {
        Self::new()
    }
}
