// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Rollback-only transactional executor
//!
//! Every unit of work runs inside a fresh transaction that is rolled back
//! when the work finishes, whatever the outcome:
//! - Success: rollback, then hand back the work's value
//! - Failure: rollback, then propagate the work's failure
//! - Panic: the guard's `Drop` rolls back while unwinding
//!
//! Nothing executed through this module is ever committed.

use super::error::{ExecutionFailure, ExecutionResult};
use super::state::{TransactionState, TransactionStatus};
use crate::driver::{GraphDatabase, Parameters, Transaction, TransactionOptions};
use crate::result::Row;
use std::sync::Arc;
use std::time::Duration;

/// Runs units of work in transactions that are always rolled back
#[derive(Clone)]
pub struct TransactionalExecutor {
    database: Arc<dyn GraphDatabase>,
    options: TransactionOptions,
}

impl TransactionalExecutor {
    pub fn new(database: Arc<dyn GraphDatabase>) -> Self {
        Self {
            database,
            options: TransactionOptions::default(),
        }
    }

    /// Bound every database round-trip by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Run `work` in a new transaction and roll it back afterwards
    ///
    /// If the work succeeds but the rollback fails, the rollback failure is
    /// returned. If both fail, the work's failure wins and the rollback
    /// failure is logged.
    pub fn run<T, F>(&self, work: F) -> ExecutionResult<T>
    where
        F: FnOnce(&mut TransactionHandle<'_, '_>) -> ExecutionResult<T>,
    {
        let transaction = self.database.begin(&self.options)?;
        let mut guard = RollbackGuard::new(transaction);
        log::debug!(
            "{}: opened on {}",
            guard.state.id,
            self.database.describe()
        );

        let outcome = {
            let mut handle = guard.handle();
            work(&mut handle)
        };
        let rollback = guard.finish();

        match (outcome, rollback) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(rollback_failure)) => Err(rollback_failure),
            (Err(failure), Ok(())) => Err(failure),
            (Err(failure), Err(rollback_failure)) => {
                log::warn!("{}", rollback_failure);
                Err(failure)
            }
        }
    }
}

impl std::fmt::Debug for TransactionalExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionalExecutor")
            .field("database", &self.database.describe())
            .field("options", &self.options)
            .finish()
    }
}

/// Handle given to a unit of work for executing statements
pub struct TransactionHandle<'t, 'db> {
    transaction: &'t mut (dyn Transaction + 'db),
    state: &'t mut TransactionState,
}

impl TransactionHandle<'_, '_> {
    /// Execute a statement without parameters and collect its rows
    pub fn run(&mut self, statement: &str) -> ExecutionResult<Vec<Row>> {
        self.run_with(statement, &Parameters::new())
    }

    /// Execute a statement with parameters and collect its rows
    pub fn run_with(
        &mut self,
        statement: &str,
        parameters: &Parameters,
    ) -> ExecutionResult<Vec<Row>> {
        self.state.statements += 1;
        log::debug!(
            "{}: statement #{}: {}",
            self.state.id,
            self.state.statements,
            statement
        );

        let rows = self.transaction.execute(statement, parameters)?;
        log::debug!("{}: {} row(s)", self.state.id, rows.len());
        Ok(rows)
    }
}

/// Owns an open transaction and guarantees it is rolled back exactly once
struct RollbackGuard<'db> {
    transaction: Box<dyn Transaction + 'db>,
    state: TransactionState,
}

impl<'db> RollbackGuard<'db> {
    fn new(transaction: Box<dyn Transaction + 'db>) -> Self {
        Self {
            transaction,
            state: TransactionState::new(),
        }
    }

    fn handle(&mut self) -> TransactionHandle<'_, 'db> {
        TransactionHandle {
            transaction: self.transaction.as_mut(),
            state: &mut self.state,
        }
    }

    fn finish(&mut self) -> ExecutionResult<()> {
        if !self.state.is_active() {
            return Ok(());
        }

        match self.transaction.rollback() {
            Ok(()) => {
                self.state.status = TransactionStatus::RolledBack;
                log::debug!(
                    "{}: rolled back after {} statement(s) in {:?}",
                    self.state.id,
                    self.state.statements,
                    self.state.elapsed()
                );
                Ok(())
            }
            Err(failure) => {
                self.state.status = TransactionStatus::Failed(failure.to_string());
                Err(ExecutionFailure::rollback(format!(
                    "failed to roll back {}: {}",
                    self.state.id, failure
                )))
            }
        }
    }
}

impl Drop for RollbackGuard<'_> {
    fn drop(&mut self) {
        if self.state.is_active() {
            if let Err(failure) = self.finish() {
                log::warn!("Rollback on drop: {}", failure);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::txn::error::FailureKind;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Journal {
        events: Mutex<Vec<String>>,
        fail_rollback: bool,
    }

    impl Journal {
        fn push(&self, event: impl Into<String>) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event.into());
            }
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().map(|e| e.clone()).unwrap_or_default()
        }
    }

    struct JournalDatabase(Arc<Journal>);

    struct JournalTransaction(Arc<Journal>);

    impl GraphDatabase for JournalDatabase {
        fn begin(
            &self,
            _options: &TransactionOptions,
        ) -> ExecutionResult<Box<dyn Transaction + '_>> {
            self.0.push("begin");
            Ok(Box::new(JournalTransaction(self.0.clone())))
        }

        fn describe(&self) -> String {
            "journal".to_string()
        }
    }

    impl Transaction for JournalTransaction {
        fn execute(&mut self, statement: &str, _parameters: &Parameters) -> ExecutionResult<Vec<Row>> {
            self.0.push(format!("execute {}", statement));
            if statement == "BOOM" {
                return Err(ExecutionFailure::statement(
                    "Neo.ClientError.Statement.SyntaxError",
                    "Invalid input 'B'",
                ));
            }
            Ok(vec![Row::new().with("statement", statement)])
        }

        fn rollback(&mut self) -> ExecutionResult<()> {
            self.0.push("rollback");
            if self.0.fail_rollback {
                return Err(ExecutionFailure::connection("connection reset"));
            }
            Ok(())
        }
    }

    fn executor(journal: &Arc<Journal>) -> TransactionalExecutor {
        TransactionalExecutor::new(Arc::new(JournalDatabase(journal.clone())))
    }

    #[test]
    fn test_success_is_rolled_back() {
        let journal = Arc::new(Journal::default());
        let rows = executor(&journal)
            .run(|tx| tx.run("RETURN 1"))
            .expect("work should succeed");

        assert_eq!(rows.len(), 1);
        assert_eq!(journal.events(), vec!["begin", "execute RETURN 1", "rollback"]);
    }

    #[test]
    fn test_failure_is_rolled_back_then_propagated() {
        let journal = Arc::new(Journal::default());
        let failure = executor(&journal)
            .run(|tx| {
                tx.run("CREATE (:Person)")?;
                tx.run("BOOM")
            })
            .expect_err("work should fail");

        assert_eq!(failure.report_message(), "Invalid input 'B'");
        assert_eq!(
            journal.events(),
            vec!["begin", "execute CREATE (:Person)", "execute BOOM", "rollback"]
        );
    }

    #[test]
    fn test_panic_still_rolls_back() {
        let journal = Arc::new(Journal::default());
        let executor = executor(&journal);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            executor.run(|tx| -> ExecutionResult<()> {
                tx.run("CREATE (:Person)")?;
                panic!("unit of work blew up");
            })
        }));

        assert!(result.is_err());
        assert_eq!(
            journal.events(),
            vec!["begin", "execute CREATE (:Person)", "rollback"]
        );
    }

    #[test]
    fn test_rollback_failure_surfaces_after_success() {
        let journal = Arc::new(Journal {
            fail_rollback: true,
            ..Journal::default()
        });
        let failure = executor(&journal)
            .run(|tx| tx.run("RETURN 1"))
            .expect_err("rollback failure must surface");

        assert_eq!(failure.kind, FailureKind::Rollback);
        assert_eq!(journal.events().iter().filter(|e| *e == "rollback").count(), 1);
    }

    #[test]
    fn test_work_failure_wins_over_rollback_failure() {
        let journal = Arc::new(Journal {
            fail_rollback: true,
            ..Journal::default()
        });
        let failure = executor(&journal)
            .run(|tx| tx.run("BOOM"))
            .expect_err("work failure");

        assert_eq!(failure.kind, FailureKind::Statement);
    }
}
