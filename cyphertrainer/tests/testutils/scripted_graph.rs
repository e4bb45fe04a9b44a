//! In-memory graph database for tests
//!
//! Understands:
//! - `CREATE (:Label)`
//! - `MATCH (n) RETURN count(n) AS c`
//! - `MATCH (x:Label) RETURN count(x) AS c`
//! - `EXPLAIN <any of the above>`
//!
//! Canned responses registered with `respond` take precedence. Anything else
//! fails with an engine syntax error.

use cyphertrainer::{
    ExecutionFailure, ExecutionResult, GraphDatabase, Parameters, Row, Transaction,
    TransactionOptions,
};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

pub const SYNTAX_ERROR_CODE: &str = "Neo.ClientError.Statement.SyntaxError";

#[derive(Debug, Default)]
struct GraphState {
    /// Committed node counts per label
    committed: BTreeMap<String, i64>,
    responses: HashMap<String, ExecutionResult<Vec<Row>>>,
    begin_failure: Option<ExecutionFailure>,
    rollback_failure: Option<ExecutionFailure>,
    transactions: usize,
    rollbacks: usize,
    executed: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ScriptedGraph {
    state: Mutex<GraphState>,
}

impl ScriptedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `count` nodes labelled `label` are already committed
    pub fn seed(&self, label: &str, count: i64) {
        self.lock().committed.insert(label.to_string(), count);
    }

    pub fn respond(&self, statement: &str, response: ExecutionResult<Vec<Row>>) {
        self.lock().responses.insert(statement.to_string(), response);
    }

    pub fn fail_begin(&self, failure: ExecutionFailure) {
        self.lock().begin_failure = Some(failure);
    }

    pub fn fail_rollback(&self, failure: ExecutionFailure) {
        self.lock().rollback_failure = Some(failure);
    }

    pub fn committed_count(&self, label: &str) -> i64 {
        self.lock().committed.get(label).copied().unwrap_or(0)
    }

    pub fn transactions(&self) -> usize {
        self.lock().transactions
    }

    pub fn rollbacks(&self) -> usize {
        self.lock().rollbacks
    }

    pub fn executed(&self) -> Vec<String> {
        self.lock().executed.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GraphState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl GraphDatabase for ScriptedGraph {
    fn begin(&self, _options: &TransactionOptions) -> ExecutionResult<Box<dyn Transaction + '_>> {
        let mut state = self.lock();
        if let Some(failure) = state.begin_failure.clone() {
            return Err(failure);
        }
        state.transactions += 1;
        Ok(Box::new(ScriptedTransaction {
            graph: self,
            working: state.committed.clone(),
        }))
    }

    fn describe(&self) -> String {
        "scripted graph".to_string()
    }
}

struct ScriptedTransaction<'a> {
    graph: &'a ScriptedGraph,
    /// Uncommitted view of the node counts
    working: BTreeMap<String, i64>,
}

impl Transaction for ScriptedTransaction<'_> {
    fn execute(&mut self, statement: &str, _parameters: &Parameters) -> ExecutionResult<Vec<Row>> {
        let canned = {
            let mut state = self.graph.lock();
            state.executed.push(statement.to_string());
            state.responses.get(statement).cloned()
        };
        if let Some(response) = canned {
            return response;
        }

        match statement.strip_prefix("EXPLAIN ") {
            Some(inner) => apply(&mut self.working.clone(), inner).map(|_| Vec::new()),
            None => apply(&mut self.working, statement),
        }
    }

    fn rollback(&mut self) -> ExecutionResult<()> {
        let mut state = self.graph.lock();
        state.rollbacks += 1;
        self.working.clear();
        match state.rollback_failure.clone() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

fn apply(counts: &mut BTreeMap<String, i64>, statement: &str) -> ExecutionResult<Vec<Row>> {
    let create = Regex::new(r"^CREATE \(:(\w+)\)$").expect("pattern");
    let count_all = Regex::new(r"^MATCH \((\w+)\) RETURN count\((\w+)\) AS (\w+)$").expect("pattern");
    let count_label =
        Regex::new(r"^MATCH \((\w+):(\w+)\) RETURN count\((\w+)\) AS (\w+)$").expect("pattern");

    let statement = statement.trim();
    if let Some(captures) = create.captures(statement) {
        *counts.entry(captures[1].to_string()).or_insert(0) += 1;
        return Ok(Vec::new());
    }
    if let Some(captures) = count_all.captures(statement) {
        if captures[1] == captures[2] {
            let total: i64 = counts.values().sum();
            return Ok(vec![Row::new().with(&captures[3], total)]);
        }
    }
    if let Some(captures) = count_label.captures(statement) {
        if captures[1] == captures[3] {
            let count = counts.get(&captures[2]).copied().unwrap_or(0);
            return Ok(vec![Row::new().with(&captures[4], count)]);
        }
    }

    let token = statement.split_whitespace().next().unwrap_or("");
    Err(ExecutionFailure::statement(
        SYNTAX_ERROR_CODE,
        format!("Invalid input '{}' (line 1, column 1 (offset: 0))", token),
    ))
}
