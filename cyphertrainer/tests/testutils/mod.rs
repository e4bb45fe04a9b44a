//! Test utilities for CypherTrainer integration tests
//!
//! - `scripted_graph`: in-memory `GraphDatabase` understanding a handful of
//!   counting statements, with per-transaction working copies
//! - `recording_console`: `ConsoleLogger` that keeps every line it is given

#![allow(dead_code)]

pub mod recording_console;
pub mod scripted_graph;

use cyphertrainer::{
    Exercise, ExerciseSequence, ExpectedResult, Row, SessionValidator, TraineeSession,
    TransactionalExecutor,
};
use scripted_graph::ScriptedGraph;
use std::sync::Arc;

/// Single-row `{c: count}` result
pub fn count_row(count: i64) -> Row {
    Row::new().with("c", count)
}

pub fn expected(rows: &[Row]) -> ExpectedResult {
    ExpectedResult::from_rows(rows).expect("encodable rows")
}

pub fn executor_for(graph: &Arc<ScriptedGraph>) -> TransactionalExecutor {
    TransactionalExecutor::new(graph.clone())
}

pub fn session_for(graph: &Arc<ScriptedGraph>, exercises: Vec<Exercise>) -> TraineeSession {
    let sequence = ExerciseSequence::from_exercises(exercises).expect("valid sequence");
    TraineeSession::new(
        Arc::new(sequence),
        SessionValidator::new(executor_for(graph)),
    )
}

/// "Count all nodes", expecting an empty graph
pub fn count_nodes_exercise(id: u64, rank: u32) -> Exercise {
    Exercise::read(id, rank, "Count all nodes", expected(&[count_row(0)]))
        .with_solution("MATCH (n) RETURN count(n) AS c")
}

/// "Create one person", checked by counting persons
pub fn create_person_exercise(id: u64, rank: u32) -> Exercise {
    Exercise::write(
        id,
        rank,
        "Create one Person node",
        "MATCH (p:Person) RETURN count(p) AS c",
        expected(&[count_row(1)]),
    )
    .with_solution("CREATE (:Person)")
}
