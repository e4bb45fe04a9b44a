// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Neo4j-compatible HTTP transactional endpoint driver
//!
//! Protocol summary:
//! - `POST {endpoint}/db/{database}/tx` opens a transaction; the response's
//!   `commit` link names it (`.../tx/{n}/commit`)
//! - `POST .../tx/{n}` runs statements and returns `results` and `errors`
//! - `DELETE .../tx/{n}` rolls it back
//!
//! The server discards a transaction as soon as one of its statements fails,
//! so an engine-reported error also closes the local handle.

use super::{GraphDatabase, Parameters, Transaction, TransactionOptions};
use crate::config::TrainerConfig;
use crate::result::{GraphEntity, Row, Value};
use crate::txn::error::{ExecutionFailure, ExecutionResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;
use std::time::Duration;

/// Graph database reached over the HTTP transactional API
#[derive(Debug, Clone)]
pub struct HttpGraphDatabase {
    endpoint: String,
    database: String,
    authorization: Option<String>,
}

impl HttpGraphDatabase {
    pub fn new(endpoint: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            database: database.into(),
            authorization: None,
        }
    }

    /// Use HTTP basic authentication
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        let token = STANDARD.encode(format!("{}:{}", username, password));
        self.authorization = Some(format!("Basic {}", token));
        self
    }

    /// Build from the trainer configuration
    pub fn from_config(config: &TrainerConfig) -> Self {
        let database = Self::new(&config.endpoint, &config.database);
        match &config.password {
            Some(password) => database.with_credentials(&config.username, password),
            None => database,
        }
    }

    fn begin_url(&self) -> String {
        format!("{}/db/{}/tx", self.endpoint, self.database)
    }

    fn agent(timeout: Option<Duration>) -> ureq::Agent {
        ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build()
            .into()
    }

    fn post(
        &self,
        agent: &ureq::Agent,
        url: &str,
        body: &serde_json::Value,
        timeout: Option<Duration>,
    ) -> ExecutionResult<serde_json::Value> {
        let payload = body.to_string();
        let mut request = agent
            .post(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(authorization) = &self.authorization {
            request = request.header("Authorization", authorization.as_str());
        }

        let mut response = request
            .send(payload.as_bytes())
            .map_err(|e| transport_failure(e, timeout))?;
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| transport_failure(e, timeout))?;

        serde_json::from_str(&text)
            .map_err(|e| ExecutionFailure::protocol(format!("invalid JSON response: {}", e)))
    }
}

impl GraphDatabase for HttpGraphDatabase {
    fn begin(&self, options: &TransactionOptions) -> ExecutionResult<Box<dyn Transaction + '_>> {
        let agent = Self::agent(options.timeout);
        let body = self.post(&agent, &self.begin_url(), &json!({ "statements": [] }), options.timeout)?;
        check_errors(&body)?;
        let url = transaction_url(&body)?;
        log::debug!("Opened HTTP transaction {}", url);

        Ok(Box::new(HttpTransaction {
            database: self,
            agent,
            url,
            timeout: options.timeout,
            open: true,
        }))
    }

    fn describe(&self) -> String {
        format!("{} (database '{}')", self.endpoint, self.database)
    }
}

/// Open transaction on the HTTP endpoint
pub struct HttpTransaction<'a> {
    database: &'a HttpGraphDatabase,
    agent: ureq::Agent,
    url: String,
    timeout: Option<Duration>,
    open: bool,
}

impl HttpTransaction<'_> {
    /// Rows of a statement response
    ///
    /// Only an engine-reported error closes the handle. A malformed response
    /// says nothing about the server-side transaction, which rollback must
    /// still discard.
    fn accept(&mut self, response: &serde_json::Value) -> ExecutionResult<Vec<Row>> {
        if let Err(failure) = check_errors(response) {
            self.open = false;
            return Err(failure);
        }
        parse_statement_response(response)
    }
}

impl Transaction for HttpTransaction<'_> {
    fn execute(&mut self, statement: &str, parameters: &Parameters) -> ExecutionResult<Vec<Row>> {
        if !self.open {
            return Err(ExecutionFailure::protocol(
                "transaction already closed by the server",
            ));
        }

        let parameters: serde_json::Map<String, serde_json::Value> = parameters
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        let body = json!({
            "statements": [{
                "statement": statement,
                "parameters": parameters,
                "resultDataContents": ["row"],
            }]
        });

        // A transport failure leaves the server-side transaction open, so
        // rollback still has to discard it
        let response = self
            .database
            .post(&self.agent, &self.url, &body, self.timeout)?;

        self.accept(&response)
    }

    fn rollback(&mut self) -> ExecutionResult<()> {
        if !self.open {
            log::debug!("{} already discarded by the server", self.url);
            return Ok(());
        }
        self.open = false;

        let mut request = self.agent.delete(&self.url).header("Accept", "application/json");
        if let Some(authorization) = &self.database.authorization {
            request = request.header("Authorization", authorization.as_str());
        }

        match request.call() {
            Ok(_) => Ok(()),
            // Expired or already rolled back on the server
            Err(ureq::Error::StatusCode(404)) => Ok(()),
            Err(e) => Err(transport_failure(e, self.timeout)),
        }
    }
}

fn transport_failure(error: ureq::Error, timeout: Option<Duration>) -> ExecutionFailure {
    match error {
        ureq::Error::Timeout(_) => ExecutionFailure::timeout(timeout),
        ureq::Error::StatusCode(code @ (401 | 403)) => {
            ExecutionFailure::connection(format!("authentication failed (HTTP {})", code))
        }
        ureq::Error::StatusCode(code) => {
            ExecutionFailure::protocol(format!("unexpected HTTP status {}", code))
        }
        other => ExecutionFailure::connection(other.to_string()),
    }
}

/// Turn the first entry of a response's `errors` array into a failure
fn check_errors(body: &serde_json::Value) -> ExecutionResult<()> {
    let first = body
        .get("errors")
        .and_then(|errors| errors.as_array())
        .and_then(|errors| errors.first());

    match first {
        None => Ok(()),
        Some(error) => {
            let code = error
                .get("code")
                .and_then(|c| c.as_str())
                .unwrap_or("Neo.DatabaseError.General.UnknownError");
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown database error");
            Err(ExecutionFailure::statement(code, message))
        }
    }
}

/// Transaction URL from the `commit` link of a begin response
fn transaction_url(body: &serde_json::Value) -> ExecutionResult<String> {
    body.get("commit")
        .and_then(|c| c.as_str())
        .and_then(|commit| commit.strip_suffix("/commit"))
        .map(str::to_string)
        .ok_or_else(|| ExecutionFailure::protocol("begin response carries no commit link"))
}

/// Rows of the single statement in a statement response
pub(crate) fn parse_statement_response(body: &serde_json::Value) -> ExecutionResult<Vec<Row>> {
    check_errors(body)?;

    let result = body
        .get("results")
        .and_then(|r| r.as_array())
        .and_then(|r| r.first())
        .ok_or_else(|| ExecutionFailure::protocol("response carries no result"))?;

    let columns: Vec<String> = result
        .get("columns")
        .and_then(|c| c.as_array())
        .map(|c| {
            c.iter()
                .filter_map(|name| name.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let data = match result.get("data").and_then(|d| d.as_array()) {
        Some(data) => data,
        None => return Ok(Vec::new()),
    };

    data.iter()
        .map(|record| -> ExecutionResult<Row> {
            let row = record
                .get("row")
                .and_then(|r| r.as_array())
                .ok_or_else(|| ExecutionFailure::protocol("record carries no row"))?;
            if row.len() != columns.len() {
                return Err(ExecutionFailure::protocol(format!(
                    "record has {} values for {} columns",
                    row.len(),
                    columns.len()
                )));
            }
            let meta = record.get("meta").and_then(|m| m.as_array());

            let values = row
                .iter()
                .enumerate()
                .map(|(i, value)| to_value(value, meta.and_then(|m| m.get(i))))
                .collect();
            Ok(Row::from_positional(values, &columns))
        })
        .collect()
}

/// Convert a row value, using its `meta` entry to recognise graph entities
fn to_value(value: &serde_json::Value, meta: Option<&serde_json::Value>) -> Value {
    let entity = meta.and_then(|meta| {
        let kind = meta.get("type")?.as_str()?;
        let id = meta.get("id")?.as_i64()?;
        Some((kind, id))
    });

    match (entity, value) {
        (Some((kind, id)), serde_json::Value::Object(properties)) => {
            let properties = properties
                .iter()
                .map(|(key, value)| (key.clone(), Value::from(value.clone())))
                .collect();
            let entity = GraphEntity::new(id, properties);
            match kind {
                "relationship" => Value::Relationship(entity),
                _ => Value::Node(entity),
            }
        }
        _ => Value::from(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_rows() {
        let body = json!({
            "results": [{
                "columns": ["c", "name"],
                "data": [
                    {"row": [0, "Ann"], "meta": [null, null]},
                    {"row": [2, null], "meta": [null, null]}
                ]
            }],
            "errors": []
        });

        let rows = parse_statement_response(&body).expect("rows");
        assert_eq!(
            rows,
            vec![
                Row::new().with("c", 0i64).with("name", "Ann"),
                Row::new().with("c", 2i64).with("name", Value::Null),
            ]
        );
    }

    #[test]
    fn test_parse_node_from_meta() {
        let body = json!({
            "results": [{
                "columns": ["p"],
                "data": [{"row": [{"name": "Ann"}], "meta": [{"id": 4, "type": "node", "deleted": false}]}]
            }],
            "errors": []
        });

        let rows = parse_statement_response(&body).expect("rows");
        match rows[0].get_value("p") {
            Some(Value::Node(node)) => {
                assert_eq!(node.id, 4);
                assert_eq!(node.properties.get("name"), Some(&Value::from("Ann")));
            }
            other => panic!("expected node, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_engine_error() {
        let body = json!({
            "results": [],
            "errors": [{
                "code": "Neo.ClientError.Statement.SyntaxError",
                "message": "Invalid input 'RETRUN' (line 1, column 11 (offset: 10))"
            }]
        });

        let failure = parse_statement_response(&body).expect_err("engine error");
        assert!(failure.is_syntax_error());
        assert_eq!(
            failure.report_message(),
            "Invalid input 'RETRUN' (line 1, column 11 (offset: 10))"
        );
    }

    #[test]
    fn test_parse_statement_without_data() {
        let body = json!({"results": [{"columns": [], "data": []}], "errors": []});
        assert!(parse_statement_response(&body).expect("rows").is_empty());
    }

    #[test]
    fn test_transaction_url_from_commit_link() {
        let body = json!({"commit": "http://localhost:7474/db/neo4j/tx/12/commit", "errors": []});
        assert_eq!(
            transaction_url(&body).expect("url"),
            "http://localhost:7474/db/neo4j/tx/12"
        );
        assert!(transaction_url(&json!({})).is_err());
    }

    fn open_transaction(database: &HttpGraphDatabase) -> HttpTransaction<'_> {
        HttpTransaction {
            database,
            agent: HttpGraphDatabase::agent(None),
            url: "http://localhost:7474/db/neo4j/tx/3".to_string(),
            timeout: None,
            open: true,
        }
    }

    #[test]
    fn test_engine_error_closes_transaction() {
        let database = HttpGraphDatabase::new("http://localhost:7474", "neo4j");
        let mut transaction = open_transaction(&database);
        let body = json!({
            "results": [],
            "errors": [{"code": "Neo.ClientError.Statement.SyntaxError", "message": "bad"}]
        });

        assert!(transaction.accept(&body).is_err());
        assert!(!transaction.open);
        // Nothing left to discard, so no request is sent
        assert!(transaction.rollback().is_ok());
    }

    #[test]
    fn test_malformed_response_keeps_transaction_open() {
        let database = HttpGraphDatabase::new("http://localhost:7474", "neo4j");
        let mut transaction = open_transaction(&database);

        let no_result = json!({"results": [], "errors": []});
        let failure = transaction.accept(&no_result).expect_err("no result");
        assert_eq!(failure.report_message(), "response carries no result");
        assert!(transaction.open);

        let short_row = json!({
            "results": [{"columns": ["a", "b"], "data": [{"row": [1]}]}],
            "errors": []
        });
        assert!(transaction.accept(&short_row).is_err());
        assert!(transaction.open);
    }

    #[test]
    fn test_basic_auth_header() {
        let database = HttpGraphDatabase::new("http://localhost:7474/", "neo4j")
            .with_credentials("neo4j", "secret");
        assert_eq!(database.begin_url(), "http://localhost:7474/db/neo4j/tx");
        assert_eq!(
            database.authorization.as_deref(),
            Some("Basic bmVvNGo6c2VjcmV0")
        );
    }
}
