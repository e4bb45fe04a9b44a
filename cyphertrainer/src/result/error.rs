// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Result codec error types

use thiserror::Error;

/// Errors raised while encoding or decoding expected results
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value cannot be stored in an expected-result snapshot
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// The stored bytes are not a valid expected-result snapshot
    #[error("Corrupt payload: {0}")]
    CorruptPayload(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
