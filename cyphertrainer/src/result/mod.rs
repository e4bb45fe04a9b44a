// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Query results: values, rows, the expected-result codec and comparison

pub mod codec;
pub mod diff;
pub mod error;
pub mod row;
pub mod value;

pub use codec::{decode, encode, ExpectedResult};
pub use diff::{compare, ResultComparison, ResultDiff};
pub use error::{CodecError, CodecResult};
pub use row::{format_rows, Row};
pub use value::{GraphEntity, Value};
