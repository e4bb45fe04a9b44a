// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Trainee sessions
//!
//! - `SessionValidator` checks one statement against one exercise
//! - `TraineeSession` tracks which exercise a trainee is on

pub mod trainee;
pub mod validator;

pub use trainee::{SessionId, SessionProgress, SessionState, TraineeSession};
pub use validator::{OutcomeKind, SessionValidator, ValidationOutcome, PASSED_REPORT};
