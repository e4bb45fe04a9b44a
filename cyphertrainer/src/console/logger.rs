// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Console output sink

/// Where commands report to the trainee
///
/// Front ends decide how each category is rendered.
pub trait ConsoleLogger {
    /// Problem with the trainee's input itself
    fn error(&mut self, message: &str);
    /// Statement ran but did not solve the exercise
    fn failure(&mut self, message: &str);
    fn success(&mut self, message: &str);
    fn information(&mut self, message: &str);
}
