// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Exercises: model, rank-ordered sequences, persisted records and export

pub mod export;
pub mod model;
pub mod record;
pub mod sequence;

pub use export::{to_cypher_script, ExerciseDraft, ExerciseExporter};
pub use model::{Exercise, ExerciseId, ExerciseKind};
pub use record::{load_from_graph, ExerciseBundle, ExerciseRecord, BUNDLE_FORMAT_VERSION};
pub use sequence::ExerciseSequence;
