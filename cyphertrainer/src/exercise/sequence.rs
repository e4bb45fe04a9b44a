// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Rank-ordered exercise sequence

use super::model::Exercise;
use super::record::{ExerciseBundle, ExerciseRecord};
use crate::error::SequenceError;
use std::collections::HashSet;
use std::path::Path;

/// Exercises in rank order, fixed once built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseSequence {
    exercises: Vec<Exercise>,
}

impl ExerciseSequence {
    /// Build a sequence, rejecting repeated ids or ranks
    pub fn from_exercises(mut exercises: Vec<Exercise>) -> Result<Self, SequenceError> {
        let mut ids = HashSet::new();
        let mut ranks = HashSet::new();
        for exercise in &exercises {
            if !ids.insert(exercise.id()) {
                return Err(SequenceError::DuplicateId(exercise.id()));
            }
            if !ranks.insert(exercise.rank()) {
                return Err(SequenceError::DuplicateRank(exercise.rank()));
            }
        }

        exercises.sort_by_key(Exercise::rank);
        Ok(Self { exercises })
    }

    pub fn from_records(records: Vec<ExerciseRecord>) -> Result<Self, SequenceError> {
        let exercises = records
            .into_iter()
            .map(ExerciseRecord::into_exercise)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_exercises(exercises)
    }

    /// Load a bundle file
    pub fn load(path: &Path) -> Result<Self, SequenceError> {
        let bundle = ExerciseBundle::read_from(path)?;
        let sequence = Self::from_records(bundle.exercises)?;
        log::info!(
            "Loaded {} exercise(s) from {}",
            sequence.len(),
            path.display()
        );
        Ok(sequence)
    }

    /// Decode every expected result, failing on the first corrupt one
    pub fn verify(&self) -> Result<(), SequenceError> {
        for exercise in &self.exercises {
            exercise
                .expected_result()
                .decode()
                .map_err(|source| SequenceError::InvalidPayload {
                    id: exercise.id(),
                    source,
                })?;
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index)
    }

    /// Exercise following the one at `index`
    pub fn next_of(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index + 1)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Exercise> {
        self.exercises.iter()
    }
}

impl<'a> IntoIterator for &'a ExerciseSequence {
    type Item = &'a Exercise;
    type IntoIter = std::slice::Iter<'a, Exercise>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::model::ExerciseId;
    use crate::result::{ExpectedResult, Row};

    fn expected(count: i64) -> ExpectedResult {
        ExpectedResult::from_rows(&[Row::new().with("c", count)]).unwrap()
    }

    #[test]
    fn test_sorted_by_rank() {
        let sequence = ExerciseSequence::from_exercises(vec![
            Exercise::read(10, 3, "third", expected(3)),
            Exercise::read(11, 1, "first", expected(1)),
            Exercise::read(12, 2, "second", expected(2)),
        ])
        .unwrap();

        let ranks: Vec<u32> = sequence.iter().map(Exercise::rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(sequence.next_of(0).map(Exercise::instructions), Some("second"));
        assert!(sequence.next_of(2).is_none());
    }

    #[test]
    fn test_duplicates_rejected() {
        let result = ExerciseSequence::from_exercises(vec![
            Exercise::read(1, 1, "a", expected(0)),
            Exercise::read(1, 2, "b", expected(0)),
        ]);
        assert!(matches!(result, Err(SequenceError::DuplicateId(ExerciseId(1)))));

        let result = ExerciseSequence::from_exercises(vec![
            Exercise::read(1, 4, "a", expected(0)),
            Exercise::read(2, 4, "b", expected(0)),
        ]);
        assert!(matches!(result, Err(SequenceError::DuplicateRank(4))));
    }

    #[test]
    fn test_verify_reports_corrupt_exercise() {
        let sequence = ExerciseSequence::from_exercises(vec![
            Exercise::read(1, 1, "good", expected(0)),
            Exercise::read(2, 2, "bad", ExpectedResult::from_bytes(vec![1, 2, 3])),
        ])
        .unwrap();

        match sequence.verify() {
            Err(SequenceError::InvalidPayload { id, .. }) => assert_eq!(id, ExerciseId(2)),
            other => panic!("expected invalid payload, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sequence() {
        let sequence = ExerciseSequence::from_records(Vec::new()).unwrap();
        assert!(sequence.is_empty());
        assert!(sequence.get(0).is_none());
        assert!(sequence.verify().is_ok());
    }
}
