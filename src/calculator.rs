// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::grading;
use crate::store::CALCULATOR_GRADES;
use crate::store::CALCULATOR_TARGET;
use crate::store::Store;
use crate::types::grade_entry::GradeEntry;
use crate::types::token::Token;

/// The standalone calculator's working set: a list of weighted grades for a
/// single course plus the target to project against. Independent of the
/// academic history.
pub struct Calculator {
    pub grades: Vec<GradeEntry>,
    pub target: f64,
}

/// The calculator's derived numbers.
pub struct CalculatorSummary {
    pub evaluated_weight: f64,
    pub overall_average: f64,
    pub remaining_weight: f64,
    pub needed_grade: f64,
    /// Whether the full weight has been evaluated.
    pub complete: bool,
}

impl Calculator {
    /// Load the working set from the store. Defaults to an empty grade list
    /// and the configured target.
    pub fn load(store: &Store, default_target: f64) -> Self {
        let grades = store.load(CALCULATOR_GRADES, Vec::new());
        let target = store.load(CALCULATOR_TARGET, default_target);
        Self { grades, target }
    }

    /// Write the working set back to the store.
    pub fn save(&self, store: &Store) {
        store.save(CALCULATOR_GRADES, &self.grades);
        store.save(CALCULATOR_TARGET, &self.target);
    }

    /// Append a grade entry. Entries failing the construction gate are
    /// refused and the working set is unchanged.
    pub fn add_grade(&mut self, name: &str, percentage: f64, score: f64) {
        if let Some(entry) = GradeEntry::new(name, percentage, score) {
            self.grades.push(entry);
        }
    }

    /// Set the score of the entry with the given id.
    pub fn set_score(&mut self, id: &Token, score: f64) {
        if let Some(entry) = self.grades.iter_mut().find(|entry| entry.id == *id) {
            entry.score = grading::sanitize(score);
        }
    }

    /// Remove the entry with the given id.
    pub fn remove_grade(&mut self, id: &Token) {
        self.grades.retain(|entry| entry.id != *id);
    }

    /// Set the target grade.
    pub fn set_target(&mut self, target: f64) {
        self.target = grading::sanitize(target);
    }

    /// Look up an entry by id.
    pub fn grade(&self, id: &Token) -> Option<&GradeEntry> {
        self.grades.iter().find(|entry| entry.id == *id)
    }

    /// Compute the derived numbers for the current working set.
    pub fn summary(&self) -> CalculatorSummary {
        let (overall_average, evaluated_weight) = grading::weighted_mean(&self.grades);
        CalculatorSummary {
            evaluated_weight,
            overall_average,
            remaining_weight: (grading::FULL_WEIGHT - evaluated_weight).max(0.0),
            needed_grade: grading::needed_grade(overall_average, evaluated_weight, self.target),
            complete: evaluated_weight >= grading::FULL_WEIGHT,
        }
    }
}
