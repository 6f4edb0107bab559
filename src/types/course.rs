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

use serde::Deserialize;
use serde::Serialize;

use crate::grading;
use crate::types::grade_entry::GradeEntry;
use crate::types::token::Token;

/// The number of credits a new course starts with.
pub const DEFAULT_CREDITS: u32 = 3;

/// A course in the academic history.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Token,
    pub name: String,
    /// The number of credits the course is worth.
    pub credits: u32,
    /// The course's graded components, in insertion order.
    pub grades: Vec<GradeEntry>,
    /// Cached weighted mean of `grades`. Every mutation of the grade list
    /// recomputes it within the same operation, so it is never read stale.
    pub final_grade: f64,
    /// Free-form notes about the course.
    #[serde(default)]
    pub notes: String,
}

impl Course {
    /// Create an empty course with the default number of credits.
    pub fn new(name: &str) -> Self {
        Self {
            id: Token::fresh(),
            name: name.trim().to_string(),
            credits: DEFAULT_CREDITS,
            grades: Vec::new(),
            final_grade: 0.0,
            notes: String::new(),
        }
    }

    /// The `(weighted average, evaluated weight)` pair over the grade list.
    pub fn weighted_summary(&self) -> (f64, f64) {
        grading::weighted_mean(&self.grades)
    }

    /// Append a graded component. Components failing the construction gate
    /// are refused and the course is left unchanged.
    pub fn add_grade(&mut self, name: &str, percentage: f64, score: f64) {
        if let Some(entry) = GradeEntry::new(name, percentage, score) {
            self.grades.push(entry);
            self.recompute_final_grade();
        }
    }

    /// Set the score of the component with the given id.
    pub fn set_grade_score(&mut self, id: &Token, score: f64) {
        if let Some(entry) = self.grades.iter_mut().find(|entry| entry.id == *id) {
            entry.score = grading::sanitize(score);
        }
        self.recompute_final_grade();
    }

    /// Replace the component with the same id, preserving its position.
    pub fn replace_grade(&mut self, entry: GradeEntry) {
        if let Some(slot) = self.grades.iter_mut().find(|slot| slot.id == entry.id) {
            *slot = entry;
        }
        self.recompute_final_grade();
    }

    /// Remove the component with the given id.
    pub fn remove_grade(&mut self, id: &Token) {
        self.grades.retain(|entry| entry.id != *id);
        self.recompute_final_grade();
    }

    /// Recompute the cached final grade from the grade list.
    pub fn recompute_final_grade(&mut self) {
        let (average, _) = grading::weighted_mean(&self.grades);
        self.final_grade = average;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_new_course_defaults() {
        let course = Course::new("Cálculo Diferencial");
        assert_eq!(course.name, "Cálculo Diferencial");
        assert_eq!(course.credits, DEFAULT_CREDITS);
        assert!(course.grades.is_empty());
        assert_eq!(course.final_grade, 0.0);
        assert_eq!(course.notes, "");
    }

    #[test]
    fn test_add_grade_recomputes() {
        let mut course = Course::new("Cálculo Diferencial");
        course.add_grade("Parcial 1", 60.0, 4.0);
        assert!((course.final_grade - 4.0).abs() < EPSILON);
        course.add_grade("Parcial 2", 40.0, 3.0);
        assert!((course.final_grade - 3.6).abs() < EPSILON);
    }

    #[test]
    fn test_refused_grade_leaves_course_unchanged() {
        let mut course = Course::new("Cálculo Diferencial");
        course.add_grade("Parcial 1", 50.0, 4.0);
        let before = course.final_grade;
        course.add_grade("Parcial 2", 0.0, 1.0);
        assert_eq!(course.grades.len(), 1);
        assert_eq!(course.final_grade, before);
    }

    #[test]
    fn test_set_grade_score_recomputes() {
        let mut course = Course::new("Cálculo Diferencial");
        course.add_grade("Parcial 1", 50.0, 2.0);
        let id = course.grades[0].id.clone();
        course.set_grade_score(&id, 4.0);
        assert!((course.final_grade - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_set_grade_score_coerces_non_finite() {
        let mut course = Course::new("Cálculo Diferencial");
        course.add_grade("Parcial 1", 50.0, 2.0);
        let id = course.grades[0].id.clone();
        course.set_grade_score(&id, f64::NAN);
        assert_eq!(course.grades[0].score, 0.0);
        assert_eq!(course.final_grade, 0.0);
    }

    #[test]
    fn test_replace_grade_preserves_position() {
        let mut course = Course::new("Cálculo Diferencial");
        course.add_grade("Parcial 1", 30.0, 3.0);
        course.add_grade("Parcial 2", 30.0, 3.5);
        course.add_grade("Final", 40.0, 2.8);
        let mut replacement = course.grades[1].clone();
        replacement.name = "Segundo parcial".to_string();
        replacement.score = 4.5;
        course.replace_grade(replacement);
        assert_eq!(course.grades[1].name, "Segundo parcial");
        let expected = (3.0 * 30.0 + 4.5 * 30.0 + 2.8 * 40.0) / 100.0;
        assert!((course.final_grade - expected).abs() < EPSILON);
    }

    #[test]
    fn test_replace_grade_unknown_id_is_a_no_op() {
        let mut course = Course::new("Cálculo Diferencial");
        course.add_grade("Parcial 1", 30.0, 3.0);
        let stray = GradeEntry::new("Stray", 50.0, 5.0).unwrap();
        course.replace_grade(stray);
        assert_eq!(course.grades.len(), 1);
        assert!((course.final_grade - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_remove_grade_recomputes() {
        let mut course = Course::new("Cálculo Diferencial");
        course.add_grade("Parcial 1", 60.0, 4.0);
        course.add_grade("Parcial 2", 40.0, 3.0);
        let id = course.grades[1].id.clone();
        course.remove_grade(&id);
        assert_eq!(course.grades.len(), 1);
        assert!((course.final_grade - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_remove_last_grade_resets_final_grade() {
        let mut course = Course::new("Cálculo Diferencial");
        course.add_grade("Parcial 1", 60.0, 4.0);
        let id = course.grades[0].id.clone();
        course.remove_grade(&id);
        assert_eq!(course.final_grade, 0.0);
    }
}
