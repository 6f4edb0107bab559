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

use crate::grading::FULL_WEIGHT;
use crate::grading::sanitize;
use crate::types::token::Token;

/// One graded component of a course.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    pub id: Token,
    /// The component's display name, e.g. "Parcial 1".
    pub name: String,
    /// The weight this component contributes to the final grade, in (0, 100].
    /// Weights across a course need not sum to 100: mid-term, part of the
    /// course is still unevaluated.
    pub percentage: f64,
    /// The score obtained, on the 0-5 scale. Stored under the key `grade`.
    #[serde(rename = "grade")]
    pub score: f64,
}

impl GradeEntry {
    /// Create a grade entry, assigning a fresh identifier.
    ///
    /// Returns `None` when the name is blank or the weight falls outside
    /// (0, 100]: invalid components are refused, not recorded. A non-finite
    /// score is coerced to 0.
    pub fn new(name: &str, percentage: f64, score: f64) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            log::debug!("refusing grade entry with a blank name");
            return None;
        }
        if !(percentage > 0.0 && percentage <= FULL_WEIGHT) {
            log::debug!("refusing grade entry {name:?} with weight {percentage}");
            return None;
        }
        Some(Self {
            id: Token::fresh(),
            name: name.to_string(),
            percentage,
            score: sanitize(score),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let entry = GradeEntry::new("  Parcial 1  ", 25.0, 3.8).unwrap();
        assert_eq!(entry.name, "Parcial 1");
        assert_eq!(entry.percentage, 25.0);
        assert_eq!(entry.score, 3.8);
    }

    #[test]
    fn test_blank_name_refused() {
        assert!(GradeEntry::new("", 25.0, 3.8).is_none());
        assert!(GradeEntry::new("   ", 25.0, 3.8).is_none());
    }

    #[test]
    fn test_out_of_range_weight_refused() {
        assert!(GradeEntry::new("Parcial", 0.0, 3.8).is_none());
        assert!(GradeEntry::new("Parcial", -10.0, 3.8).is_none());
        assert!(GradeEntry::new("Parcial", 100.5, 3.8).is_none());
        assert!(GradeEntry::new("Parcial", f64::NAN, 3.8).is_none());
    }

    #[test]
    fn test_full_weight_accepted() {
        assert!(GradeEntry::new("Examen único", 100.0, 4.0).is_some());
    }

    #[test]
    fn test_non_finite_score_coerced() {
        let entry = GradeEntry::new("Quiz", 10.0, f64::NAN).unwrap();
        assert_eq!(entry.score, 0.0);
    }

    #[test]
    fn test_serialized_shape() {
        let entry = GradeEntry {
            id: Token::from("g1"),
            name: "Parcial 1".to_string(),
            percentage: 25.0,
            score: 3.8,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            "{\"id\":\"g1\",\"name\":\"Parcial 1\",\"percentage\":25.0,\"grade\":3.8}"
        );
    }
}
