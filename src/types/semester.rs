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

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::types::course::Course;
use crate::types::token::Token;

/// A semester and the courses taken during it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: Token,
    pub name: String,
    /// When the semester was recorded. This is the explicit recency marker
    /// the period average selects by. Payloads written by older versions have
    /// no timestamp; recency then falls back to storage order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// The semester's courses, in insertion order.
    pub courses: Vec<Course>,
}

impl Semester {
    /// Create an empty semester stamped with the current time.
    pub fn new(name: &str) -> Self {
        Self {
            id: Token::fresh(),
            name: name.trim().to_string(),
            created_at: Some(Utc::now()),
            courses: Vec::new(),
        }
    }

    /// Total credits across the semester's courses.
    pub fn total_credits(&self) -> u32 {
        self.courses.iter().map(|course| course.credits).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_semester() {
        let semester = Semester::new("  2024-1 ");
        assert_eq!(semester.name, "2024-1");
        assert!(semester.created_at.is_some());
        assert!(semester.courses.is_empty());
    }

    #[test]
    fn test_total_credits() {
        let mut semester = Semester::new("2024-1");
        semester.courses.push(Course::new("Cálculo Diferencial"));
        semester.courses.push(Course::new("Álgebra Lineal"));
        semester.courses[0].credits = 4;
        assert_eq!(semester.total_credits(), 7);
    }

    #[test]
    fn test_legacy_payload_without_timestamp() {
        let json = "{\"id\":\"sem1\",\"name\":\"Semestre 2023-1\",\"courses\":[]}";
        let semester: Semester = serde_json::from_str(json).unwrap();
        assert_eq!(semester.name, "Semestre 2023-1");
        assert!(semester.created_at.is_none());
        // Untimestamped semesters serialize without the field, too.
        let back = serde_json::to_string(&semester).unwrap();
        assert_eq!(back, json);
    }
}
