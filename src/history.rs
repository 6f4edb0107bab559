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
use crate::store::ACADEMIC_HISTORY;
use crate::store::Store;
use crate::types::course::Course;
use crate::types::grade_entry::GradeEntry;
use crate::types::semester::Semester;
use crate::types::token::Token;

/// The recorded academic history: semesters, newest first.
///
/// Mutations that target a missing id are no-ops; lookups are O(n) scans,
/// which is plenty for a handful of semesters.
pub struct History {
    pub semesters: Vec<Semester>,
}

impl History {
    /// Load the history from the store. Defaults to no semesters.
    pub fn load(store: &Store) -> Self {
        Self {
            semesters: store.load(ACADEMIC_HISTORY, Vec::new()),
        }
    }

    /// Write the history back to the store.
    pub fn save(&self, store: &Store) {
        store.save(ACADEMIC_HISTORY, &self.semesters);
    }

    /// Record a new semester at the head of the list.
    pub fn add_semester(&mut self, name: &str) {
        self.semesters.insert(0, Semester::new(name));
    }

    pub fn rename_semester(&mut self, id: &Token, name: &str) {
        if let Some(semester) = self.semester(id) {
            let mut replacement = semester.clone();
            replacement.name = name.trim().to_string();
            self.replace_semester(replacement);
        }
    }

    /// Replace a whole semester, matching by id and preserving its position.
    pub fn replace_semester(&mut self, semester: Semester) {
        if let Some(slot) = self
            .semesters
            .iter_mut()
            .find(|slot| slot.id == semester.id)
        {
            *slot = semester;
        }
    }

    /// Delete a semester and everything in it.
    pub fn remove_semester(&mut self, id: &Token) {
        self.semesters.retain(|semester| semester.id != *id);
    }

    /// Add a course to a semester. Defaults to three credits.
    pub fn add_course(&mut self, semester_id: &Token, name: &str, credits: Option<u32>) {
        if let Some(semester) = self.semester_mut(semester_id) {
            let mut course = Course::new(name);
            if let Some(credits) = credits {
                course.credits = credits;
            }
            semester.courses.push(course);
        }
    }

    /// Replace a whole course, matching by id and preserving its position.
    /// The replacement's final grade is recomputed from its own grade list,
    /// so a stale cache cannot be smuggled in.
    pub fn replace_course(&mut self, semester_id: &Token, mut course: Course) {
        course.recompute_final_grade();
        if let Some(semester) = self.semester_mut(semester_id) {
            if let Some(slot) = semester.courses.iter_mut().find(|slot| slot.id == course.id) {
                *slot = course;
            }
        }
    }

    pub fn remove_course(&mut self, semester_id: &Token, course_id: &Token) {
        if let Some(semester) = self.semester_mut(semester_id) {
            semester.courses.retain(|course| course.id != *course_id);
        }
    }

    /// Add a graded component to a course. Refused components (blank name,
    /// weight outside (0, 100]) leave the course unchanged.
    pub fn add_grade(
        &mut self,
        semester_id: &Token,
        course_id: &Token,
        name: &str,
        percentage: f64,
        score: f64,
    ) {
        if let Some(course) = self.course_mut(semester_id, course_id) {
            course.add_grade(name, percentage, score);
        }
    }

    /// Set the score of a graded component.
    pub fn set_grade_score(
        &mut self,
        semester_id: &Token,
        course_id: &Token,
        grade_id: &Token,
        score: f64,
    ) {
        if let Some(course) = self.course_mut(semester_id, course_id) {
            course.set_grade_score(grade_id, score);
        }
    }

    /// Replace a graded component by id, preserving its position.
    pub fn replace_grade(&mut self, semester_id: &Token, course_id: &Token, entry: GradeEntry) {
        if let Some(course) = self.course_mut(semester_id, course_id) {
            course.replace_grade(entry);
        }
    }

    /// Remove a graded component.
    pub fn remove_grade(&mut self, semester_id: &Token, course_id: &Token, grade_id: &Token) {
        if let Some(course) = self.course_mut(semester_id, course_id) {
            course.remove_grade(grade_id);
        }
    }

    pub fn semester(&self, id: &Token) -> Option<&Semester> {
        self.semesters.iter().find(|semester| semester.id == *id)
    }

    pub fn course(&self, semester_id: &Token, course_id: &Token) -> Option<&Course> {
        self.semester(semester_id)?
            .courses
            .iter()
            .find(|course| course.id == *course_id)
    }

    pub fn grade(
        &self,
        semester_id: &Token,
        course_id: &Token,
        grade_id: &Token,
    ) -> Option<&GradeEntry> {
        self.course(semester_id, course_id)?
            .grades
            .iter()
            .find(|entry| entry.id == *grade_id)
    }

    /// The program average across all semesters.
    pub fn papa(&self) -> f64 {
        grading::program_average(&self.semesters)
    }

    /// The period average over the current semester.
    pub fn papi(&self) -> f64 {
        grading::period_average(&self.semesters)
    }

    fn semester_mut(&mut self, id: &Token) -> Option<&mut Semester> {
        self.semesters.iter_mut().find(|semester| semester.id == *id)
    }

    fn course_mut(&mut self, semester_id: &Token, course_id: &Token) -> Option<&mut Course> {
        self.semester_mut(semester_id)?
            .courses
            .iter_mut()
            .find(|course| course.id == *course_id)
    }
}
