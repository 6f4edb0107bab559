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

use crate::types::course::Course;
use crate::types::grade_entry::GradeEntry;
use crate::types::semester::Semester;

/// The highest grade on the 0-5 scale.
pub const MAX_GRADE: f64 = 5.0;

/// The minimum passing grade, used as the default target.
pub const PASSING_GRADE: f64 = 3.0;

/// The evaluated weight of a fully graded course, in percentage points.
pub const FULL_WEIGHT: f64 = 100.0;

/// Coerce non-finite numeric input to zero.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// The grade needed on the remaining weight to end with `target` overall.
///
/// Returns 0 when nothing is left to evaluate (the evaluated weight is 100 or
/// more) and when the evaluated weight is negative. The result is clamped to
/// the grade scale: a raw value past either end means the target is already
/// guaranteed or already out of reach.
pub fn needed_grade(current_average: f64, evaluated_weight: f64, target: f64) -> f64 {
    if evaluated_weight >= FULL_WEIGHT {
        return 0.0;
    }
    if evaluated_weight < 0.0 {
        return 0.0;
    }
    let remaining = FULL_WEIGHT - evaluated_weight;
    let needed = (target * FULL_WEIGHT - current_average * evaluated_weight) / remaining;
    needed.clamp(0.0, MAX_GRADE)
}

/// The weighted mean over a list of grade entries.
///
/// Returns the `(overall average, evaluated weight)` pair. The average is 0
/// when no weight has been evaluated yet.
pub fn weighted_mean(entries: &[GradeEntry]) -> (f64, f64) {
    let weighted_sum: f64 = entries
        .iter()
        .map(|entry| entry.score * entry.percentage)
        .sum();
    let evaluated_weight: f64 = entries.iter().map(|entry| entry.percentage).sum();
    if evaluated_weight > 0.0 {
        (weighted_sum / evaluated_weight, evaluated_weight)
    } else {
        (0.0, evaluated_weight)
    }
}

/// The credit-weighted mean of final grades across the whole history (the
/// "PAPA").
///
/// Returns 0 when no credits are recorded.
pub fn program_average(semesters: &[Semester]) -> f64 {
    credit_weighted_mean(semesters.iter().flat_map(|semester| semester.courses.iter()))
}

/// The credit-weighted mean of final grades within the current semester (the
/// "PAPI").
///
/// Returns 0 when there are no semesters, or when the current semester has no
/// credits.
pub fn period_average(semesters: &[Semester]) -> f64 {
    match current_semester(semesters) {
        Some(semester) => credit_weighted_mean(semester.courses.iter()),
        None => 0.0,
    }
}

/// Select the semester the period average is computed over: the one with the
/// newest `created_at`. Semesters recorded without a timestamp sort oldest,
/// and when no semester carries one the head of the list wins, since new
/// semesters are prepended.
pub fn current_semester(semesters: &[Semester]) -> Option<&Semester> {
    let mut current: Option<&Semester> = semesters.first();
    let mut newest: Option<DateTime<Utc>> = current.and_then(|semester| semester.created_at);
    for semester in semesters.iter().skip(1) {
        if let Some(created_at) = semester.created_at {
            if newest.is_none_or(|n| created_at > n) {
                current = Some(semester);
                newest = Some(created_at);
            }
        }
    }
    current
}

fn credit_weighted_mean<'a>(courses: impl Iterator<Item = &'a Course>) -> f64 {
    let mut total_credits: u32 = 0;
    let mut weighted_sum: f64 = 0.0;
    for course in courses {
        total_credits += course.credits;
        weighted_sum += course.final_grade * f64::from(course.credits);
    }
    if total_credits > 0 {
        weighted_sum / f64::from(total_credits)
    } else {
        0.0
    }
}
