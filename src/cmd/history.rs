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

use crate::app::App;
use crate::error::Fallible;
use crate::error::fail;
use crate::grading;
use crate::history::History;
use crate::types::course::Course;
use crate::types::grade_entry::GradeEntry;
use crate::types::semester::Semester;
use crate::types::token::Token;

pub fn add_semester(app: &App, name: &str) -> Fallible<()> {
    let mut history = History::load(&app.store);
    history.add_semester(name);
    history.save(&app.store);
    println!(
        "Added semester {} ({}).",
        history.semesters[0].name, history.semesters[0].id
    );
    Ok(())
}

pub fn rename_semester(app: &App, semester: &str, name: &str) -> Fallible<()> {
    let mut history = History::load(&app.store);
    let semester_id = Token::from(semester);
    if history.semester(&semester_id).is_none() {
        return fail("no such semester.");
    }
    history.rename_semester(&semester_id, name);
    history.save(&app.store);
    Ok(())
}

pub fn remove_semester(app: &App, semester: &str) -> Fallible<()> {
    let mut history = History::load(&app.store);
    let semester_id = Token::from(semester);
    if history.semester(&semester_id).is_none() {
        return fail("no such semester.");
    }
    history.remove_semester(&semester_id);
    history.save(&app.store);
    Ok(())
}

pub fn add_course(app: &App, semester: &str, name: &str, credits: Option<u32>) -> Fallible<()> {
    let mut history = History::load(&app.store);
    let semester_id = Token::from(semester);
    let Some(owner) = history.semester(&semester_id) else {
        return fail("no such semester.");
    };
    let position = owner.courses.len();
    history.add_course(&semester_id, name, credits);
    history.save(&app.store);
    if let Some(semester) = history.semester(&semester_id) {
        let course = &semester.courses[position];
        println!("Added course {} ({}).", course.name, course.id);
    }
    Ok(())
}

/// Edit a course by building a complete replacement and substituting it by
/// id, the same whole-entity update protocol the stored payload uses.
pub fn edit_course(
    app: &App,
    semester: &str,
    course: &str,
    name: Option<String>,
    credits: Option<u32>,
    notes: Option<String>,
) -> Fallible<()> {
    let mut history = History::load(&app.store);
    let semester_id = Token::from(semester);
    let course_id = Token::from(course);
    let Some(original) = history.course(&semester_id, &course_id) else {
        return fail("no such course.");
    };
    let mut replacement = original.clone();
    if let Some(name) = name {
        replacement.name = name.trim().to_string();
    }
    if let Some(credits) = credits {
        replacement.credits = credits;
    }
    if let Some(notes) = notes {
        replacement.notes = notes;
    }
    history.replace_course(&semester_id, replacement);
    history.save(&app.store);
    if let Some(course) = history.course(&semester_id, &course_id) {
        print_course(course, app.config.target_grade);
    }
    Ok(())
}

pub fn remove_course(app: &App, semester: &str, course: &str) -> Fallible<()> {
    let mut history = History::load(&app.store);
    let semester_id = Token::from(semester);
    let course_id = Token::from(course);
    if history.course(&semester_id, &course_id).is_none() {
        return fail("no such course.");
    }
    history.remove_course(&semester_id, &course_id);
    history.save(&app.store);
    Ok(())
}

pub fn add_grade(
    app: &App,
    semester: &str,
    course: &str,
    name: &str,
    percentage: f64,
    score: f64,
) -> Fallible<()> {
    let mut history = History::load(&app.store);
    let semester_id = Token::from(semester);
    let course_id = Token::from(course);
    if history.course(&semester_id, &course_id).is_none() {
        return fail("no such course.");
    }
    history.add_grade(&semester_id, &course_id, name, percentage, score);
    history.save(&app.store);
    if let Some(course) = history.course(&semester_id, &course_id) {
        print_course(course, app.config.target_grade);
    }
    Ok(())
}

/// Edit a graded component by building a complete replacement and
/// substituting it by id. Edited values are coerced, not gated: only the add
/// path refuses out-of-range components.
pub fn edit_grade(
    app: &App,
    semester: &str,
    course: &str,
    grade: &str,
    name: Option<String>,
    percentage: Option<f64>,
    score: Option<f64>,
) -> Fallible<()> {
    let mut history = History::load(&app.store);
    let semester_id = Token::from(semester);
    let course_id = Token::from(course);
    let grade_id = Token::from(grade);
    let Some(original) = history.grade(&semester_id, &course_id, &grade_id) else {
        return fail("no such grade entry.");
    };
    let mut replacement = original.clone();
    if let Some(name) = name {
        replacement.name = name.trim().to_string();
    }
    if let Some(percentage) = percentage {
        replacement.percentage = grading::sanitize(percentage);
    }
    if let Some(score) = score {
        replacement.score = grading::sanitize(score);
    }
    history.replace_grade(&semester_id, &course_id, replacement);
    history.save(&app.store);
    if let Some(course) = history.course(&semester_id, &course_id) {
        print_course(course, app.config.target_grade);
    }
    Ok(())
}

pub fn score_grade(
    app: &App,
    semester: &str,
    course: &str,
    grade: &str,
    score: f64,
) -> Fallible<()> {
    let mut history = History::load(&app.store);
    let semester_id = Token::from(semester);
    let course_id = Token::from(course);
    let grade_id = Token::from(grade);
    if history.grade(&semester_id, &course_id, &grade_id).is_none() {
        return fail("no such grade entry.");
    }
    history.set_grade_score(&semester_id, &course_id, &grade_id, score);
    history.save(&app.store);
    if let Some(course) = history.course(&semester_id, &course_id) {
        print_course(course, app.config.target_grade);
    }
    Ok(())
}

pub fn remove_grade(app: &App, semester: &str, course: &str, grade: &str) -> Fallible<()> {
    let mut history = History::load(&app.store);
    let semester_id = Token::from(semester);
    let course_id = Token::from(course);
    let grade_id = Token::from(grade);
    if history.grade(&semester_id, &course_id, &grade_id).is_none() {
        return fail("no such grade entry.");
    }
    history.remove_grade(&semester_id, &course_id, &grade_id);
    history.save(&app.store);
    if let Some(course) = history.course(&semester_id, &course_id) {
        print_course(course, app.config.target_grade);
    }
    Ok(())
}

pub fn show(app: &App) -> Fallible<()> {
    let history = History::load(&app.store);
    println!("PAPA: {:.2}", history.papa());
    println!("PAPI: {:.2}", history.papi());
    if history.semesters.is_empty() {
        println!("No semesters recorded.");
        return Ok(());
    }
    for semester in history.semesters.iter() {
        println!();
        print_semester(semester, app.config.target_grade);
    }
    Ok(())
}

fn print_semester(semester: &Semester, target: f64) {
    println!(
        "{} ({}) - {} credits",
        semester.name,
        semester.id,
        semester.total_credits()
    );
    for course in semester.courses.iter() {
        print_course(course, target);
    }
}

fn print_course(course: &Course, target: f64) {
    println!(
        "  {} ({}) - {} credits - final grade {:.2}",
        course.name, course.id, course.credits, course.final_grade
    );
    for entry in course.grades.iter() {
        print_grade(entry);
    }
    let (average, weight) = course.weighted_summary();
    if weight < grading::FULL_WEIGHT {
        let needed = grading::needed_grade(average, weight, target);
        println!(
            "    Evaluated {:.2}%; needed on the remaining {:.2}%: {:.2}",
            weight,
            grading::FULL_WEIGHT - weight,
            needed
        );
    } else {
        println!("    Course complete.");
    }
    if !course.notes.is_empty() {
        println!("    Notes: {}", course.notes);
    }
}

fn print_grade(entry: &GradeEntry) {
    println!(
        "    {}  {} ({}%): {:.2}",
        entry.id, entry.name, entry.percentage, entry.score
    );
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_walkthrough() -> Fallible<()> {
        let dir = tempdir()?;
        let app = App::new(Some(dir.path().display().to_string()))?;
        add_semester(&app, "2024-1")?;
        let semester_id = History::load(&app.store).semesters[0].id.to_string();
        add_course(&app, &semester_id, "Cálculo Diferencial", Some(4))?;
        let course_id = History::load(&app.store).semesters[0].courses[0]
            .id
            .to_string();
        add_grade(&app, &semester_id, &course_id, "Parcial 1", 60.0, 4.0)?;
        show(&app)?;

        let history = History::load(&app.store);
        assert!((history.papa() - 4.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_missing_ids_are_errors() -> Fallible<()> {
        let dir = tempdir()?;
        let app = App::new(Some(dir.path().display().to_string()))?;
        assert!(rename_semester(&app, "nope", "x").is_err());
        assert!(add_course(&app, "nope", "x", None).is_err());
        assert!(score_grade(&app, "nope", "nope", "nope", 4.0).is_err());
        Ok(())
    }

    #[test]
    fn test_edit_grade_coerces_instead_of_gating() -> Fallible<()> {
        let dir = tempdir()?;
        let app = App::new(Some(dir.path().display().to_string()))?;
        add_semester(&app, "2024-1")?;
        let semester_id = History::load(&app.store).semesters[0].id.to_string();
        add_course(&app, &semester_id, "Cálculo Diferencial", None)?;
        let course_id = History::load(&app.store).semesters[0].courses[0]
            .id
            .to_string();
        add_grade(&app, &semester_id, &course_id, "Parcial 1", 60.0, 4.0)?;
        let grade_id = History::load(&app.store).semesters[0].courses[0].grades[0]
            .id
            .to_string();
        edit_grade(
            &app,
            &semester_id,
            &course_id,
            &grade_id,
            None,
            Some(f64::NAN),
            None,
        )?;
        let history = History::load(&app.store);
        let entry = &history.semesters[0].courses[0].grades[0];
        assert_eq!(entry.percentage, 0.0);
        Ok(())
    }
}
