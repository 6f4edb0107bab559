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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

use crate::app::App;
use crate::calculator::Calculator;
use crate::error::Fallible;
use crate::history::History;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    semester_count: usize,
    course_count: usize,
    grade_count: usize,
    total_credits: u32,
    program_average: f64,
    period_average: f64,
    calculator_entry_count: usize,
    calculator_target: f64,
}

pub fn print_stats(app: &App, format: StatsFormat) -> Fallible<()> {
    let calculator = Calculator::load(&app.store, app.config.target_grade);
    let history = History::load(&app.store);

    let stats = Stats {
        semester_count: history.semesters.len(),
        course_count: history
            .semesters
            .iter()
            .map(|semester| semester.courses.len())
            .sum(),
        grade_count: history
            .semesters
            .iter()
            .flat_map(|semester| semester.courses.iter())
            .map(|course| course.grades.len())
            .sum(),
        total_credits: history
            .semesters
            .iter()
            .map(|semester| semester.total_credits())
            .sum(),
        program_average: history.papa(),
        period_average: history.papi(),
        calculator_entry_count: calculator.grades.len(),
        calculator_target: calculator.target,
    };

    match format {
        StatsFormat::Text => {
            println!("Data directory: {}", app.directory.display());
            println!("Semesters: {}", stats.semester_count);
            println!("Courses: {}", stats.course_count);
            println!("Grades: {}", stats.grade_count);
            println!("Total credits: {}", stats.total_credits);
            println!("PAPA: {:.2}", stats.program_average);
            println!("PAPI: {:.2}", stats.period_average);
            println!("Calculator entries: {}", stats.calculator_entry_count);
            println!("Calculator target: {:.2}", stats.calculator_target);
        }
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{}", stats_json);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_print_stats_on_empty_store() -> Fallible<()> {
        let dir = tempdir()?;
        let app = App::new(Some(dir.path().display().to_string()))?;
        print_stats(&app, StatsFormat::Text)?;
        print_stats(&app, StatsFormat::Json)?;
        Ok(())
    }
}
