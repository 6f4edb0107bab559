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
use crate::calculator::Calculator;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::token::Token;

pub fn add(app: &App, name: &str, percentage: f64, score: f64) -> Fallible<()> {
    let mut calculator = Calculator::load(&app.store, app.config.target_grade);
    calculator.add_grade(name, percentage, score);
    calculator.save(&app.store);
    print_working_set(&calculator);
    Ok(())
}

pub fn score(app: &App, id: &str, score: f64) -> Fallible<()> {
    let mut calculator = Calculator::load(&app.store, app.config.target_grade);
    let id = Token::from(id);
    if calculator.grade(&id).is_none() {
        return fail("no such grade entry.");
    }
    calculator.set_score(&id, score);
    calculator.save(&app.store);
    print_working_set(&calculator);
    Ok(())
}

pub fn remove(app: &App, id: &str) -> Fallible<()> {
    let mut calculator = Calculator::load(&app.store, app.config.target_grade);
    let id = Token::from(id);
    if calculator.grade(&id).is_none() {
        return fail("no such grade entry.");
    }
    calculator.remove_grade(&id);
    calculator.save(&app.store);
    print_working_set(&calculator);
    Ok(())
}

pub fn target(app: &App, target: f64) -> Fallible<()> {
    let mut calculator = Calculator::load(&app.store, app.config.target_grade);
    calculator.set_target(target);
    calculator.save(&app.store);
    print_working_set(&calculator);
    Ok(())
}

pub fn show(app: &App) -> Fallible<()> {
    let calculator = Calculator::load(&app.store, app.config.target_grade);
    print_working_set(&calculator);
    Ok(())
}

fn print_working_set(calculator: &Calculator) {
    if calculator.grades.is_empty() {
        println!("No grades recorded.");
    }
    for entry in calculator.grades.iter() {
        println!(
            "{}  {} ({}%): {:.2}",
            entry.id, entry.name, entry.percentage, entry.score
        );
    }
    let summary = calculator.summary();
    println!("Evaluated weight: {:.2}%", summary.evaluated_weight);
    println!("Weighted average: {:.2}", summary.overall_average);
    if summary.complete {
        println!(
            "Evaluation complete. Final grade: {:.2}",
            summary.overall_average
        );
    } else {
        println!(
            "Needed on the remaining {:.2}%: {:.2} (target {:.2})",
            summary.remaining_weight, summary.needed_grade, calculator.target
        );
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_add_and_show() -> Fallible<()> {
        let dir = tempdir()?;
        let app = App::new(Some(dir.path().display().to_string()))?;
        add(&app, "Parcial 1", 50.0, 2.0)?;
        show(&app)?;
        Ok(())
    }

    #[test]
    fn test_score_unknown_id() -> Fallible<()> {
        let dir = tempdir()?;
        let app = App::new(Some(dir.path().display().to_string()))?;
        assert!(score(&app, "nope", 4.0).is_err());
        Ok(())
    }
}
