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

use serde::Serialize;

use crate::app::App;
use crate::calculator::Calculator;
use crate::error::Fallible;
use crate::history::History;
use crate::types::grade_entry::GradeEntry;
use crate::types::semester::Semester;

/// Dump everything in the store as pretty-printed JSON on stdout.
pub fn export_store(app: &App) -> Fallible<()> {
    let calculator = Calculator::load(&app.store, app.config.target_grade);
    let history = History::load(&app.store);
    let export = Export {
        calculator_grades: calculator.grades,
        calculator_target_grade: calculator.target,
        academic_history: history.semesters,
    };
    let json: String = serde_json::to_string_pretty(&export)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export {
    calculator_grades: Vec<GradeEntry>,
    calculator_target_grade: f64,
    academic_history: Vec<Semester>,
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_export_empty_store() -> Fallible<()> {
        let dir = tempdir()?;
        let app = App::new(Some(dir.path().display().to_string()))?;
        export_store(&app)?;
        Ok(())
    }
}
