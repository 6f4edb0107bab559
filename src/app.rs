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

use std::env::current_dir;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::Store;

/// The database file name inside the data directory.
const DB_FILE: &str = "notas.db";

/// The optional config file name inside the data directory.
const CONFIG_FILE: &str = "notas.toml";

/// An open data directory: the store plus its configuration.
pub struct App {
    pub directory: PathBuf,
    pub config: Config,
    pub store: Store,
}

impl App {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };
        log::debug!("Using data directory {}.", directory.display());

        let config = Config::load(&directory.join(CONFIG_FILE))?;

        let db_path: PathBuf = directory.join(DB_FILE);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let store: Store = Store::open(db_path)?;

        Ok(Self {
            directory,
            config,
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;
    use crate::calculator::Calculator;
    use crate::grading::PASSING_GRADE;
    use crate::history::History;

    #[test]
    fn test_non_existent_directory() {
        let result = App::new(Some("./derpherp".to_string()));
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_open_empty_directory() -> Fallible<()> {
        let dir = tempdir()?;
        let app = App::new(Some(dir.path().display().to_string()))?;
        assert_eq!(app.directory, dir.path().canonicalize()?);
        assert_eq!(app.config.target_grade, PASSING_GRADE);
        Ok(())
    }

    #[test]
    fn test_config_file_is_picked_up() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("notas.toml"), "target_grade = 4.0\n")?;
        let app = App::new(Some(dir.path().display().to_string()))?;
        assert_eq!(app.config.target_grade, 4.0);
        Ok(())
    }

    // End-to-end: record a semester's worth of data, reopen the directory,
    // and check everything survived.
    #[test]
    fn test_walkthrough() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().display().to_string();

        {
            let app = App::new(Some(path.clone()))?;

            let mut calculator = Calculator::load(&app.store, app.config.target_grade);
            calculator.add_grade("Parcial 1", 50.0, 2.0);
            calculator.set_target(3.0);
            calculator.save(&app.store);

            let mut history = History::load(&app.store);
            history.add_semester("2024-1");
            let semester_id = history.semesters[0].id.clone();
            history.add_course(&semester_id, "Cálculo Diferencial", Some(4));
            let course_id = history.semesters[0].courses[0].id.clone();
            history.add_grade(&semester_id, &course_id, "Parcial 1", 60.0, 4.0);
            history.add_grade(&semester_id, &course_id, "Parcial 2", 40.0, 3.0);
            history.save(&app.store);
        }

        let app = App::new(Some(path))?;

        let calculator = Calculator::load(&app.store, 5.0);
        assert_eq!(calculator.grades.len(), 1);
        assert_eq!(calculator.target, 3.0);
        let summary = calculator.summary();
        assert!((summary.needed_grade - 4.0).abs() < 1e-9);

        let history = History::load(&app.store);
        assert_eq!(history.semesters.len(), 1);
        let course = &history.semesters[0].courses[0];
        assert!((course.final_grade - 3.6).abs() < 1e-9);
        assert!((history.papa() - 3.6).abs() < 1e-9);
        assert!((history.papi() - 3.6).abs() < 1e-9);
        Ok(())
    }
}
