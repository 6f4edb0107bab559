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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::grading::PASSING_GRADE;

/// Optional settings read from `notas.toml` in the data directory.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// The default target grade for needed-grade projections.
    #[serde(default = "default_target_grade")]
    pub target_grade: f64,
}

fn default_target_grade() -> f64 {
    PASSING_GRADE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_grade: PASSING_GRADE,
        }
    }
}

impl Config {
    /// Read the config file, or the defaults when there is none. A file that
    /// exists but does not parse is a real error, not a fallback case.
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load(Path::new("./derpherp.toml")).unwrap();
        assert_eq!(config.target_grade, PASSING_GRADE);
    }

    #[test]
    fn test_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notas.toml");
        write(&path, "target_grade = 3.5\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.target_grade, 3.5);
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notas.toml");
        write(&path, "").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.target_grade, PASSING_GRADE);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notas.toml");
        write(&path, "target_grade = \"high\"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
