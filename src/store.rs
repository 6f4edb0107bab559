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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Fallible;

/// Key for the calculator's working set of grades.
pub const CALCULATOR_GRADES: &str = "calculatorGrades";

/// Key for the calculator's target grade.
pub const CALCULATOR_TARGET: &str = "calculatorTargetGrade";

/// Key for the full academic history.
pub const ACADEMIC_HISTORY: &str = "academicHistory";

/// A string-keyed store of JSON values.
///
/// Reads and writes never fail from the caller's point of view: a missing or
/// unreadable value falls back to the caller's default, and a failed write
/// leaves the previous contents in place. Failures are logged with the key
/// they concern, so data loss is diagnosable without surfacing errors.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Load the value stored under `key`, falling back to `default` when the
    /// key is absent or the stored value cannot be read.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get_raw(key) {
            Ok(None) => default,
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(err) => {
                    log::error!("failed to decode value for key {key}: {err}");
                    default
                }
            },
            Err(err) => {
                log::error!("failed to read key {key}: {err}");
                default
            }
        }
    }

    /// Serialize `value` and store it under `key`, replacing any previous
    /// value. Failures leave the store untouched.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(err) => {
                log::error!("failed to encode value for key {key}: {err}");
                return;
            }
        };
        if let Err(err) = self.set_raw(key, &text) {
            log::error!("failed to write key {key}: {err}");
        }
    }

    fn get_raw(&self, key: &str) -> Fallible<Option<String>> {
        let sql = "select value from store where key = ?;";
        let mut stmt = self.conn.prepare(sql)?;
        let value = stmt.query_row([key], |row| row.get(0)).optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> Fallible<()> {
        let sql = "insert or replace into store (key, value) values (?, ?);";
        self.conn.execute(sql, (key, value))?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["store"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::error::Fallible;

    fn open_tmp_store() -> Fallible<(tempfile::TempDir, Store)> {
        let dir = tempdir()?;
        let path = dir.path().join("store.db");
        let store = Store::open(path.to_str().unwrap())?;
        Ok((dir, store))
    }

    #[test]
    fn test_round_trip() -> Fallible<()> {
        let (_dir, store) = open_tmp_store()?;
        store.save("answer", &42_u32);
        assert_eq!(store.load("answer", 0_u32), 42);
        Ok(())
    }

    #[test]
    fn test_missing_key_yields_default() -> Fallible<()> {
        let (_dir, store) = open_tmp_store()?;
        assert_eq!(store.load("missing", 3.0_f64), 3.0);
        Ok(())
    }

    #[test]
    fn test_overwrite() -> Fallible<()> {
        let (_dir, store) = open_tmp_store()?;
        store.save("target", &3.0_f64);
        store.save("target", &4.5_f64);
        assert_eq!(store.load("target", 0.0_f64), 4.5);
        Ok(())
    }

    #[test]
    fn test_corrupt_value_yields_default() -> Fallible<()> {
        let (_dir, store) = open_tmp_store()?;
        store.set_raw("broken", "{not json")?;
        assert_eq!(store.load("broken", 7_u32), 7);
        Ok(())
    }

    #[test]
    fn test_reopen_preserves_contents() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("store.db");
        {
            let store = Store::open(path.to_str().unwrap())?;
            store.save("answer", &"hello".to_string());
        }
        let store = Store::open(path.to_str().unwrap())?;
        assert_eq!(store.load("answer", String::new()), "hello");
        Ok(())
    }
}
