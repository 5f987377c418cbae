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

use std::path::Path;

use log::debug;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;

use duecards_core::ErrorReport;
use duecards_core::Fallible;
use duecards_core::ItemId;
use duecards_core::ProgressStore;
use duecards_core::ReviewState;
use duecards_core::Timestamp;

/// Name of the progress database file in a collection directory.
pub const DB_FILE_NAME: &str = "duecards.db";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS review_states (
    item_id TEXT PRIMARY KEY,
    last_reviewed_at TEXT,
    next_review_at TEXT,
    review_count INTEGER NOT NULL,
    correct_count INTEGER NOT NULL,
    easiness_factor REAL NOT NULL,
    repetition INTEGER NOT NULL,
    interval_days INTEGER NOT NULL,
    is_favorite INTEGER NOT NULL
)";

/// The SQLite progress database of a collection. Implements `ProgressStore`
/// over a single `review_states` table keyed by item id, with timestamps in
/// their string form.
pub struct Database {
    conn: Connection,
}

fn db_err(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}

type StateRow = (
    String,
    Option<String>,
    Option<String>,
    u32,
    u32,
    f64,
    u32,
    i64,
    bool,
);

fn read_row(row: &Row<'_>) -> rusqlite::Result<StateRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn state_from_row(row: StateRow) -> Fallible<ReviewState> {
    let (
        item_id,
        last_reviewed_at,
        next_review_at,
        review_count,
        correct_count,
        easiness_factor,
        repetition,
        interval_days,
        is_favorite,
    ) = row;
    Ok(ReviewState {
        item_id: ItemId::new(item_id)?,
        last_reviewed_at: last_reviewed_at.map(Timestamp::try_from).transpose()?,
        next_review_at: next_review_at.map(Timestamp::try_from).transpose()?,
        review_count,
        correct_count,
        easiness_factor,
        repetition,
        interval_days,
        is_favorite,
    })
}

impl Database {
    /// Opens the database at the given path, creating the file and the
    /// schema if necessary.
    pub fn open(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(db_err)?;
        conn.execute(SCHEMA, []).map_err(db_err)?;
        debug!("opened progress database at {}", path.display());
        Ok(Self { conn })
    }
}

impl ProgressStore for Database {
    fn load(&self, item_id: &ItemId) -> Fallible<Option<ReviewState>> {
        let row = self
            .conn
            .query_row(
                "SELECT item_id, last_reviewed_at, next_review_at, review_count, \
                 correct_count, easiness_factor, repetition, interval_days, is_favorite \
                 FROM review_states WHERE item_id = ?1",
                params![item_id.as_str()],
                read_row,
            )
            .optional()
            .map_err(db_err)?;
        match row {
            Some(row) => Ok(Some(state_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &ReviewState) -> Fallible<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO review_states (item_id, last_reviewed_at, \
                 next_review_at, review_count, correct_count, easiness_factor, \
                 repetition, interval_days, is_favorite) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    state.item_id.as_str(),
                    state.last_reviewed_at.map(|t| t.to_string()),
                    state.next_review_at.map(|t| t.to_string()),
                    state.review_count,
                    state.correct_count,
                    state.easiness_factor,
                    state.repetition,
                    state.interval_days,
                    state.is_favorite,
                ],
            )
            .map_err(db_err)?;
        debug!("saved review state for {}", state.item_id);
        Ok(())
    }

    fn delete(&self, item_id: &ItemId) -> Fallible<bool> {
        let deleted = self
            .conn
            .execute(
                "DELETE FROM review_states WHERE item_id = ?1",
                params![item_id.as_str()],
            )
            .map_err(db_err)?;
        Ok(deleted > 0)
    }

    fn clear(&self) -> Fallible<()> {
        self.conn
            .execute("DELETE FROM review_states", [])
            .map_err(db_err)?;
        Ok(())
    }

    fn load_all(&self) -> Fallible<Vec<ReviewState>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT item_id, last_reviewed_at, next_review_at, review_count, \
                 correct_count, easiness_factor, repetition, interval_days, is_favorite \
                 FROM review_states ORDER BY item_id",
            )
            .map_err(db_err)?;
        let rows = stmt.query_map([], read_row).map_err(db_err)?;
        let mut states = vec![];
        for row in rows {
            states.push(state_from_row(row.map_err(db_err)?)?);
        }
        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn item(id: &str) -> ItemId {
        ItemId::new(id).unwrap()
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn reviewed_state(id: &str) -> ReviewState {
        ReviewState {
            item_id: item(id),
            last_reviewed_at: Some(ts("2024-01-01T12:00:00.000")),
            next_review_at: Some(ts("2024-01-07T12:00:00.000")),
            review_count: 3,
            correct_count: 2,
            easiness_factor: 2.36,
            repetition: 1,
            interval_days: 6,
            is_favorite: true,
        }
    }

    #[test]
    fn test_roundtrip() -> Fallible<()> {
        let dir = tempdir()?;
        let db = Database::open(&dir.path().join(DB_FILE_NAME))?;
        let state = reviewed_state("a");
        db.save(&state)?;
        assert_eq!(db.load(&item("a"))?, Some(state));
        Ok(())
    }

    #[test]
    fn test_new_state_roundtrip() -> Fallible<()> {
        let dir = tempdir()?;
        let db = Database::open(&dir.path().join(DB_FILE_NAME))?;
        let state = ReviewState::new(item("a"));
        db.save(&state)?;
        assert_eq!(db.load(&item("a"))?, Some(state));
        Ok(())
    }

    #[test]
    fn test_load_missing() -> Fallible<()> {
        let dir = tempdir()?;
        let db = Database::open(&dir.path().join(DB_FILE_NAME))?;
        assert_eq!(db.load(&item("a"))?, None);
        Ok(())
    }

    #[test]
    fn test_save_replaces() -> Fallible<()> {
        let dir = tempdir()?;
        let db = Database::open(&dir.path().join(DB_FILE_NAME))?;
        let mut state = reviewed_state("a");
        db.save(&state)?;
        state.review_count = 4;
        state.correct_count = 3;
        db.save(&state)?;
        assert_eq!(db.load(&item("a"))?, Some(state));
        assert_eq!(db.load_all()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_delete() -> Fallible<()> {
        let dir = tempdir()?;
        let db = Database::open(&dir.path().join(DB_FILE_NAME))?;
        db.save(&reviewed_state("a"))?;
        assert!(db.delete(&item("a"))?);
        assert!(!db.delete(&item("a"))?);
        assert_eq!(db.load(&item("a"))?, None);
        Ok(())
    }

    #[test]
    fn test_clear() -> Fallible<()> {
        let dir = tempdir()?;
        let db = Database::open(&dir.path().join(DB_FILE_NAME))?;
        db.save(&reviewed_state("a"))?;
        db.save(&reviewed_state("b"))?;
        db.clear()?;
        assert!(db.load_all()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_all_ordered() -> Fallible<()> {
        let dir = tempdir()?;
        let db = Database::open(&dir.path().join(DB_FILE_NAME))?;
        for id in ["delta", "alpha", "charlie"] {
            db.save(&reviewed_state(id))?;
        }
        let ids: Vec<String> = db
            .load_all()?
            .iter()
            .map(|s| s.item_id.to_string())
            .collect();
        assert_eq!(ids, vec!["alpha", "charlie", "delta"]);
        Ok(())
    }

    #[test]
    fn test_persists_across_reopen() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DB_FILE_NAME);
        let state = reviewed_state("a");
        {
            let db = Database::open(&path)?;
            db.save(&state)?;
        }
        let db = Database::open(&path)?;
        assert_eq!(db.load(&item("a"))?, Some(state));
        Ok(())
    }
}
