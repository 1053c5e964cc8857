use crate::model::{PriceObservation, PriceRow, StorageError};
use crate::storage::PriceSource;
use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::debug;

/// SQLite-backed price store.
///
/// Only the database path is kept; each unit of work opens its own
/// connection which is closed when it goes out of scope.
pub struct PriceStore {
    path: PathBuf,
}

impl PriceStore {
    /// Opens the store at `db_path`, creating the file and schema if needed.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        let path = db_path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path };
        let conn = store.connect()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS prices (
                identifier TEXT NOT NULL,
                day TEXT NOT NULL,
                open INTEGER NOT NULL,
                close INTEGER NOT NULL,
                PRIMARY KEY (identifier, day)
            );
            "
        )?;

        Ok(store)
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Inserts or updates rows keyed by `(ticker, day)`; the last write wins.
    pub fn upsert_prices(&self, rows: &[PriceRow]) -> Result<usize, StorageError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO prices (identifier, day, open, close)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (identifier, day)
                 DO UPDATE SET open = excluded.open, close = excluded.close",
            )?;
            for row in rows {
                written += stmt.execute(params![&row.ticker, &row.day, &row.open, &row.close])?;
            }
        }
        tx.commit()?;
        Ok(written)
    }

    /// Number of stored observations for a ticker.
    pub fn count_prices(&self, ticker: &str) -> Result<usize, StorageError> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM prices WHERE identifier = ?1",
            params![ticker],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

impl PriceSource for PriceStore {
    fn find_near(
        &self,
        ticker: &str,
        date: NaiveDate,
        tolerance_days: i64,
    ) -> Result<Option<PriceObservation>, StorageError> {
        let from = date - Duration::days(tolerance_days);
        let to = date + Duration::days(tolerance_days);

        let conn = self.connect()?;
        let observation = conn
            .query_row(
                "SELECT day, close FROM prices
                 WHERE identifier = ?1 AND day BETWEEN ?2 AND ?3
                 ORDER BY day DESC LIMIT 1",
                params![ticker, from, to],
                |row| {
                    Ok(PriceObservation {
                        day: row.get(0)?,
                        price: row.get(1)?,
                    })
                },
            )
            .optional()?;

        debug!("find_near {} {} -> {:?}", ticker, date, observation);
        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(ticker: &str, day: NaiveDate, open: i64, close: i64) -> PriceRow {
        PriceRow { ticker: ticker.to_string(), day, open, close }
    }

    #[test]
    fn test_upsert_is_idempotent_and_last_write_wins() {
        let temp_dir = tempdir().unwrap();
        let store = PriceStore::open(temp_dir.path().join("prices.db")).unwrap();

        store.upsert_prices(&[row("AAA", date(2024, 1, 2), 100, 110)]).unwrap();
        store.upsert_prices(&[row("AAA", date(2024, 1, 2), 120, 130)]).unwrap();

        assert_eq!(store.count_prices("AAA").unwrap(), 1);
        let found = store.find_near("AAA", date(2024, 1, 2), 0).unwrap();
        assert_eq!(found, Some(PriceObservation { day: date(2024, 1, 2), price: 130 }));
    }

    #[test]
    fn test_find_near_picks_latest_in_window() {
        let temp_dir = tempdir().unwrap();
        let store = PriceStore::open(temp_dir.path().join("prices.db")).unwrap();
        store
            .upsert_prices(&[
                row("AAA", date(2024, 3, 8), 1, 100),
                row("AAA", date(2024, 3, 9), 1, 101),
                row("AAA", date(2024, 3, 14), 1, 102),
                row("BBB", date(2024, 3, 10), 1, 500),
            ])
            .unwrap();

        let found = store.find_near("AAA", date(2024, 3, 10), 3).unwrap();
        assert_eq!(found, Some(PriceObservation { day: date(2024, 3, 9), price: 101 }));
    }

    #[test]
    fn test_find_near_tolerance_is_inclusive() {
        let temp_dir = tempdir().unwrap();
        let store = PriceStore::open(temp_dir.path().join("prices.db")).unwrap();
        store.upsert_prices(&[row("AAA", date(2024, 3, 7), 1, 100)]).unwrap();

        assert!(store.find_near("AAA", date(2024, 3, 10), 3).unwrap().is_some());
        assert!(store.find_near("AAA", date(2024, 3, 11), 3).unwrap().is_none());
        assert!(store.find_near("ZZZ", date(2024, 3, 10), 3).unwrap().is_none());
    }
}
