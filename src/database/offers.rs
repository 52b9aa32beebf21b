use super::models::{NewOffer, Offer, DEFAULT_OFFERS};
use crate::errors::{KioskError, KioskResult};
use crate::logger::{self, LogTag};
use crate::rates::{RateSource, RateTableEntry};
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Handle to the offers database
///
/// Cheap to clone; all clones share one connection.
#[derive(Clone)]
pub struct OffersDb {
    conn: Arc<Mutex<Connection>>,
}

impl OffersDb {
    /// Open (or create) the database file and ensure the schema exists
    pub fn open(path: &Path, busy_timeout: Duration) -> KioskResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;

        logger::debug(
            LogTag::Database,
            &format!("Opened offers database at {}", path.display()),
        );
        Self::from_connection(conn)
    }

    /// Private in-memory database (tests, `--quote` without a data dir)
    pub fn open_in_memory() -> KioskResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> KioskResult<Self> {
        Self::create_tables(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn create_tables(conn: &Connection) -> KioskResult<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS offers (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                topup_rb  INTEGER NOT NULL,
                tizo      INTEGER NOT NULL,
                label     TEXT,
                active    INTEGER NOT NULL DEFAULT 1
            );
            CREATE INDEX IF NOT EXISTS idx_offers_topup ON offers(topup_rb);",
        )?;
        Ok(())
    }

    /// Insert the default tier list if the table has no rows
    ///
    /// Returns the number of offers inserted (0 when already populated).
    pub fn seed_defaults(&self) -> KioskResult<usize> {
        let mut conn = self.conn.lock();
        let existing: i64 = conn.query_row("SELECT COUNT(*) FROM offers", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        let tx = conn.transaction()?;
        for &(topup_rb, tizo, label) in DEFAULT_OFFERS {
            tx.execute(
                "INSERT INTO offers (topup_rb, tizo, label) VALUES (?1, ?2, ?3)",
                params![to_sql_int(topup_rb)?, to_sql_int(tizo)?, label],
            )?;
        }
        tx.commit()?;

        logger::info(
            LogTag::Database,
            &format!("🌱 Seeded {} default offers", DEFAULT_OFFERS.len()),
        );
        Ok(DEFAULT_OFFERS.len())
    }

    pub fn insert_offer(&self, offer: &NewOffer) -> KioskResult<i64> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO offers (topup_rb, tizo, label) VALUES (?1, ?2, ?3)",
            params![
                to_sql_int(offer.topup_rb)?,
                to_sql_int(offer.tizo)?,
                offer.label
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn count_offers(&self) -> KioskResult<usize> {
        let conn = self.conn.lock();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM offers WHERE active = 1", [], |row| {
                row.get(0)
            })?;
        Ok(count.max(0) as usize)
    }

    /// All active offers as rate tiers, ascending by `topup_rb`
    ///
    /// A negative amount in any row is reported as `SourceUnavailable`.
    pub fn fetch_rate_rows(&self) -> KioskResult<Vec<RateTableEntry>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT topup_rb, tizo FROM offers WHERE active = 1 ORDER BY topup_rb")?;

        let raw_rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        raw_rows
            .into_iter()
            .map(|(topup_rb, tizo)| {
                if topup_rb < 0 || tizo < 0 {
                    return Err(KioskError::source_unavailable(format!(
                        "malformed offer row ({} Rb, {} Tizo)",
                        topup_rb, tizo
                    )));
                }
                Ok(RateTableEntry::new(topup_rb as u64, tizo as u64))
            })
            .collect()
    }

    /// Offer with exactly this top-up amount
    pub fn find_by_topup(&self, topup_rb: u64) -> KioskResult<Option<Offer>> {
        let conn = self.conn.lock();
        let offer = conn
            .query_row(
                "SELECT id, topup_rb, tizo, label FROM offers
                 WHERE active = 1 AND topup_rb = ?1
                 ORDER BY id LIMIT 1",
                params![to_sql_int(topup_rb)?],
                row_to_offer,
            )
            .optional()?;
        Ok(offer)
    }

    /// Next `limit` offers strictly above `topup_rb`, ascending
    pub fn next_tiers_above(&self, topup_rb: u64, limit: usize) -> KioskResult<Vec<Offer>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, topup_rb, tizo, label FROM offers
             WHERE active = 1 AND topup_rb > ?1
             ORDER BY topup_rb, id
             LIMIT ?2",
        )?;

        let offers = stmt
            .query_map(
                params![to_sql_int(topup_rb)?, limit as i64],
                row_to_offer,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(offers)
    }

    pub fn list_offers(&self) -> KioskResult<Vec<Offer>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, topup_rb, tizo, label FROM offers
             WHERE active = 1
             ORDER BY topup_rb, id",
        )?;

        let offers = stmt
            .query_map([], row_to_offer)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(offers)
    }
}

#[cfg(test)]
impl OffersDb {
    /// Keep the connection locked for `duration`, calling `on_locked` once held
    pub(crate) fn hold_connection(&self, duration: Duration, on_locked: impl FnOnce()) {
        let _conn = self.conn.lock();
        on_locked();
        std::thread::sleep(duration);
    }
}

#[async_trait]
impl RateSource for OffersDb {
    fn name(&self) -> &'static str {
        "offers_db"
    }

    async fn fetch_tiers(&self) -> KioskResult<Vec<RateTableEntry>> {
        let db = self.clone();
        tokio::task::spawn_blocking(move || db.fetch_rate_rows())
            .await
            .map_err(|e| KioskError::source_unavailable(format!("fetch task failed: {}", e)))?
    }
}

fn row_to_offer(row: &Row) -> rusqlite::Result<Offer> {
    let topup_rb: i64 = row.get(1)?;
    let tizo: i64 = row.get(2)?;
    Ok(Offer {
        id: row.get(0)?,
        topup_rb: u64::try_from(topup_rb)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(1, topup_rb))?,
        tizo: u64::try_from(tizo).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(2, tizo))?,
        label: row.get(3)?,
    })
}

fn to_sql_int(value: u64) -> KioskResult<i64> {
    i64::try_from(value)
        .map_err(|_| KioskError::invalid_amount(format!("{} does not fit the offers table", value)))
}
