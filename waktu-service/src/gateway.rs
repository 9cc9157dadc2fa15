use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::FromRow;
use waktu_core::config::CoreConfig;
use waktu_core::db::DatabasePool;
use waktu_core::errors::{Result, WaktuError};
use waktu_protocol::record::TimedRecord;

/// Store contract for timed records.
///
/// Callers only hand over records that already passed validation and
/// normalization. Each call is atomic on its own; nothing spans calls.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Writes a new row. A second insert of the same id fails with
    /// [`WaktuError::DuplicateRecord`].
    async fn insert(&self, record: &TimedRecord) -> Result<()>;

    /// Returns the row stored under `id`, or `None` when there is none.
    async fn get_by_id(&self, id: i32) -> Result<Option<TimedRecord>>;
}

/// Postgres-backed gateway over the `waktu` table.
#[derive(Clone)]
pub struct PgRecordGateway {
    pool: DatabasePool,
}

impl PgRecordGateway {
    /// Connects to the database using the supplied configuration.
    pub async fn from_config(config: &CoreConfig) -> Result<Self> {
        let pool = DatabasePool::connect(config).await?;
        Ok(Self::from_pool(pool))
    }

    /// Builds the gateway from an existing database pool.
    pub fn from_pool(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordGateway for PgRecordGateway {
    async fn insert(&self, record: &TimedRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO waktu (id, note, ukuran, kapan)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id)
        .bind(&record.note)
        .bind(record.size)
        .bind(record.when)
        .execute(self.pool.inner())
        .await
        .map_err(|err| insert_error(err, record.id))?;

        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<TimedRecord>> {
        let row = sqlx::query_as::<_, WaktuRow>(
            r#"
            SELECT id, note, ukuran, kapan
            FROM waktu
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Into::into))
    }
}

fn insert_error(err: sqlx::Error, id: i32) -> WaktuError {
    let duplicate = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if duplicate {
        WaktuError::DuplicateRecord(id)
    } else {
        err.into()
    }
}

#[derive(FromRow)]
struct WaktuRow {
    id: i32,
    note: String,
    ukuran: i32,
    kapan: Option<NaiveDateTime>,
}

impl From<WaktuRow> for TimedRecord {
    fn from(row: WaktuRow) -> Self {
        TimedRecord {
            id: row.id,
            note: row.note,
            size: row.ukuran,
            when: row.kapan,
        }
    }
}
