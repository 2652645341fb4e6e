use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    CartSnapshot, Result, SessionId,
    store::CartStore,
};

/// PostgreSQL-backed cart store implementation.
///
/// One row per session, replaced on every save.
#[derive(Clone)]
pub struct PostgresCartStore {
    pool: PgPool,
}

impl PostgresCartStore {
    /// Creates a new PostgreSQL cart store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the snapshot table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cart_snapshots (
                session_id UUID PRIMARY KEY,
                saved_at TIMESTAMPTZ NOT NULL,
                state JSONB NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_snapshot(row: PgRow) -> Result<CartSnapshot> {
        Ok(CartSnapshot {
            session_id: SessionId::from_uuid(row.try_get::<Uuid, _>("session_id")?),
            saved_at: row.try_get::<DateTime<Utc>, _>("saved_at")?,
            state: row.try_get("state")?,
        })
    }
}

#[async_trait]
impl CartStore for PostgresCartStore {
    async fn load(&self, session_id: SessionId) -> Result<Option<CartSnapshot>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT session_id, saved_at, state
            FROM cart_snapshots
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_snapshot).transpose()
    }

    async fn save(&self, snapshot: CartSnapshot) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cart_snapshots (session_id, saved_at, state)
            VALUES ($1, $2, $3)
            ON CONFLICT (session_id) DO UPDATE SET
                saved_at = EXCLUDED.saved_at,
                state = EXCLUDED.state
            "#,
        )
        .bind(snapshot.session_id.as_uuid())
        .bind(snapshot.saved_at)
        .bind(&snapshot.state)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: SessionId) -> Result<()> {
        sqlx::query("DELETE FROM cart_snapshots WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
