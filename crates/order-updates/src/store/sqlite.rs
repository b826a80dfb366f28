//! SQLite-backed [`EventStore`].
//!
//! Schema:
//!
//! ```text
//! orders        (id TEXT PK, user_id, plan_id, status, created_at, updated_at)
//! order_events  (seq INTEGER PK AUTOINCREMENT, id TEXT UNIQUE, order_id,
//!                status, note, created_by, occurred_at)
//! ```
//!
//! `seq` is the per-append monotonic ordering the history contract requires;
//! `occurred_at` is informational only. Timestamps are stored as RFC 3339
//! text.

use super::{EventStore, OrderRecord, StoreError};
use crate::model::{OrderId, OrderStatus, StatusEvent};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use tokio::sync::Mutex;
use uuid::Uuid;

/// A single-connection SQLite store. Statements are short and the connection
/// is guarded by an async mutex, so callers never block each other for long.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if needed) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a fresh in-memory store; useful in tests and demos.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS orders (
                 id         TEXT PRIMARY KEY,
                 user_id    TEXT NOT NULL,
                 plan_id    TEXT NOT NULL,
                 status     TEXT NOT NULL,
                 created_at TEXT NOT NULL,
                 updated_at TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS order_events (
                 seq         INTEGER PRIMARY KEY AUTOINCREMENT,
                 id          TEXT NOT NULL UNIQUE,
                 order_id    TEXT NOT NULL,
                 status      TEXT NOT NULL,
                 note        TEXT,
                 created_by  TEXT,
                 occurred_at TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_order_events_order
                 ON order_events(order_id, seq);",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl EventStore for SqliteStore {
    async fn create_order(
        &self,
        order: &OrderRecord,
        seed: &StatusEvent,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let exists: Option<i64> = tx
            .query_row(
                "SELECT 1 FROM orders WHERE id = ?1",
                rusqlite::params![order.id.0],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(StoreError::OrderAlreadyExists(order.id.clone()));
        }

        tx.execute(
            "INSERT INTO orders (id, user_id, plan_id, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                order.id.0,
                order.user_id,
                order.plan_id,
                order.status.as_str(),
                order.created_at.to_rfc3339(),
                order.updated_at.to_rfc3339(),
            ],
        )?;
        insert_event(&tx, seed)?;
        tx.commit()?;
        Ok(())
    }

    async fn load_order(&self, id: &OrderId) -> Result<OrderRecord, StoreError> {
        let conn = self.conn.lock().await;
        let row = conn
            .query_row(
                "SELECT id, user_id, plan_id, status, created_at, updated_at
                 FROM orders WHERE id = ?1",
                rusqlite::params![id.0],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((id_str, user_id, plan_id, status, created_at, updated_at)) = row else {
            return Err(StoreError::OrderNotFound(id.clone()));
        };
        Ok(OrderRecord {
            id: OrderId(id_str),
            user_id,
            plan_id,
            status: parse_status(&status)?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    async fn events(&self, id: &OrderId) -> Result<Vec<StatusEvent>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, order_id, status, note, created_by, occurred_at
             FROM order_events WHERE order_id = ?1 ORDER BY seq",
        )?;
        let rows = stmt.query_map(rusqlite::params![id.0], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (event_id, order_id, status, note, created_by, occurred_at) = row?;
            events.push(StatusEvent {
                id: event_id
                    .parse::<Uuid>()
                    .map_err(|e| StoreError::Corrupt(format!("invalid event id: {e}")))?,
                order_id: OrderId(order_id),
                status: parse_status(&status)?,
                note,
                occurred_at: parse_timestamp(&occurred_at)?,
                created_by,
            });
        }
        Ok(events)
    }

    async fn append_event(&self, event: &StatusEvent) -> Result<(), StoreError> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let rows = tx.execute(
            "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![
                event.status.as_str(),
                Utc::now().to_rfc3339(),
                event.order_id.0,
            ],
        )?;
        if rows == 0 {
            return Err(StoreError::OrderNotFound(event.order_id.clone()));
        }
        insert_event(&tx, event)?;
        tx.commit()?;
        Ok(())
    }
}

fn insert_event(conn: &Connection, event: &StatusEvent) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO order_events (id, order_id, status, note, created_by, occurred_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            event.id.to_string(),
            event.order_id.0,
            event.status.as_str(),
            event.note,
            event.created_by,
            event.occurred_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn parse_status(s: &str) -> Result<OrderStatus, StoreError> {
    s.parse::<OrderStatus>()
        .map_err(|e| StoreError::Corrupt(e.to_string()))
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("invalid timestamp: {e}")))
}
