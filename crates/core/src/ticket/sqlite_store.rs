//! SQLite-backed ticket store implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection};

use super::{NewTicket, Ticket, TicketError, TicketFilter, TicketStatus, TicketStore};

const SELECT_COLUMNS: &str = "SELECT id, original_text, source_lang, target_lang, status, translated_text, created_at, translated_at FROM tickets";

/// SQLite-backed ticket store.
///
/// Every operation runs under a single connection mutex, so each call is
/// atomic with respect to other calls on the same store.
pub struct SqliteTicketStore {
    conn: Mutex<Connection>,
}

impl SqliteTicketStore {
    /// Create a new SQLite ticket store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, TicketError> {
        let conn = Connection::open(path).map_err(|e| TicketError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite ticket store (useful for testing).
    pub fn in_memory() -> Result<Self, TicketError> {
        let conn =
            Connection::open_in_memory().map_err(|e| TicketError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), TicketError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tickets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                original_text TEXT NOT NULL,
                source_lang TEXT NOT NULL,
                target_lang TEXT NOT NULL,
                status TEXT NOT NULL,
                translated_text TEXT,
                created_at TEXT NOT NULL,
                translated_at TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status);
            "#,
        )
        .map_err(|e| TicketError::Database(e.to_string()))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, TicketError> {
        self.conn
            .lock()
            .map_err(|_| TicketError::Database("connection mutex poisoned".to_string()))
    }

    fn build_where_clause(filter: &TicketFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        let where_clause = match filter.status {
            Some(status) => {
                params.push(Box::new(status.as_str()));
                "WHERE status = ?".to_string()
            }
            None => String::new(),
        };

        (where_clause, params)
    }

    fn row_to_ticket(row: &rusqlite::Row) -> rusqlite::Result<Ticket> {
        let status_str: String = row.get(4)?;
        let status = status_str
            .parse::<TicketStatus>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        let created_at_str: String = row.get(6)?;
        let translated_at_str: Option<String> = row.get(7)?;

        Ok(Ticket {
            id: row.get(0)?,
            original_text: row.get(1)?,
            source_lang: row.get(2)?,
            target_lang: row.get(3)?,
            status,
            translated_text: row.get(5)?,
            created_at: parse_timestamp(6, &created_at_str)?,
            translated_at: translated_at_str
                .as_deref()
                .map(|s| parse_timestamp(7, s))
                .transpose()?,
        })
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Ticket>, TicketError> {
        let result = conn.query_row(
            &format!("{} WHERE id = ?", SELECT_COLUMNS),
            params![id],
            Self::row_to_ticket,
        );

        match result {
            Ok(ticket) => Ok(Some(ticket)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(TicketError::Database(e.to_string())),
        }
    }
}

fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

impl TicketStore for SqliteTicketStore {
    fn create(&self, request: NewTicket) -> Result<Ticket, TicketError> {
        let conn = self.conn()?;

        let now = Utc::now();
        let status = TicketStatus::Created;

        conn.execute(
            "INSERT INTO tickets (original_text, source_lang, target_lang, status, translated_text, created_at, translated_at) VALUES (?, ?, ?, ?, NULL, ?, NULL)",
            params![
                request.original_text,
                request.source_lang,
                request.target_lang,
                status.as_str(),
                now.to_rfc3339(),
            ],
        )
        .map_err(|e| TicketError::Database(e.to_string()))?;

        Ok(Ticket {
            id: conn.last_insert_rowid(),
            original_text: request.original_text,
            source_lang: request.source_lang,
            target_lang: request.target_lang,
            status,
            translated_text: None,
            created_at: now,
            translated_at: None,
        })
    }

    fn get(&self, id: i64) -> Result<Option<Ticket>, TicketError> {
        let conn = self.conn()?;
        Self::fetch(&conn, id)
    }

    fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError> {
        let conn = self.conn()?;

        let (where_clause, params) = Self::build_where_clause(filter);

        let sql = format!(
            "{} {} ORDER BY id ASC LIMIT ? OFFSET ?",
            SELECT_COLUMNS, where_clause
        );

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| TicketError::Database(e.to_string()))?;

        let mut all_params: Vec<Box<dyn rusqlite::ToSql>> = params;
        all_params.push(Box::new(filter.limit));
        all_params.push(Box::new(filter.offset));

        let param_refs: Vec<&dyn rusqlite::ToSql> = all_params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), Self::row_to_ticket)
            .map_err(|e| TicketError::Database(e.to_string()))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| TicketError::Database(e.to_string()))
    }

    fn count(&self, filter: &TicketFilter) -> Result<i64, TicketError> {
        let conn = self.conn()?;

        let (where_clause, params) = Self::build_where_clause(filter);
        let sql = format!("SELECT COUNT(*) FROM tickets {}", where_clause);
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        conn.query_row(&sql, param_refs.as_slice(), |row| row.get(0))
            .map_err(|e| TicketError::Database(e.to_string()))
    }

    fn save(&self, ticket: &Ticket) -> Result<Ticket, TicketError> {
        let conn = self.conn()?;

        let updated = conn
            .execute(
                "UPDATE tickets SET status = ?, translated_text = ?, translated_at = ? WHERE id = ?",
                params![
                    ticket.status.as_str(),
                    ticket.translated_text,
                    ticket.translated_at.map(|t| t.to_rfc3339()),
                    ticket.id,
                ],
            )
            .map_err(|e| TicketError::Database(e.to_string()))?;

        if updated == 0 {
            return Err(TicketError::NotFound(ticket.id));
        }

        Self::fetch(&conn, ticket.id)?.ok_or(TicketError::NotFound(ticket.id))
    }
}
