//! Database Connection and Setup
//!
//! Manages the SQLite connection and schema migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

/// Shared connection handle
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
}

impl DbState {
    pub fn new() -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
        }
    }

    pub fn shared(&self) -> SharedConnection {
        self.conn.clone()
    }

    pub async fn is_open(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Drop the connection; repositories holding the handle start failing
    pub async fn close(&self) {
        let mut guard = self.conn.lock().await;
        *guard = None;
    }
}

impl Default for DbState {
    fn default() -> Self {
        Self::new()
    }
}

/// Open (or create) the database at `db_path` and run migrations
///
/// `":memory:"` opens a private in-memory database.
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(db_path)?;
    run_migrations(&conn)?;

    let state = DbState::new();
    *state.conn.lock().await = Some(conn);

    log::info!("Database ready at {}", db_path.display());
    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS todo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            createdAt INTEGER NOT NULL,
            dueDate INTEGER,
            priority INTEGER NOT NULL DEFAULT 0,
            isCompleted INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )?;

    // Extended variant: attachments and checklist as JSON arrays
    if !column_exists(conn, "todo", "attachments") {
        conn.execute("ALTER TABLE todo ADD COLUMN attachments TEXT NOT NULL DEFAULT '[]'", [])
            .map_err(|e| DomainError::Persistence(format!("Failed to add attachments: {}", e)))?;
    }

    if !column_exists(conn, "todo", "checklist") {
        conn.execute("ALTER TABLE todo ADD COLUMN checklist TEXT NOT NULL DEFAULT '[]'", [])
            .map_err(|e| DomainError::Persistence(format!("Failed to add checklist: {}", e)))?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_todo_created ON todo(createdAt)",
        [],
    )?;

    Ok(())
}
