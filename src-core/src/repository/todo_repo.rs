//! Todo Repository Implementation
//!
//! SQLite-backed implementation of Repository<Todo>

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{ChecklistItem, DomainError, DomainResult, Priority, Todo, WriteOutcome};
use super::db::SharedConnection;
use super::traits::{Repository, TodoStore};

const TODO_COLUMNS: &str =
    "id, title, description, createdAt, dueDate, priority, isCompleted, attachments, checklist";

/// SQLite implementation of Todo repository
pub struct TodoRepository {
    conn: SharedConnection,
}

impl TodoRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Number of stored todos
    pub async fn count(&self) -> DomainResult<i64> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM todo", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn connection<'a>(guard: &'a Option<Connection>) -> DomainResult<&'a Connection> {
    guard
        .as_ref()
        .ok_or_else(|| DomainError::Persistence("Database not initialized".to_string()))
}

fn to_json<T: serde::Serialize>(value: &T) -> DomainResult<String> {
    serde_json::to_string(value).map_err(|e| DomainError::Internal(e.to_string()))
}

#[async_trait]
impl Repository<Todo> for TodoRepository {
    async fn list(&self) -> DomainResult<Vec<Todo>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let query = format!(
            "SELECT {} FROM todo ORDER BY createdAt DESC, id DESC",
            TODO_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([], row_to_todo)?;

        let mut todos = Vec::new();
        for todo in rows {
            todos.push(todo?);
        }
        Ok(todos)
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Todo>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let query = format!("SELECT {} FROM todo WHERE id = ?", TODO_COLUMNS);
        let todo = conn.query_row(&query, params![id], row_to_todo).optional()?;
        Ok(todo)
    }

    async fn insert(&self, entity: &Todo) -> DomainResult<i64> {
        entity.validate()?;

        let attachments = to_json(&entity.attachments)?;
        let checklist = to_json(&entity.checklist)?;

        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        // id 0 binds as NULL so SQLite assigns a fresh key.
        // On conflict createdAt keeps its stored value.
        let id = if entity.is_persisted() { Some(entity.id) } else { None };
        conn.execute(
            "INSERT INTO todo (id, title, description, createdAt, dueDate, priority, isCompleted, attachments, checklist) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET title = excluded.title, description = excluded.description, dueDate = excluded.dueDate, priority = excluded.priority, isCompleted = excluded.isCompleted, attachments = excluded.attachments, checklist = excluded.checklist",
            params![
                id,
                entity.title,
                entity.description,
                entity.created_at,
                entity.due_date,
                entity.priority.as_i32(),
                entity.is_completed,
                attachments,
                checklist,
            ],
        )?;

        // last_insert_rowid is left untouched when the upsert updates
        let id = id.unwrap_or_else(|| conn.last_insert_rowid());
        log::debug!("Inserted todo {}", id);
        Ok(id)
    }

    async fn update(&self, entity: &Todo) -> DomainResult<WriteOutcome> {
        entity.validate()?;

        let attachments = to_json(&entity.attachments)?;
        let checklist = to_json(&entity.checklist)?;

        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        // createdAt is never rewritten after insert
        let changed = conn.execute(
            "UPDATE todo SET title = ?, description = ?, dueDate = ?, priority = ?, isCompleted = ?, attachments = ?, checklist = ? WHERE id = ?",
            params![
                entity.title,
                entity.description,
                entity.due_date,
                entity.priority.as_i32(),
                entity.is_completed,
                attachments,
                checklist,
                entity.id,
            ],
        )?;

        let outcome = WriteOutcome::from_rows_changed(changed);
        if !outcome.is_applied() {
            log::warn!("Update skipped, todo {} not found", entity.id);
        }
        Ok(outcome)
    }

    async fn delete(&self, entity: &Todo) -> DomainResult<WriteOutcome> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let changed = conn.execute("DELETE FROM todo WHERE id = ?", params![entity.id])?;

        let outcome = WriteOutcome::from_rows_changed(changed);
        if !outcome.is_applied() {
            log::warn!("Delete skipped, todo {} not found", entity.id);
        }
        Ok(outcome)
    }
}

#[async_trait]
impl TodoStore for TodoRepository {
    async fn clear_completed(&self) -> DomainResult<usize> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let removed = conn.execute("DELETE FROM todo WHERE isCompleted = 1", [])?;
        log::debug!("Cleared {} completed todos", removed);
        Ok(removed)
    }
}

/// Convert a database row to Todo
fn row_to_todo(row: &rusqlite::Row<'_>) -> rusqlite::Result<Todo> {
    let attachments: Option<String> = row.get(7)?;
    let checklist: Option<String> = row.get(8)?;

    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        created_at: row.get(3)?,
        due_date: row.get(4)?,
        priority: Priority::from_i32(row.get::<_, Option<i32>>(5)?.unwrap_or(0)),
        is_completed: row.get::<_, Option<bool>>(6)?.unwrap_or(false),
        attachments: attachments
            .and_then(|json| serde_json::from_str::<Vec<String>>(&json).ok())
            .unwrap_or_default(),
        checklist: checklist
            .and_then(|json| serde_json::from_str::<Vec<ChecklistItem>>(&json).ok())
            .unwrap_or_default(),
    })
}
