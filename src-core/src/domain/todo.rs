//! Todo Entity
//!
//! A single to-do record with optional due date, priority and checklist.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, DomainError, DomainResult};

/// Eisenhower-style priority, persisted as a small integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Urgent and important
    #[default]
    UrgentImportant,
    /// Important, not urgent
    Important,
    /// Urgent, not important
    Urgent,
    /// Neither urgent nor important
    Neither,
}

impl Priority {
    pub fn as_i32(&self) -> i32 {
        match self {
            Priority::UrgentImportant => 0,
            Priority::Important => 1,
            Priority::Urgent => 2,
            Priority::Neither => 3,
        }
    }

    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => Priority::Important,
            2 => Priority::Urgent,
            3 => Priority::Neither,
            _ => Priority::UrgentImportant,
        }
    }
}

/// One line of a todo's checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub is_done: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_done: false,
        }
    }
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned identifier, 0 until persisted
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Milliseconds since the Unix epoch; never rewritten after insert
    pub created_at: i64,
    /// Milliseconds since the Unix epoch
    pub due_date: Option<i64>,
    pub priority: Priority,
    pub is_completed: bool,

    // Extended fields, stored as JSON columns
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

impl Todo {
    /// Create an unsaved todo stamped with the current time
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_created_at(title, chrono::Utc::now().timestamp_millis())
    }

    /// Create an unsaved todo with an explicit creation time
    pub fn with_created_at(title: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: String::new(),
            created_at,
            due_date: None,
            priority: Priority::default(),
            is_completed: false,
            attachments: Vec::new(),
            checklist: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_due_date(mut self, due_date: i64) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Due before `now` and still open
    pub fn is_overdue(&self, now: i64) -> bool {
        !self.is_completed && self.due_date.map_or(false, |due| due < now)
    }

    /// (done, total) over the checklist
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|c| c.is_done).count();
        (done, self.checklist.len())
    }

    pub fn toggle_checklist_item(&mut self, index: usize) -> DomainResult<bool> {
        let entry = self.checklist.get_mut(index).ok_or_else(|| {
            DomainError::InvalidInput(format!("Checklist index {} out of range", index))
        })?;
        entry.is_done = !entry.is_done;
        Ok(entry.is_done)
    }

    /// Rejects blank titles
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::InvalidInput("Todo title must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Entity for Todo {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}
