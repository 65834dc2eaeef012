//! Todo Commands
//!
//! Requests the presentation layer sends to the view model.

use serde::{Deserialize, Serialize};
use crate::domain::Todo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "todo", rename_all = "snake_case")]
pub enum TodoCommand {
    /// Reload the snapshot from the store
    Refresh,
    Add(Todo),
    Edit(Todo),
    Remove(Todo),
    /// Flip `is_completed` on the given todo
    ToggleCompleted(Todo),
    /// Delete every completed todo
    ClearCompleted,
}

impl TodoCommand {
    pub fn name(&self) -> &'static str {
        match self {
            TodoCommand::Refresh => "refresh",
            TodoCommand::Add(_) => "add",
            TodoCommand::Edit(_) => "edit",
            TodoCommand::Remove(_) => "remove",
            TodoCommand::ToggleCompleted(_) => "toggle_completed",
            TodoCommand::ClearCompleted => "clear_completed",
        }
    }
}
