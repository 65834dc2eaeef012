//! Todo List Component
//!
//! Holds the rows currently on screen and maps row taps to commands.

use nekotodo_lib::domain::Todo;
use nekotodo_lib::viewmodel::TodoCommand;

use super::todo_dialog::TodoDialog;

/// What one list row shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: i64,
    pub title: String,
    /// None when the description is blank (row hides the line)
    pub description: Option<String>,
    pub completed: bool,
    pub overdue: bool,
    /// "done/total" when the todo has a checklist
    pub checklist: Option<String>,
}

impl TodoRow {
    pub fn bind(todo: &Todo, now: i64) -> Self {
        let description = if todo.description.trim().is_empty() {
            None
        } else {
            Some(todo.description.clone())
        };
        let checklist = match todo.checklist_progress() {
            (_, 0) => None,
            (done, total) => Some(format!("{}/{}", done, total)),
        };

        Self {
            id: todo.id,
            title: todo.title.clone(),
            description,
            completed: todo.is_completed,
            overdue: todo.is_overdue(now),
            checklist,
        }
    }
}

/// Backing data for the todo list
#[derive(Debug, Default)]
pub struct TodoAdapter {
    todos: Vec<Todo>,
    /// Bumped on every `update_data`, lets the view skip redundant redraws
    version: u64,
}

impl TodoAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything shown with a fresh snapshot
    pub fn update_data(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
        self.version += 1;
    }

    pub fn item_count(&self) -> usize {
        self.todos.len()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn todo_at(&self, position: usize) -> Option<&Todo> {
        self.todos.get(position)
    }

    pub fn row(&self, position: usize, now: i64) -> Option<TodoRow> {
        self.todo_at(position).map(|todo| TodoRow::bind(todo, now))
    }

    pub fn rows(&self, now: i64) -> Vec<TodoRow> {
        self.todos.iter().map(|todo| TodoRow::bind(todo, now)).collect()
    }

    /// Edit button: dialog prefilled with the row's todo
    pub fn on_edit(&self, position: usize) -> Option<TodoDialog> {
        self.todo_at(position).map(TodoDialog::for_edit)
    }

    /// Delete button
    pub fn on_delete(&self, position: usize) -> Option<TodoCommand> {
        self.todo_at(position).cloned().map(TodoCommand::Remove)
    }

    /// Checkbox
    pub fn on_toggle(&self, position: usize) -> Option<TodoCommand> {
        self.todo_at(position).cloned().map(TodoCommand::ToggleCompleted)
    }
}
