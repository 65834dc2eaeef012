//! Todo Commands
//!
//! Exposes todo operations to the host shell. Each mutation goes through the
//! view model so subscribers see the refreshed snapshot.

use crate::domain::Todo;
use crate::repository::Repository;
use crate::viewmodel::TodoCommand;
use crate::AppState;

/// Create a new todo
pub async fn create_todo(
    state: &AppState,
    title: String,
    description: Option<String>,
) -> Result<Todo, String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title must not be empty".to_string());
    }

    let todo = Todo::new(title).with_description(description.unwrap_or_default().trim());
    let id = state.todos.add(todo).await.map_err(|e| e.to_string())?;

    state
        .todo_repo
        .get(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Todo {} not found", id))
}

/// List all todos, newest first
pub async fn list_todos(state: &AppState) -> Result<Vec<Todo>, String> {
    state.todos.refresh().await.map_err(|e| e.to_string())?;
    Ok(state.todos.todos())
}

/// Get todo by ID
pub async fn get_todo(state: &AppState, id: i64) -> Result<Option<Todo>, String> {
    state.todo_repo.get(id).await.map_err(|e| e.to_string())
}

/// Update todo fields; unspecified fields keep their stored value
pub async fn update_todo(
    state: &AppState,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
) -> Result<Todo, String> {
    // First get existing todo
    let existing = state
        .todo_repo
        .get(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Todo {} not found", id))?;

    let updated = Todo {
        title: title.map(|t| t.trim().to_string()).unwrap_or(existing.title.clone()),
        description: description.map(|d| d.trim().to_string()).unwrap_or(existing.description.clone()),
        is_completed: completed.unwrap_or(existing.is_completed),
        ..existing
    };

    state.todos.edit(updated.clone()).await.map_err(|e| e.to_string())?;
    Ok(updated)
}

/// Delete todo; deleting an unknown ID is not an error
pub async fn delete_todo(state: &AppState, id: i64) -> Result<(), String> {
    let Some(todo) = state.todo_repo.get(id).await.map_err(|e| e.to_string())? else {
        log::warn!("Delete requested for unknown todo {}", id);
        return Ok(());
    };
    state.todos.remove(&todo).await.map_err(|e| e.to_string())?;
    Ok(())
}

/// Toggle todo completion status
pub async fn toggle_todo(state: &AppState, id: i64) -> Result<Todo, String> {
    let mut todo = state
        .todo_repo
        .get(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Todo {} not found", id))?;

    state.todos.toggle_completed(&todo).await.map_err(|e| e.to_string())?;
    todo.is_completed = !todo.is_completed;
    Ok(todo)
}

/// Run a command object and return the refreshed snapshot
pub async fn run_todo_command(state: &AppState, command: TodoCommand) -> Result<Vec<Todo>, String> {
    state.todos.dispatch(command).await.map_err(|e| e.to_string())?;
    Ok(state.todos.todos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::launcher::FakePackages;
    use std::sync::Arc;

    async fn test_state(dir: &tempfile::TempDir) -> AppState {
        AppState::open(AppConfig::in_dir(dir.path()), Arc::new(FakePackages::default()))
            .await
            .expect("open state")
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;

        let created = create_todo(&state, "  Buy milk ".into(), Some(" 2 litres ".into())).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.description, "2 litres");

        let todos = list_todos(&state).await.unwrap();
        assert_eq!(todos, vec![created]);
    }

    #[tokio::test]
    async fn test_create_blank_title_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;

        assert!(create_todo(&state, "   ".into(), None).await.is_err());
        assert!(state.todos.todos().is_empty());
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;
        let created = create_todo(&state, "A".into(), Some("keep me".into())).await.unwrap();

        let updated = update_todo(&state, created.id, Some("B".into()), None, None).await.unwrap();
        assert_eq!(updated.title, "B");
        assert_eq!(updated.description, "keep me");
        assert_eq!(updated.created_at, created.created_at);

        let stored = get_todo(&state, created.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
        assert_eq!(state.todos.todos(), vec![stored]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_errors() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;
        assert!(update_todo(&state, 99, Some("x".into()), None, None).await.is_err());
    }

    #[tokio::test]
    async fn test_toggle_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;
        let created = create_todo(&state, "Walk dog".into(), None).await.unwrap();

        let toggled = toggle_todo(&state, created.id).await.unwrap();
        assert!(toggled.is_completed);
        assert!(state.todos.todos()[0].is_completed);

        delete_todo(&state, created.id).await.unwrap();
        delete_todo(&state, created.id).await.unwrap();
        assert!(state.todos.todos().is_empty());
    }

    #[tokio::test]
    async fn test_run_command_returns_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;

        let snapshot = run_todo_command(&state, TodoCommand::Add(Todo::new("via command"))).await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "via command");
    }
}
