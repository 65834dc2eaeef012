//! Todo View Model
//!
//! Owns the published todo snapshot. Every mutation goes to the store first
//! and is followed by a full reload; a failed store call leaves the snapshot
//! as it was.
//!
//! A mutation whose write succeeded but whose reload failed still returns
//! `Err`. The write is durable at that point, so callers should `refresh`
//! rather than repeat the mutation.

use std::sync::Arc;

use crate::domain::{DomainResult, Todo, WriteOutcome};
use crate::repository::TodoStore;
use super::command::TodoCommand;
use super::observable::{Observable, Subscription};

pub struct TodoViewModel {
    repo: Arc<dyn TodoStore>,
    todos: Observable<Vec<Todo>>,
}

impl TodoViewModel {
    pub fn new(repo: Arc<dyn TodoStore>) -> Self {
        Self {
            repo,
            todos: Observable::new(Vec::new()),
        }
    }

    /// Current snapshot
    pub fn todos(&self) -> Vec<Todo> {
        self.todos.get()
    }

    /// Observe the snapshot; the current value is delivered first
    pub fn subscribe(&self) -> Subscription<Vec<Todo>> {
        self.todos.subscribe()
    }

    /// Reload every todo from the store and publish it
    pub async fn refresh(&self) -> DomainResult<()> {
        match self.repo.list().await {
            Ok(todos) => {
                log::debug!("Publishing {} todos", todos.len());
                self.todos.set(todos);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load todos: {}", e);
                Err(e)
            }
        }
    }

    /// Store the todo and reload. An `Err` after a successful insert comes
    /// from the reload; the todo is already stored.
    pub async fn add(&self, todo: Todo) -> DomainResult<i64> {
        let id = self.repo.insert(&todo).await.inspect_err(|e| {
            log::error!("Failed to add todo: {}", e);
        })?;
        self.refresh().await?;
        Ok(id)
    }

    /// Update the todo and reload; a reload failure is reported like `add`
    pub async fn edit(&self, todo: Todo) -> DomainResult<WriteOutcome> {
        let outcome = self.repo.update(&todo).await.inspect_err(|e| {
            log::error!("Failed to update todo {}: {}", todo.id, e);
        })?;
        self.refresh().await?;
        Ok(outcome)
    }

    /// Delete the todo and reload; a reload failure is reported like `add`
    pub async fn remove(&self, todo: &Todo) -> DomainResult<WriteOutcome> {
        let outcome = self.repo.delete(todo).await.inspect_err(|e| {
            log::error!("Failed to delete todo {}: {}", todo.id, e);
        })?;
        self.refresh().await?;
        Ok(outcome)
    }

    pub async fn toggle_completed(&self, todo: &Todo) -> DomainResult<WriteOutcome> {
        let mut toggled = todo.clone();
        toggled.is_completed = !toggled.is_completed;
        self.edit(toggled).await
    }

    /// Delete all completed todos, returning how many went away
    pub async fn clear_completed(&self) -> DomainResult<usize> {
        let removed = self.repo.clear_completed().await.inspect_err(|e| {
            log::error!("Failed to clear completed todos: {}", e);
        })?;
        self.refresh().await?;
        Ok(removed)
    }

    pub async fn dispatch(&self, command: TodoCommand) -> DomainResult<()> {
        log::info!("Todo command: {}", command.name());
        match command {
            TodoCommand::Refresh => self.refresh().await,
            TodoCommand::Add(todo) => self.add(todo).await.map(|_| ()),
            TodoCommand::Edit(todo) => self.edit(todo).await.map(|_| ()),
            TodoCommand::Remove(todo) => self.remove(&todo).await.map(|_| ()),
            TodoCommand::ToggleCompleted(todo) => self.toggle_completed(&todo).await.map(|_| ()),
            TodoCommand::ClearCompleted => self.clear_completed().await.map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::repository::{init_db, Repository, TodoRepository};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};

    async fn sqlite_viewmodel() -> (TodoViewModel, Arc<TodoRepository>) {
        let state = init_db(&PathBuf::from(":memory:")).await.expect("init db");
        let repo = Arc::new(TodoRepository::new(state.shared()));
        (TodoViewModel::new(repo.clone()), repo)
    }

    /// Wraps a real store and fails every call while `broken` is set,
    /// or only `list` while `broken_reads` is set
    struct FlakyRepo {
        inner: TodoRepository,
        broken: AtomicBool,
        broken_reads: AtomicBool,
    }

    impl FlakyRepo {
        fn check(&self) -> DomainResult<()> {
            if self.broken.load(Ordering::SeqCst) {
                Err(DomainError::Persistence("disk I/O error".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl Repository<Todo> for FlakyRepo {
        async fn list(&self) -> DomainResult<Vec<Todo>> {
            self.check()?;
            if self.broken_reads.load(Ordering::SeqCst) {
                return Err(DomainError::Persistence("database is locked".to_string()));
            }
            self.inner.list().await
        }
        async fn get(&self, id: i64) -> DomainResult<Option<Todo>> {
            self.check()?;
            self.inner.get(id).await
        }
        async fn insert(&self, entity: &Todo) -> DomainResult<i64> {
            self.check()?;
            self.inner.insert(entity).await
        }
        async fn update(&self, entity: &Todo) -> DomainResult<WriteOutcome> {
            self.check()?;
            self.inner.update(entity).await
        }
        async fn delete(&self, entity: &Todo) -> DomainResult<WriteOutcome> {
            self.check()?;
            self.inner.delete(entity).await
        }
    }

    #[async_trait]
    impl TodoStore for FlakyRepo {
        async fn clear_completed(&self) -> DomainResult<usize> {
            self.check()?;
            self.inner.clear_completed().await
        }
    }

    async fn flaky_viewmodel() -> (TodoViewModel, Arc<FlakyRepo>) {
        let state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let flaky = Arc::new(FlakyRepo {
            inner: TodoRepository::new(state.shared()),
            broken: AtomicBool::new(false),
            broken_reads: AtomicBool::new(false),
        });
        (TodoViewModel::new(flaky.clone()), flaky)
    }

    #[tokio::test]
    async fn test_snapshot_starts_empty() {
        let (vm, _) = sqlite_viewmodel().await;
        assert!(vm.todos().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_tracks_store_after_each_command() {
        let (vm, repo) = sqlite_viewmodel().await;

        vm.add(Todo::with_created_at("first", 100)).await.unwrap();
        assert_eq!(vm.todos(), repo.list().await.unwrap());

        let id = vm.add(Todo::with_created_at("second", 200)).await.unwrap();
        assert_eq!(vm.todos(), repo.list().await.unwrap());
        assert_eq!(vm.todos()[0].title, "second");

        let mut edited = repo.get(id).await.unwrap().unwrap();
        edited.title = "second, edited".to_string();
        vm.edit(edited.clone()).await.unwrap();
        assert_eq!(vm.todos(), repo.list().await.unwrap());

        vm.remove(&edited).await.unwrap();
        let snapshot = vm.todos();
        assert_eq!(snapshot, repo.list().await.unwrap());
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "first");
    }

    #[tokio::test]
    async fn test_subscriber_sees_every_refresh() {
        let (vm, _) = sqlite_viewmodel().await;
        let mut sub = vm.subscribe();
        assert_eq!(sub.next().await, Some(Vec::new()));

        vm.add(Todo::new("Buy milk")).await.unwrap();
        let snapshot = sub.next().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "Buy milk");

        vm.refresh().await.unwrap();
        assert!(sub.has_pending());
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_current_snapshot() {
        let (vm, _) = sqlite_viewmodel().await;
        vm.add(Todo::new("already here")).await.unwrap();

        let mut sub = vm.subscribe();
        let snapshot = sub.next().await.unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_store_keeps_previous_snapshot() {
        let (vm, flaky) = flaky_viewmodel().await;

        vm.add(Todo::new("safe")).await.unwrap();
        let before = vm.todos();

        flaky.broken.store(true, Ordering::SeqCst);
        let err = vm.add(Todo::new("lost")).await.unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
        assert!(vm.refresh().await.is_err());
        assert_eq!(vm.todos(), before);
    }

    #[tokio::test]
    async fn test_edit_missing_reports_not_found() {
        let (vm, _) = sqlite_viewmodel().await;
        let mut ghost = Todo::new("ghost");
        ghost.id = 12;

        assert_eq!(vm.edit(ghost.clone()).await.unwrap(), WriteOutcome::NotFound);
        assert_eq!(vm.remove(&ghost).await.unwrap(), WriteOutcome::NotFound);
        assert!(vm.todos().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_toggle_and_clear() {
        let (vm, _) = sqlite_viewmodel().await;
        vm.dispatch(TodoCommand::Add(Todo::with_created_at("a", 1))).await.unwrap();
        vm.dispatch(TodoCommand::Add(Todo::with_created_at("b", 2))).await.unwrap();

        let b = vm.todos()[0].clone();
        vm.dispatch(TodoCommand::ToggleCompleted(b)).await.unwrap();
        assert!(vm.todos()[0].is_completed);

        vm.dispatch(TodoCommand::ClearCompleted).await.unwrap();
        let titles: Vec<_> = vm.todos().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["a"]);
    }

    #[tokio::test]
    async fn test_clear_completed_reports_count() {
        let (vm, repo) = sqlite_viewmodel().await;
        for title in ["a", "b", "c"] {
            let mut todo = Todo::new(title);
            todo.is_completed = title != "b";
            vm.add(todo).await.unwrap();
        }

        assert_eq!(vm.clear_completed().await.unwrap(), 2);
        assert_eq!(vm.todos(), repo.list().await.unwrap());
        assert_eq!(vm.todos().len(), 1);
        assert_eq!(vm.clear_completed().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_clear_leaves_store_and_snapshot_in_step() {
        let (vm, flaky) = flaky_viewmodel().await;
        let mut done = Todo::new("done");
        done.is_completed = true;
        vm.add(done).await.unwrap();
        vm.add(Todo::new("open")).await.unwrap();
        let before = vm.todos();

        flaky.broken.store(true, Ordering::SeqCst);
        assert!(vm.clear_completed().await.is_err());
        assert_eq!(vm.todos(), before);

        flaky.broken.store(false, Ordering::SeqCst);
        assert_eq!(flaky.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_reload_after_add_keeps_the_write() {
        let (vm, flaky) = flaky_viewmodel().await;

        flaky.broken_reads.store(true, Ordering::SeqCst);
        assert!(vm.add(Todo::new("stored anyway")).await.is_err());
        assert!(vm.todos().is_empty());

        flaky.broken_reads.store(false, Ordering::SeqCst);
        vm.refresh().await.unwrap();
        let titles: Vec<_> = vm.todos().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["stored anyway"]);
    }
}
