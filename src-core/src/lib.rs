//! NekoTodo Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - viewmodel: Observable todo snapshot driven by commands
//! - launcher: Opens the separately installed VPN client
//! - commands: Entry points for the host shell

use std::path::PathBuf;
use std::sync::Arc;

pub mod commands;
pub mod config;
pub mod domain;
pub mod launcher;
pub mod repository;
pub mod viewmodel;

use config::AppConfig;
use domain::DomainResult;
use launcher::{LauncherBridge, PackageManager, SystemPackageManager};
use repository::{init_db, DbState, TodoRepository};
use viewmodel::TodoViewModel;

/// Application state shared across commands
pub struct AppState {
    pub config: AppConfig,
    pub db_state: DbState,
    pub db_path: PathBuf,
    pub todo_repo: Arc<TodoRepository>,
    pub todos: Arc<TodoViewModel>,
    pub launcher: LauncherBridge,
}

impl AppState {
    /// Full startup: logging, database, initial snapshot
    pub async fn setup(config: AppConfig) -> DomainResult<Self> {
        init_logging(&config);
        let packages = Arc::new(SystemPackageManager::new(config.launcher.apps.clone()));
        Self::open(config, packages).await
    }

    /// Startup without touching the global logger
    pub async fn open(config: AppConfig, packages: Arc<dyn PackageManager>) -> DomainResult<Self> {
        config.validate()?;
        let db_path = config.db_path();

        let db_state = match init_db(&db_path).await {
            Ok(state) => {
                let _ = rolling_logger::info("DB init success");
                state
            }
            Err(e) => {
                let _ = rolling_logger::error(&format!("DB init failed: {}", e));
                return Err(e);
            }
        };

        let todo_repo = Arc::new(TodoRepository::new(db_state.shared()));
        let todos = Arc::new(TodoViewModel::new(todo_repo.clone()));
        todos.refresh().await?;

        log::info!("App state ready with {} todos", todos.todos().len());

        Ok(Self {
            config,
            db_state,
            db_path,
            todo_repo,
            todos,
            launcher: LauncherBridge::new(packages),
        })
    }

    pub async fn shutdown(&self) {
        self.db_state.close().await;
        log::info!("Database closed");
    }
}

/// Install the rolling file logger; a second call is a no-op
fn init_logging(config: &AppConfig) {
    if rolling_logger::is_initialized() {
        return;
    }
    match rolling_logger::init_logger(config.log_dir.clone(), "NekoTodo") {
        Ok(()) => {
            if let Some(dir) = rolling_logger::log_dir() {
                log::info!("Logging to {}", dir.display());
            }
        }
        Err(rolling_logger::LoggerError::AlreadyInitialized) => {}
        Err(e) => eprintln!("Failed to init rolling logger: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Todo;
    use crate::launcher::FakePackages;

    #[tokio::test]
    async fn test_open_loads_existing_todos() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::in_dir(dir.path());

        {
            let state = AppState::open(config.clone(), Arc::new(FakePackages::default())).await.unwrap();
            state.todos.add(Todo::new("survives restart")).await.unwrap();
            state.shutdown().await;
        }

        let state = AppState::open(config, Arc::new(FakePackages::default())).await.unwrap();
        let todos = state.todos.todos();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "survives restart");
    }

    #[tokio::test]
    async fn test_setup_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::in_dir(dir.path());

        let state = AppState::setup(config).await.unwrap();
        assert!(state.db_path.exists());
        assert!(state.todos.todos().is_empty());
    }

    #[tokio::test]
    async fn test_open_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::in_dir(dir.path());
        config.db_file_name = String::new();

        assert!(AppState::open(config, Arc::new(FakePackages::default())).await.is_err());
    }
}
