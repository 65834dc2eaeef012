//! Mobile App Shell
//!
//! Home view with the VPN client launcher, plus the todo list view.

use std::sync::Arc;

use nekotodo_lib::commands::{handle_launcher_call, MethodResult, LAUNCH_NEKO_RAY};
use nekotodo_lib::domain::DomainResult;
use nekotodo_lib::AppState;

use crate::app::TodoListScreen;

/// Mobile view selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobileView {
    Main,
    Todos,
}

pub struct MobileApp {
    state: Arc<AppState>,
    current_view: MobileView,
    todo_screen: TodoListScreen,
    /// Feedback line under the launch button
    status: Option<String>,
}

impl MobileApp {
    pub fn new(state: Arc<AppState>) -> Self {
        let todo_screen = TodoListScreen::new(state.todos.clone());
        Self {
            state,
            current_view: MobileView::Main,
            todo_screen,
            status: None,
        }
    }

    pub fn current_view(&self) -> MobileView {
        self.current_view
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Launch button on the main view
    pub fn open_vpn_client(&mut self) -> bool {
        let launched = match handle_launcher_call(&self.state, LAUNCH_NEKO_RAY) {
            MethodResult::Success(launched) => launched,
            MethodResult::NotImplemented => false,
        };
        self.status = Some(if launched {
            "Opening VPN client...".to_string()
        } else {
            format!("{} is not installed", self.state.config.launcher.target_app_id)
        });
        launched
    }

    /// Switch to the todo list, loading it on first show
    pub async fn show_todos(&mut self) -> DomainResult<&mut TodoListScreen> {
        if self.current_view != MobileView::Todos {
            self.current_view = MobileView::Todos;
            self.todo_screen.on_create().await?;
        }
        Ok(&mut self.todo_screen)
    }

    pub fn show_main(&mut self) {
        self.current_view = MobileView::Main;
    }
}
