//! Todo List Screen
//!
//! Wires the list adapter and dialog to the view model: commands go down,
//! snapshots come back up through the subscription.

use std::sync::Arc;

use nekotodo_lib::domain::{DomainResult, Todo};
use nekotodo_lib::viewmodel::{Subscription, TodoCommand, TodoViewModel};

use crate::components::{TodoAdapter, TodoDialog};

pub struct TodoListScreen {
    view_model: Arc<TodoViewModel>,
    subscription: Subscription<Vec<Todo>>,
    adapter: TodoAdapter,
    dialog: Option<TodoDialog>,
}

impl TodoListScreen {
    pub fn new(view_model: Arc<TodoViewModel>) -> Self {
        let subscription = view_model.subscribe();
        Self {
            view_model,
            subscription,
            adapter: TodoAdapter::new(),
            dialog: None,
        }
    }

    /// Screen shown: load todos and bind the first snapshot
    pub async fn on_create(&mut self) -> DomainResult<()> {
        let result = self.view_model.refresh().await;
        // Bind whatever is published, even if the reload failed
        self.sync();
        result
    }

    /// Apply the newest snapshot if one arrived; true if the list changed
    pub fn sync(&mut self) -> bool {
        if !self.subscription.has_pending() {
            return false;
        }
        let todos = self.subscription.latest();
        log::debug!("Binding {} todos", todos.len());
        self.adapter.update_data(todos);
        true
    }

    /// Wait for the next snapshot and bind it; false once the view model is gone
    pub async fn collect_next(&mut self) -> bool {
        match self.subscription.next().await {
            Some(todos) => {
                self.adapter.update_data(todos);
                true
            }
            None => false,
        }
    }

    pub fn adapter(&self) -> &TodoAdapter {
        &self.adapter
    }

    pub fn dialog(&self) -> Option<&TodoDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut TodoDialog> {
        self.dialog.as_mut()
    }

    /// Floating add button
    pub fn on_add_clicked(&mut self) -> &mut TodoDialog {
        self.dialog.insert(TodoDialog::for_new())
    }

    pub fn on_edit_clicked(&mut self, position: usize) -> Option<&mut TodoDialog> {
        let dialog = self.adapter.on_edit(position)?;
        Some(self.dialog.insert(dialog))
    }

    pub async fn on_delete_clicked(&mut self, position: usize) -> DomainResult<()> {
        match self.adapter.on_delete(position) {
            Some(command) => self.send(command).await,
            None => Ok(()),
        }
    }

    pub async fn on_toggle_clicked(&mut self, position: usize) -> DomainResult<()> {
        match self.adapter.on_toggle(position) {
            Some(command) => self.send(command).await,
            None => Ok(()),
        }
    }

    /// Save button; returns false when the dialog had nothing to save
    pub async fn on_dialog_save(&mut self) -> DomainResult<bool> {
        let Some(dialog) = self.dialog.take() else {
            return Ok(false);
        };
        match dialog.submit() {
            Some(command) => {
                self.send(command).await?;
                Ok(true)
            }
            None => {
                log::debug!("Dialog dismissed with blank title");
                Ok(false)
            }
        }
    }

    pub fn on_dialog_cancel(&mut self) {
        self.dialog = None;
    }

    async fn send(&mut self, command: TodoCommand) -> DomainResult<()> {
        let result = self.view_model.dispatch(command).await;
        self.sync();
        result
    }
}
