//! UI Components
//!
//! Headless view state for the todo screen.

mod todo_list;
mod todo_dialog;

pub use todo_list::{TodoAdapter, TodoRow};
pub use todo_dialog::TodoDialog;
