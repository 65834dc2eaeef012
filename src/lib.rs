//! NekoTodo Frontend
//!
//! Headless presentation layer: the host shell renders these view states and
//! forwards taps to them.

pub mod app;
pub mod components;
pub mod mobile;

pub use app::TodoListScreen;
pub use components::{TodoAdapter, TodoDialog, TodoRow};
pub use mobile::{MobileApp, MobileView};
