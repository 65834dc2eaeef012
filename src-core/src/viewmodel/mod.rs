//! View Model Layer
//!
//! Observable todo snapshot and the commands that mutate it.

mod command;
mod observable;
mod todo_viewmodel;

pub use command::TodoCommand;
pub use observable::{Observable, Subscription};
pub use todo_viewmodel::TodoViewModel;
