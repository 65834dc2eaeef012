//! Commands Layer
//!
//! Handlers the host shell calls into. Errors cross the boundary as strings.

mod todo_cmd;
mod launcher_cmd;

pub use todo_cmd::*;
pub use launcher_cmd::*;
