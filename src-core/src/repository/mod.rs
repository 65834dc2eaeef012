//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod todo_repo;


pub use traits::{Repository, TodoStore};
pub use db::{init_db, DbState, SharedConnection};
pub use todo_repo::TodoRepository;
