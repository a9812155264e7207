//! Document store backends for the todo service.
//!
//! [`InMemoryRepository`] keeps the collection in process memory and is the
//! default for local runs and tests; [`MongoRepository`] stores todos as
//! documents in a MongoDB collection.

pub mod memory;
pub mod mongo;

pub use memory::InMemoryRepository;
pub use mongo::{MongoConfig, MongoRepository};
pub use todo_core::repository::{Result, TodoRepository};
pub use todo_core::StorageError;
