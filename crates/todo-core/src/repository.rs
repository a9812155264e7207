use crate::error::StorageError;
use crate::todo::{Todo, TodoFields};
use crate::todo_id::TodoId;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// The document store holding the todo collection.
///
/// Every method performs exactly one store operation. Identifiers are
/// assigned by the store on insert and never reused after a delete.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Returns every todo in insertion order.
    async fn list(&self) -> Result<Vec<Todo>>;

    /// Retrieves a single todo.
    /// Returns `None` if the id does not exist.
    async fn get(&self, id: &TodoId) -> Result<Option<Todo>>;

    /// Stores a new todo and returns the identifier assigned to it.
    async fn insert(&self, fields: TodoFields) -> Result<TodoId>;

    /// Sets the given fields on an existing todo, leaving other fields untouched.
    /// Returns `true` if the todo existed.
    async fn update(&self, id: &TodoId, fields: TodoFields) -> Result<bool>;

    /// Deletes a todo.
    /// Returns `true` if the todo existed and was removed.
    async fn delete(&self, id: &TodoId) -> Result<bool>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Releases the store's connections. Called once, after the last request.
    async fn shutdown(&self) {}
}
