//! Core types and traits for the todo service.
//!
//! This crate provides the domain types shared by the storage backends
//! and the HTTP gateway: the validated [`TodoId`], the caller-defined
//! [`TodoFields`] payload, and the [`TodoRepository`] contract every
//! document store implements.

pub mod error;
pub mod repository;
pub mod todo;
pub mod todo_id;

pub use error::{CoreError, IdError, StorageError};
pub use repository::TodoRepository;
pub use todo::{Todo, TodoFields};
pub use todo_id::TodoId;
