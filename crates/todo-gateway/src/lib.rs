//! HTTP gateway for the todo service.
//!
//! Exposes the todo collection as a JSON resource under `/todos`. Every
//! handler validates its input, performs a single repository call and maps
//! the outcome to a status code; see [`error::ApiError`] for the mapping.

pub mod app;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod response;
pub mod state;

pub use app::{App, RouterConfig};
pub use state::AppState;
