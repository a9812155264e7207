mod health;
mod index;
mod todo;

pub use health::health_handler;
pub use index::index_handler;
pub use todo::{
    create_todo_handler, delete_todo_handler, get_todo_handler, list_todos_handler,
    update_todo_handler,
};
