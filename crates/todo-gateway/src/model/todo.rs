use serde::Serialize;
use todo_core::TodoId;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: TodoId,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
