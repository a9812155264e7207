mod health;
mod route;
mod todo;

pub use health::HealthResponse;
pub use route::{RouteInfo, RoutesResponse};
pub use todo::{CreatedResponse, MessageResponse};
