use std::path::PathBuf;
use std::time::Duration;

use axum::handler::Handler;
use axum::http::{header, Method, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post, MethodRouter};
use axum::Router;
use tower_http::services::ServeFile;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use typed_builder::TypedBuilder;

use crate::error::ApiError;
use crate::handlers::{
    create_todo_handler, delete_todo_handler, get_todo_handler, health_handler, index_handler,
    list_todos_handler, update_todo_handler,
};
use crate::model::RouteInfo;
use crate::state::AppState;

pub const DEFAULT_FAVICON_PATH: &str = "assets/favicon.ico";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, TypedBuilder)]
pub struct RouterConfig {
    /// File served at `/favicon.ico`.
    #[builder(default = PathBuf::from(DEFAULT_FAVICON_PATH), setter(into))]
    pub favicon_path: PathBuf,
    /// Upper bound for a whole request, store call included.
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Records each registered route so `/` can list it.
struct RouteTable {
    router: Router<AppState>,
    routes: Vec<RouteInfo>,
}

impl RouteTable {
    fn new() -> Self {
        Self {
            router: Router::new(),
            routes: Vec::new(),
        }
    }

    fn route<H, T>(mut self, method: Method, path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        let method_router: MethodRouter<AppState> = match method {
            Method::POST => post(handler),
            Method::PATCH => patch(handler),
            Method::DELETE => delete(handler),
            _ => get(handler),
        };

        self.routes.push(RouteInfo {
            method: method_name(&method),
            path,
            handler: std::any::type_name::<H>(),
        });
        self.router = self.router.route(path, method_router);
        self
    }

    fn favicon(mut self, path: &'static str, file: PathBuf) -> Self {
        self.routes.push(RouteInfo {
            method: "GET",
            path,
            handler: std::any::type_name::<ServeFile>(),
        });
        self.router = self.router.route_service(path, ServeFile::new(file));
        self
    }
}

fn method_name(method: &Method) -> &'static str {
    match *method {
        Method::POST => "POST",
        Method::PATCH => "PATCH",
        Method::DELETE => "DELETE",
        _ => "GET",
    }
}

/// Gives the bare 408 produced by [`TimeoutLayer`] the JSON error body.
async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        return ApiError::Timeout.into_response();
    }
    response
}

pub struct App {}

impl App {
    pub fn router(state: AppState, config: RouterConfig) -> Router {
        let table = RouteTable::new()
            .route(Method::GET, "/", index_handler)
            .route(Method::GET, "/health", health_handler)
            .route(Method::GET, "/todos", list_todos_handler)
            .route(Method::POST, "/todos", create_todo_handler)
            .route(Method::GET, "/todos/{id}", get_todo_handler)
            .route(Method::PATCH, "/todos/{id}", update_todo_handler)
            .route(Method::DELETE, "/todos/{id}", delete_todo_handler)
            .favicon("/favicon.ico", config.favicon_path);

        let state = state.with_routes(table.routes);

        table
            .router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                config.request_timeout,
            ))
            .layer(middleware::map_response(timeout_as_json))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
