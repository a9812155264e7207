use std::sync::Arc;

use todo_core::TodoRepository;

use crate::model::RouteInfo;

#[derive(Clone)]
pub struct AppState {
    repository: Arc<dyn TodoRepository>,
    routes: Arc<[RouteInfo]>,
}

impl AppState {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self {
            repository,
            routes: Arc::from(Vec::new()),
        }
    }

    pub fn repository(&self) -> &dyn TodoRepository {
        self.repository.as_ref()
    }

    /// Routes registered on the router serving this state.
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    pub(crate) fn with_routes(mut self, routes: Vec<RouteInfo>) -> Self {
        self.routes = Arc::from(routes);
        self
    }
}
