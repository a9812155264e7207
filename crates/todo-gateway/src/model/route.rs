use serde::Serialize;

/// One entry of the route index served at `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub handler: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteInfo>,
}
