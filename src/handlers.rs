use crate::{
    AppState,
    models::{PlaceholderResponse, ResolvedRoute, RouteTableResponse},
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    routing::{MethodRouter, on},
};

// --- Handlers ---

/// list_routes
///
/// [Public Route] Returns the mounted coherence route table, public half first,
/// exactly as it was generated at startup.
#[utoipa::path(
    get,
    path = "/coherence/routes",
    responses((status = 200, description = "Mounted Route Table", body = RouteTableResponse))
)]
pub async fn list_routes(State(state): State<AppState>) -> Json<RouteTableResponse> {
    Json(RouteTableResponse {
        public: state.routes.public.clone(),
        protected: state.routes.protected.clone(),
    })
}

/// placeholder
///
/// Handler source used until the host application provides its controllers.
/// Each route answers on its own method only, with `501 Not Implemented` and a
/// body naming the controller action that should serve it.
pub fn placeholder<S>(route: &ResolvedRoute) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    let body = PlaceholderResponse::from(route);
    on(route.method.filter(), move || {
        let body = body.clone();
        async move { (StatusCode::NOT_IMPLEMENTED, Json(body)) }
    })
}
