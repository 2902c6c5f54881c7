use axum::{Router, routing::MethodRouter};

use crate::models::ResolvedRoute;

/// HandlerSource
///
/// Supplies the axum handler for a resolved route. The returned `MethodRouter`
/// must be restricted to the route's method (`route.method.filter()`), so routes
/// sharing a path merge instead of overlapping.
///
/// Any `Fn(&ResolvedRoute) -> MethodRouter<S>` qualifies, including
/// `handlers::placeholder`.
pub trait HandlerSource<S> {
    fn method_router(&self, route: &ResolvedRoute) -> MethodRouter<S>;
}

impl<S, F> HandlerSource<S> for F
where
    F: Fn(&ResolvedRoute) -> MethodRouter<S>,
{
    fn method_router(&self, route: &ResolvedRoute) -> MethodRouter<S> {
        self(route)
    }
}

/// mount
///
/// Registers every route on `router` in order. Entries sharing a path with
/// different methods (`POST /sessions`, `DELETE /sessions`) end up on the same
/// axum route.
///
/// # Panics
/// Like `Router::route`, panics when two routes claim the same method and path,
/// or when a path template is not a valid axum path (custom templates must start
/// with `/`).
pub fn mount<S, H>(router: Router<S>, routes: &[ResolvedRoute], handlers: &H) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    H: HandlerSource<S> + ?Sized,
{
    routes.iter().fold(router, |router, route| {
        tracing::trace!(route = %route, "mounting coherence route");
        router.route(&route.path, handlers.method_router(route))
    })
}
