//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod approvals;
pub mod auth;
pub mod dev;
pub mod documents;
pub mod health;

/// Creates the router with public and protected routes.
///
/// Developer routes are only mounted when the environment allows them.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(documents::routes())
        .merge(approvals::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let router = Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes);

    if state.environment.allows_dev_routes() {
        router.merge(dev::routes())
    } else {
        router
    }
}
