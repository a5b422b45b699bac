use crate::config::HostMode;
use crate::handlers;
use crate::middleware;
use crate::AppState;
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Reachable by unauthenticated visitors even on private tenants.
    let tenant_open = Router::new()
        .route("/signin", get(handlers::pages::signin_page))
        .route("/signup/verify", get(handlers::verification::verify_sign_up))
        .route("/signin/verify", get(handlers::verification::verify_sign_in));

    let tenant_gated = Router::new()
        .route("/", get(handlers::pages::home))
        .layer(from_fn(middleware::check_tenant_privacy));

    // Chain order per request: resolution, authentication, active gate,
    // then the privacy gate on the gated routes. Each stage may terminate
    // the chain early.
    let portal = tenant_open
        .merge(tenant_gated)
        .layer(from_fn(middleware::require_active_tenant))
        .layer(from_fn_with_state(state.clone(), middleware::authenticate));

    let portal = match state.config.host_mode {
        HostMode::Single => portal.layer(from_fn_with_state(
            state.clone(),
            middleware::resolve_single_tenant,
        )),
        HostMode::Multi => portal.layer(from_fn_with_state(
            state.clone(),
            middleware::resolve_multi_tenant,
        )),
    };

    Router::new()
        // Outside the tenant chain: liveness, legal pages, and the signup
        // page a tenant-less single-host deployment redirects to.
        .route("/health", get(handlers::health::health_check))
        .route("/terms", get(handlers::pages::terms))
        .route("/privacy", get(handlers::pages::privacy))
        .route("/signup", get(handlers::pages::signup_page))
        .merge(portal)
        .with_state(state)
}
