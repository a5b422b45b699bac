use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use echoboard_models::{Tenant, TenantStatus};
use echoboard_tenant::{is_ajax, strip_port, DirectoryError, RequestContext};
use std::sync::Arc;

/// Single-host resolution: inject the deployment's only tenant
///
/// A deployment without any tenant yet sends the visitor to signup.
pub async fn resolve_single_tenant(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.tenants.first().await {
        Ok(tenant) => {
            let mut ctx = RequestContext::new();
            ctx.set_tenant(tenant);
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Err(DirectoryError::NotFound) => Redirect::temporary("/signup").into_response(),
        Err(err) => failure(err),
    }
}

/// Multi-tenant resolution: pick the tenant from the request hostname
pub async fn resolve_multi_tenant(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let hostname = strip_port(&host).to_string();

    // The marketing site lives on the apex domain. This check runs before
    // any lookup so a tenant registering that hostname cannot shadow it.
    if hostname == state.config.marketing_hostname() {
        return Redirect::temporary(&state.config.marketing_url).into_response();
    }

    match state.tenants.get_by_domain(&hostname).await {
        Ok(tenant) => {
            let canonical = canonical_link(&state, &tenant, &host, &request);

            let mut ctx = RequestContext::new();
            ctx.set_tenant(tenant);
            request.extensions_mut().insert(ctx);

            let mut response = next.run(request).await;
            if let Some(link) = canonical {
                if let Ok(value) = HeaderValue::from_str(&format!("<{}>; rel=\"canonical\"", link))
                {
                    response.headers_mut().insert(header::LINK, value);
                }
            }
            response
        }
        Err(DirectoryError::NotFound) => {
            tracing::debug!(hostname = %hostname, "no tenant for hostname");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(err) => failure(err),
    }
}

/// Canonical URL hint for tenants with a custom domain reached through
/// another hostname. Best-effort; never blocks the request, and skipped
/// for background calls.
fn canonical_link(state: &AppState, tenant: &Tenant, host: &str, request: &Request) -> Option<String> {
    if !tenant.has_cname() || is_ajax(request.headers()) {
        return None;
    }

    let urls = state.config.urls();
    let base_url = urls.tenant_base_url(tenant);
    if base_url == urls.request_base_url(host) {
        return None;
    }

    let request_uri = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    Some(format!("{}{}", base_url, request_uri))
}

/// Gate: only active tenants are served
pub async fn require_active_tenant(request: Request, next: Next) -> Response {
    let status = request
        .extensions()
        .get::<RequestContext>()
        .and_then(|ctx| ctx.tenant())
        .map(|tenant| tenant.status);

    match status {
        Some(TenantStatus::Active) => next.run(request).await,
        // An inactive tenant answers exactly like a missing one, so that
        // its existence cannot be probed.
        Some(TenantStatus::Inactive) | Some(TenantStatus::PendingDeletion) | None => {
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Gate: private tenants require an authenticated caller
pub async fn check_tenant_privacy(request: Request, next: Next) -> Response {
    let blocked = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.tenant().is_some_and(|t| t.is_private) && !ctx.is_authenticated())
        .unwrap_or(false);

    if blocked {
        return Redirect::temporary("/signin").into_response();
    }
    next.run(request).await
}

fn failure(err: DirectoryError) -> Response {
    tracing::error!(error = %err, "tenant lookup failed");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
