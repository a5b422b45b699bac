// Per-request tenant context, carried through the middleware chain as an
// axum request extension.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use echoboard_models::Tenant;

/// Mutable per-request state: the resolved tenant and the caller's
/// authentication status
///
/// Inserted by the tenant resolution middleware; the tenant is set at most
/// once per request. Dropped with the request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    tenant: Option<Tenant>,
    authenticated: bool,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tenant(&mut self, tenant: Tenant) {
        debug_assert!(self.tenant.is_none(), "tenant already resolved");
        self.tenant = Some(tenant);
    }

    pub fn tenant(&self) -> Option<&Tenant> {
        self.tenant.as_ref()
    }

    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// Extractor handing the resolved tenant to downstream handlers
///
/// Rejects with 404 when no tenant was resolved, matching the response the
/// resolution middleware gives for an unknown hostname.
#[derive(Debug, Clone)]
pub struct CurrentTenant(pub Tenant);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentTenant
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .and_then(|ctx| ctx.tenant().cloned())
            .map(CurrentTenant)
            .ok_or(StatusCode::NOT_FOUND)
    }
}

/// Whether the request originates from background/script-driven client
/// code rather than a full page navigation
pub fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Utc;
    use echoboard_models::TenantStatus;
    use uuid::Uuid;

    fn tenant() -> Tenant {
        Tenant {
            id: Uuid::new_v4(),
            name: "Acme".to_string(),
            subdomain: "acme".to_string(),
            cname: None,
            status: TenantStatus::Active,
            is_private: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn context_starts_empty_and_unauthenticated() {
        let ctx = RequestContext::new();
        assert!(ctx.tenant().is_none());
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn set_tenant_makes_it_visible() {
        let mut ctx = RequestContext::new();
        ctx.set_tenant(tenant());
        assert_eq!(ctx.tenant().unwrap().subdomain, "acme");
    }

    #[test]
    fn is_ajax_matches_xml_http_request_header() {
        let mut headers = HeaderMap::new();
        assert!(!is_ajax(&headers));

        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        assert!(is_ajax(&headers));

        headers.insert("x-requested-with", HeaderValue::from_static("fetch"));
        assert!(!is_ajax(&headers));
    }
}
