use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use echoboard_tenant::RequestContext;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Mark the request context authenticated when it carries a valid token
///
/// Never rejects on its own; an invalid or absent token just leaves the
/// caller anonymous for the privacy gate to judge.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = token_from_request(&request) {
        let key = DecodingKey::from_secret(state.config.jwt_secret.as_bytes());
        match decode::<Claims>(&token, &key, &Validation::default()) {
            Ok(_) => {
                if let Some(ctx) = request.extensions_mut().get_mut::<RequestContext>() {
                    ctx.set_authenticated(true);
                }
            }
            Err(err) => tracing::debug!(error = %err, "ignoring invalid auth token"),
        }
    }

    next.run(request).await
}

/// Bearer token from the Authorization header, or the `auth_token` cookie
fn token_from_request(request: &Request) -> Option<String> {
    let headers = request.headers();

    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }

    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .map(str::trim)
                .find_map(|c| c.strip_prefix("auth_token="))
                .map(str::to_string)
        })
}
