use crate::handlers::pages::render_page;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use echoboard_models::{EmailVerification, EmailVerificationKind};
use echoboard_tenant::DirectoryError;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct VerificationKeyQuery {
    pub k: String,
}

pub async fn verify_sign_up(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VerificationKeyQuery>,
) -> Response {
    match validate_key(&state, EmailVerificationKind::SignUp, &query.k).await {
        Ok(record) => render_page(
            "Confirm your account",
            "Finish setting up your portal.",
            &format!("<p>Signed up as {}</p>", record.email),
        )
        .into_response(),
        Err(response) => response,
    }
}

pub async fn verify_sign_in(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VerificationKeyQuery>,
) -> Response {
    match validate_key(&state, EmailVerificationKind::SignIn, &query.k).await {
        Ok(record) => render_page(
            "Welcome back",
            "You are signed in.",
            &format!("<p>Signed in as {}</p>", record.email),
        )
        .into_response(),
        Err(response) => response,
    }
}

/// Validate a verification key of the expected kind
///
/// Unknown keys are 404. A key already consumed is 410. An expired key is
/// burned on first sight and then also 410, so the same link can never be
/// replayed. Only a valid, unexpired, unused key yields its record.
pub async fn validate_key(
    state: &AppState,
    kind: EmailVerificationKind,
    key: &str,
) -> Result<EmailVerification, Response> {
    let record = match state.tenants.find_verification_by_key(kind, key).await {
        Ok(record) => record,
        Err(DirectoryError::NotFound) => return Err(StatusCode::NOT_FOUND.into_response()),
        Err(err) => return Err(failure(err)),
    };

    if record.verified_at.is_some() {
        return Err(StatusCode::GONE.into_response());
    }

    if record.is_expired(Utc::now()) {
        if let Err(err) = state.tenants.set_key_as_verified(key).await {
            return Err(failure(err));
        }
        return Err(StatusCode::GONE.into_response());
    }

    Ok(record)
}

fn failure(err: DirectoryError) -> Response {
    tracing::error!(error = %err, "verification lookup failed");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
