use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use echoboard_tenant::CurrentTenant;
use std::sync::Arc;

/// Fixed chrome shared by every server-rendered page
pub(crate) fn render_page(title: &str, description: &str, content: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <meta name=\"description\" content=\"{description}\">\n\
         </head>\n\
         <body>\n\
         <main>\n\
         <h1>{title}</h1>\n\
         {content}\n\
         </main>\n\
         </body>\n\
         </html>\n"
    ))
}

/// Portal home page; title and description only, no dynamic data
pub async fn home(CurrentTenant(tenant): CurrentTenant) -> Html<String> {
    render_page(&tenant.name, "Share ideas and vote on what matters.", "")
}

pub async fn signin_page() -> Html<String> {
    render_page("Sign in", "Sign in to participate.", "")
}

pub async fn signup_page() -> Html<String> {
    render_page("Create your portal", "Set up a feedback portal for your product.", "")
}

pub async fn terms(State(state): State<Arc<AppState>>) -> Response {
    legal_page(&state, "Terms of Service", "terms.md").await
}

pub async fn privacy(State(state): State<Arc<AppState>>) -> Response {
    legal_page(&state, "Privacy Policy", "privacy.md").await
}

/// Serve a legal document from the configured etc directory, embedded
/// verbatim in the page chrome
async fn legal_page(state: &AppState, title: &str, file: &str) -> Response {
    let path = state.config.etc_dir.join(file);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => {
            render_page(title, title, &format!("<pre>{}</pre>", content)).into_response()
        }
        Err(err) => {
            tracing::debug!(file = %path.display(), error = %err, "legal page file missing");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
