use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::blog;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(render_journal))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render the journal page: build the template from the configured
/// articles, expand it, return the markup. Expansion is all-or-nothing,
/// so any render failure becomes a plain 500.
pub async fn render_journal(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let template = blog::build_page(&state.articles);

    match state.expander.expand_str(&template) {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!(error = %e, "page expansion failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
