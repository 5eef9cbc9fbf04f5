use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod blog;
mod config;
mod handlers;
mod models;
mod state;

use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app_config = AppConfig::from_env();

    let articles = match &app_config.articles_path {
        Some(path) => match models::load_articles(path) {
            Ok(articles) => {
                tracing::info!(count = articles.len(), path = %path.display(), "loaded articles");
                articles
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load articles, using built-in stubs");
                models::stub_articles()
            }
        },
        None => models::stub_articles(),
    };

    let app_state = AppState {
        expander: Arc::new(blog::blog_expander()),
        articles: Arc::new(articles),
    };

    let app = handlers::router(app_state);

    tracing::info!(addr = %app_config.bind_addr, "starting weft server");
    let listener = match tokio::net::TcpListener::bind(&app_config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %app_config.bind_addr, "failed to bind");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
