use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// One journal entry rendered on the page.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum ArticlesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid articles JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load articles from a JSON file: an array of `{title, body}` objects.
pub fn load_articles(path: &Path) -> Result<Vec<Article>, ArticlesError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Built-in articles used when no articles file is configured.
pub fn stub_articles() -> Vec<Article> {
    vec![
        Article {
            title: "Shipping the parser".to_string(),
            body: "The lenient tree builder landed this week.".to_string(),
        },
        Article {
            title: "Components all the way down".to_string(),
            body: "Snippets can nest; inner ones render first.".to_string(),
        },
        Article {
            title: "Hello from weft".to_string(),
            body: "First entry.".to_string(),
        },
    ]
}
