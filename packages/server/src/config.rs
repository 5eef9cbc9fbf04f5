use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the server binds to.
    pub bind_addr: String,
    /// Optional JSON file with the articles to serve; built-in stub
    /// articles are used when unset.
    pub articles_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr = env::var("WEFT_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let articles_path = env::var("WEFT_ARTICLES").ok().map(PathBuf::from);

        Self {
            bind_addr,
            articles_path,
        }
    }
}
