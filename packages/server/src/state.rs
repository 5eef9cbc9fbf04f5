use std::sync::Arc;

use weft_engine::Expander;

use crate::models::Article;

#[derive(Clone)]
pub struct AppState {
    pub expander: Arc<Expander>,
    pub articles: Arc<Vec<Article>>,
}
