//! The journal page: its component set and its template.
//!
//! The expander is constructed explicitly at startup and shared through
//! application state; nothing here is a global.

use weft_engine::{Expander, TemplateLoader};

use crate::models::Article;

/// Build the expander the server renders every page with.
pub fn blog_expander() -> Expander {
    Expander::new(vec![Box::new(blog_components())])
}

/// The journal's component set: a page header and an article snippet.
fn blog_components() -> TemplateLoader {
    TemplateLoader::new()
        .with_template("Header", |attrs, _children| {
            let title = attrs.get("title").map(String::as_str).unwrap_or_default();
            let subtitle = attrs
                .get("sub-title")
                .map(String::as_str)
                .unwrap_or_default();
            Ok(format!("<h1><strong>{title}</strong> {subtitle}</h1>"))
        })
        .with_template("ArticleSnippet", |attrs, children| {
            let title = attrs.get("title").map(String::as_str).unwrap_or_default();
            let subtitle = attrs
                .get("sub-title")
                .map(|s| format!("<p>{s}</p>"))
                .unwrap_or_default();
            Ok(format!(
                "<article><h2>{title}</h2>{subtitle}<div>{children}</div></article>"
            ))
        })
}

/// Build the page template for a list of articles.
pub fn build_page(articles: &[Article]) -> String {
    let mut out = String::from(
        r#"<main><Header title="The Weft Journal" sub-title="rendered per request"></Header>"#,
    );
    for article in articles {
        out.push_str(&format!(
            r#"<ArticleSnippet title="{}">{}</ArticleSnippet>"#,
            article.title, article.body
        ));
    }
    out.push_str("</main>");
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn one_article() -> Vec<Article> {
        vec![Article {
            title: "A title".to_string(),
            body: "A body.".to_string(),
        }]
    }

    #[test]
    fn test_build_page_contains_each_article() {
        let page = build_page(&one_article());
        assert!(page.contains(r#"<ArticleSnippet title="A title">A body.</ArticleSnippet>"#));
    }

    #[test]
    fn test_expander_renders_full_page() {
        let html = blog_expander().expand_str(&build_page(&one_article())).unwrap();
        assert!(html.contains("<strong>The Weft Journal</strong>"));
        assert!(html.contains("<h2>A title</h2>"));
        assert!(!html.contains("<articlesnippet"));
        assert!(!html.contains("<header"));
    }

    #[test]
    fn test_page_with_no_articles_still_renders_header() {
        let html = blog_expander().expand_str(&build_page(&[])).unwrap();
        assert!(html.contains("<h1>"));
        assert!(!html.contains("<article>"));
    }

    #[test]
    fn test_snippet_without_subtitle_has_no_paragraph() {
        let html = blog_expander().expand_str(&build_page(&one_article())).unwrap();
        assert_eq!(html.matches("<p>").count(), 0);
    }
}
