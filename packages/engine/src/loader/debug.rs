//! Catch-all loader that visualizes components instead of rendering them.

use crate::config::CONTAINER_TAG;
use crate::error::RenderError;
use crate::markup::AttributeMap;

use super::{ComponentHandle, Loader};

/// Tags the debug rendering itself is built from. These must not be
/// claimed: expanded debug output is walked again, and claiming its own
/// tags would re-expand it without end.
const OUTPUT_TAGS: &[&str] = &["div", "li", "ul"];

/// Loader that claims any tag and renders it as an attribute dump.
///
/// Each claimed element becomes a `<div data-name="...">` with its
/// attributes as a list, followed by its inner markup. Useful for
/// inspecting what a document's components would receive. Because it
/// claims nearly everything, it belongs at the end of a loader list, as
/// a fallback behind the real component sources.
#[derive(Debug, Default, Clone, Copy)]
pub struct DebugLoader;

impl DebugLoader {
    /// Create a debug loader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Loader for DebugLoader {
    fn resolve(&self, tag_name: &str) -> Option<ComponentHandle> {
        let key = tag_name.to_ascii_lowercase();
        if OUTPUT_TAGS.contains(&key.as_str()) || key == CONTAINER_TAG {
            return None;
        }
        Some(ComponentHandle::new(key))
    }

    fn render(
        &self,
        _tag_name: &str,
        handle: &ComponentHandle,
        attributes: &AttributeMap,
        children_markup: &str,
    ) -> std::result::Result<String, RenderError> {
        // Sorted for stable output; attribute maps have no useful order.
        let mut pairs: Vec<(&str, &str)> = attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_unstable();

        let mut items = String::new();
        for (name, value) in pairs {
            items.push_str(&format!("<li>{name} - {value}</li>"));
        }

        Ok(format!(
            "<div data-name=\"{}\"><ul>{items}</ul>{children_markup}</div>",
            handle.token()
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_resolves_arbitrary_tags() {
        let loader = DebugLoader::new();
        assert!(loader.resolve("anything").is_some());
        assert!(loader.resolve("Header").is_some());
        assert!(loader.resolve("p").is_some());
    }

    #[test]
    fn test_declines_its_own_output_tags() {
        let loader = DebugLoader::new();
        assert!(loader.resolve("div").is_none());
        assert!(loader.resolve("ul").is_none());
        assert!(loader.resolve("li").is_none());
        assert!(loader.resolve("span").is_none());
    }

    #[test]
    fn test_handle_carries_lowercased_name() {
        let handle = DebugLoader::new().resolve("NavBar").unwrap();
        assert_eq!(handle.token(), "navbar");
    }

    #[test]
    fn test_render_lists_attributes_sorted() {
        let loader = DebugLoader::new();
        let handle = loader.resolve("card").unwrap();
        let mut attrs = AttributeMap::new();
        attrs.insert("title".to_string(), "T".to_string());
        attrs.insert("id".to_string(), "7".to_string());
        let markup = loader.render("card", &handle, &attrs, "<p>body</p>").unwrap();
        assert_eq!(
            markup,
            "<div data-name=\"card\"><ul><li>id - 7</li><li>title - T</li></ul><p>body</p></div>"
        );
    }

    #[test]
    fn test_render_without_attributes() {
        let loader = DebugLoader::new();
        let handle = loader.resolve("card").unwrap();
        let markup = loader
            .render("card", &handle, &AttributeMap::new(), "")
            .unwrap();
        assert_eq!(markup, "<div data-name=\"card\"><ul></ul></div>");
    }
}
