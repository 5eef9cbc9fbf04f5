//! The expansion engine: resolves component tags against a loader list
//! and rewrites the document tree in place, bottom-up.

use crate::config::{CONTAINER_TAG, MAX_EXPANSION_DEPTH};
use crate::error::{EngineError, Result};
use crate::loader::{ComponentHandle, Loader};
use crate::markup::{Document, NodeId};

/// Expands component tags in HTML-like markup.
///
/// An expander owns a fixed, priority-ordered list of [`Loader`]s; the
/// list is set at construction and read-only afterwards. Each call to
/// [`expand_str`](Expander::expand_str) parses its input into a fresh
/// tree, rewrites the tree, and serializes it back; no state crosses
/// calls.
///
/// The walk is depth-first and bottom-up: a component's inner components
/// are expanded before the component itself is rendered, so render
/// functions always see fully expanded children markup. Markup injected
/// by a render is walked again, which lets components emit other
/// components; the number of such re-entries is capped (see
/// [`MAX_EXPANSION_DEPTH`]) so a component that keeps emitting its own
/// tag fails instead of recursing forever.
pub struct Expander {
    loaders: Vec<Box<dyn Loader>>,
    max_depth: usize,
}

impl Expander {
    /// Create an expander over an ordered loader list. Earlier loaders
    /// take priority for tags that several of them would claim.
    #[must_use]
    pub fn new(loaders: Vec<Box<dyn Loader>>) -> Self {
        Self {
            loaders,
            max_depth: MAX_EXPANSION_DEPTH,
        }
    }

    /// Override the re-entry depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    /// Expand all resolvable components in `input` and return the
    /// serialized result.
    ///
    /// # Errors
    /// Fails if the input does not parse, if any render function fails,
    /// if a render result does not parse, or if the depth limit is hit.
    /// There is no partial output: the call succeeds completely or not
    /// at all.
    pub fn expand_str(&self, input: &str) -> Result<String> {
        let mut doc = Document::parse(input)?;
        self.expand_document(&mut doc)?;
        Ok(doc.serialize())
    }

    /// Expand all resolvable components in an already parsed document,
    /// rewriting it in place.
    ///
    /// # Errors
    /// Same failure modes as [`expand_str`](Expander::expand_str), minus
    /// the input parse.
    pub fn expand_document(&self, doc: &mut Document) -> Result<()> {
        self.expand_children(doc, None, 0)
    }

    /// First-match resolution over the ordered loader list.
    ///
    /// Returns the first loader claiming the tag, with its handle; ties
    /// between loaders are broken by list position alone.
    fn resolve_component(&self, tag_name: &str) -> Option<(&dyn Loader, ComponentHandle)> {
        self.loaders
            .iter()
            .find_map(|loader| loader.resolve(tag_name).map(|h| (loader.as_ref(), h)))
    }

    /// Walk the children of `parent` (`None` = top level) in document
    /// order, expanding each bottom-up.
    ///
    /// `depth` counts how many layers of freshly injected markup the walk
    /// is currently inside; plain recursion into the input document does
    /// not increase it.
    fn expand_children(
        &self,
        doc: &mut Document,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Result<()> {
        if depth > self.max_depth {
            return Err(EngineError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        // Replacements keep their slot, so the child count is stable.
        let child_count = doc.child_ids(parent).len();
        for index in 0..child_count {
            let child = doc.child_ids(parent)[index];

            // Innermost components first: the child's subtree is fully
            // expanded before the child itself is considered.
            if !doc.child_ids(Some(child)).is_empty() {
                self.expand_children(doc, Some(child), depth)?;
            }

            if let Some(replacement) = self.expand_node(doc, child)? {
                // Injected markup may itself contain components.
                if !doc.child_ids(Some(replacement)).is_empty() {
                    self.expand_children(doc, Some(replacement), depth + 1)?;
                }
                doc.replace_child(parent, index, replacement);
            }
        }
        Ok(())
    }

    /// Apply the expansion step to one node.
    ///
    /// Returns `None` when the node passes through unchanged (text nodes
    /// and tags no loader claims), or the id of the replacement node:
    /// a neutral container wrapping the parsed render result.
    fn expand_node(&self, doc: &mut Document, id: NodeId) -> Result<Option<NodeId>> {
        let Some(tag) = doc.tag_name(id).map(str::to_owned) else {
            return Ok(None);
        };
        let Some((loader, handle)) = self.resolve_component(&tag) else {
            return Ok(None);
        };

        let attributes = doc.attribute_map(id);
        let children_markup = doc.serialize_children(id);
        tracing::trace!(component = %tag, "expanding component");

        let markup = loader
            .render(&tag, &handle, &attributes, &children_markup)
            .map_err(|source| EngineError::Render {
                component: tag.clone(),
                source,
            })?;

        let fragment = doc.parse_fragment_into(&markup)?;
        let container = doc.create_element(CONTAINER_TAG);
        for node in fragment {
            doc.append_child(container, node);
        }
        Ok(Some(container))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::RenderError;
    use crate::loader::{DebugLoader, TemplateLoader};
    use crate::markup::AttributeMap;

    use super::*;

    fn header_loader() -> TemplateLoader {
        TemplateLoader::new().with_template("header", |attrs: &AttributeMap, _children| {
            let title = attrs.get("title").map(String::as_str).unwrap_or_default();
            Ok(format!("<h1>{title}</h1>"))
        })
    }

    #[test]
    fn test_expand_simple_component() {
        let expander = Expander::new(vec![Box::new(header_loader())]);
        let html = expander
            .expand_str(r#"<Header title="A"></Header>"#)
            .unwrap();
        assert_eq!(html, "<span><h1>A</h1></span>");
    }

    #[test]
    fn test_unresolved_tag_passes_through() {
        let expander = Expander::new(vec![Box::new(header_loader())]);
        let html = expander.expand_str("<Footer>hi</Footer>").unwrap();
        assert_eq!(html, "<footer>hi</footer>");
    }

    #[test]
    fn test_no_loaders_is_pure_passthrough() {
        let expander = Expander::new(Vec::new());
        let html = expander
            .expand_str(r#"<main><p id="x">text</p></main>"#)
            .unwrap();
        assert_eq!(html, r#"<main><p id="x">text</p></main>"#);
    }

    #[test]
    fn test_bottom_up_children_already_expanded() {
        // The outer component must receive the inner one's output, not
        // the literal inner tag.
        let loader = TemplateLoader::new()
            .with_template("outer", |_attrs, children: &str| {
                Ok(format!("<section>{children}</section>"))
            })
            .with_template("inner", |_attrs, _children| Ok("<em>x</em>".to_string()));
        let expander = Expander::new(vec![Box::new(loader)]);
        let html = expander.expand_str("<Outer><Inner/></Outer>").unwrap();
        assert_eq!(
            html,
            "<span><section><span><em>x</em></span></section></span>"
        );
    }

    #[test]
    fn test_first_loader_wins() {
        let first = TemplateLoader::new()
            .with_template("x", |_, _| Ok("<b>first</b>".to_string()));
        let second = TemplateLoader::new()
            .with_template("x", |_, _| Ok("<b>second</b>".to_string()));
        let expander = Expander::new(vec![Box::new(first), Box::new(second)]);
        let html = expander.expand_str("<X/>").unwrap();
        assert_eq!(html, "<span><b>first</b></span>");
    }

    #[test]
    fn test_loader_order_decides_over_debug_fallback() {
        let expander = Expander::new(vec![
            Box::new(header_loader()),
            Box::new(DebugLoader::new()),
        ]);
        let html = expander
            .expand_str(r#"<Header title="T"></Header>"#)
            .unwrap();
        // The template claimed the tag first: no debug dump for it. The
        // fallback only ever saw the h1 the template emitted.
        assert!(!html.contains("data-name=\"header\""));
        assert!(html.contains("data-name=\"h1\""));
    }

    #[test]
    fn test_injected_markup_is_expanded_again() {
        let loader = TemplateLoader::new()
            .with_template("wrapper", |_, _| {
                Ok("<Leaf/> and <Leaf/>".to_string())
            })
            .with_template("leaf", |_, _| Ok("<i>leaf</i>".to_string()));
        let expander = Expander::new(vec![Box::new(loader)]);
        let html = expander.expand_str("<Wrapper/>").unwrap();
        assert_eq!(
            html,
            "<span><span><i>leaf</i></span> and <span><i>leaf</i></span></span>"
        );
    }

    #[test]
    fn test_nested_same_named_component() {
        let loader = TemplateLoader::new().with_template(
            "item",
            |attrs: &AttributeMap, children: &str| {
                let title = attrs.get("title").map(String::as_str).unwrap_or_default();
                Ok(format!("<b>{title}:{children}</b>"))
            },
        );
        let expander = Expander::new(vec![Box::new(loader)]);
        let html = expander
            .expand_str(r#"<Item title="outer"><Item title="inner">x</Item></Item>"#)
            .unwrap();
        // The inner expansion appears inside the outer one's children slot.
        assert_eq!(html, "<span><b>outer:<span><b>inner:x</b></span></b></span>");
    }

    #[test]
    fn test_render_failure_aborts_call() {
        let loader = TemplateLoader::new()
            .with_template("bad", |_, _| Err(RenderError::new("template exploded")));
        let expander = Expander::new(vec![Box::new(loader)]);
        let err = expander.expand_str("<p>ok</p><Bad/>").unwrap_err();
        match err {
            EngineError::Render { component, .. } => assert_eq!(component, "bad"),
            other => panic!("expected render error, got {other}"),
        }
    }

    #[test]
    fn test_self_reproducing_component_hits_depth_limit() {
        let loader = TemplateLoader::new()
            .with_template("loop", |_, _| Ok("<Loop/>".to_string()));
        let expander = Expander::new(vec![Box::new(loader)]).with_max_depth(8);
        let err = expander.expand_str("<Loop/>").unwrap_err();
        assert!(matches!(err, EngineError::DepthExceeded { limit: 8 }));
    }

    #[test]
    fn test_deep_plain_nesting_is_not_limited() {
        // Only injected markup counts against the depth limit; a deeply
        // nested input document with nothing to expand passes through.
        let mut input = String::new();
        for _ in 0..50 {
            input.push_str("<div>");
        }
        input.push_str("bottom");
        for _ in 0..50 {
            input.push_str("</div>");
        }
        let expander = Expander::new(Vec::new()).with_max_depth(8);
        assert_eq!(expander.expand_str(&input).unwrap(), input);
    }

    #[test]
    fn test_resolve_component_first_match() {
        let first = TemplateLoader::new().with_template("shared", |_, _| Ok("a".to_string()));
        let second = TemplateLoader::new().with_template("shared", |_, _| Ok("b".to_string()));
        let expander = Expander::new(vec![Box::new(first), Box::new(second)]);
        let (_, handle) = expander.resolve_component("shared").unwrap();
        assert_eq!(handle.token(), "shared");
        assert!(expander.resolve_component("missing").is_none());
    }

    #[test]
    fn test_component_at_top_level_is_replaced() {
        let expander = Expander::new(vec![Box::new(header_loader())]);
        let html = expander
            .expand_str(r#"before <Header title="B"></Header> after"#)
            .unwrap();
        assert_eq!(html, "before <span><h1>B</h1></span> after");
    }

    #[test]
    fn test_debug_loader_dumps_attributes() {
        let expander = Expander::new(vec![Box::new(DebugLoader::new())]);
        let html = expander
            .expand_str(r#"<Card title="T">body</Card>"#)
            .unwrap();
        assert_eq!(
            html,
            "<span><div data-name=\"card\"><ul><li>title - T</li></ul>body</div></span>"
        );
    }
}
