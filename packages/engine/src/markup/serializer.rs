//! Serialization of document trees back to markup text.

use crate::config::is_void_element;

use super::{Document, NodeData, NodeId};

impl Document {
    /// Serialize the whole fragment, top-level nodes in order.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for id in self.roots() {
            self.write_node(*id, &mut out);
        }
        out
    }

    /// Serialize a single node, including its own tags.
    #[must_use]
    pub fn serialize_node(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize a node's children only, the "inner markup" of an element.
    #[must_use]
    pub fn serialize_children(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.child_ids(Some(id)) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.node(id) {
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(value));
                    out.push('"');
                }
                out.push('>');
                if is_void_element(&el.tag) && el.children.is_empty() {
                    return;
                }
                for child in &el.children {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

/// Escape character data for text position: `& < >`.
#[must_use]
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a value for a double-quoted attribute position: `& " <`.
#[must_use]
pub fn escape_attribute(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::Document;
    use super::*;

    #[test]
    fn test_round_trip_simple() {
        let input = r#"<main><div id="x">hello</div></main>"#;
        let doc = Document::parse(input).unwrap();
        assert_eq!(doc.serialize(), input);
    }

    #[test]
    fn test_void_element_no_close_tag() {
        let doc = Document::parse("<p>a<br>b</p>").unwrap();
        assert_eq!(doc.serialize(), "<p>a<br>b</p>");
    }

    #[test]
    fn test_self_closing_serializes_with_close_tag() {
        // Non-void self-closed elements come back in open/close form.
        let doc = Document::parse("<item/>").unwrap();
        assert_eq!(doc.serialize(), "<item></item>");
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = Document::default();
        let p = doc.create_element("p");
        let text = doc.push_node(super::super::NodeData::Text("a < b & c".to_string()));
        doc.append_child(p, text);
        assert_eq!(doc.serialize_node(p), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_attribute_is_escaped() {
        let input = "<a title=\"say &quot;hi&quot;\"></a>";
        let doc = Document::parse(input).unwrap();
        assert_eq!(doc.serialize(), input);
    }

    #[test]
    fn test_serialize_children_excludes_own_tags() {
        let doc = Document::parse("<div><b>x</b>tail</div>").unwrap();
        assert_eq!(doc.serialize_children(doc.roots()[0]), "<b>x</b>tail");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a&b<c>d"), "a&amp;b&lt;c&gt;d");
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute(r#"a"b&c"#), "a&quot;b&amp;c");
    }
}
