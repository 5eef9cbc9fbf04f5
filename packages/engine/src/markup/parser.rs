//! Lenient tokenizer and tree builder for HTML-like markup.
//!
//! Recovery rules: elements still open at end of input are closed, a close
//! tag with no matching open element is dropped, a stray `<` that does not
//! start a tag is literal text. Comments, doctypes and processing
//! instructions are consumed and discarded. Two situations are hard
//! errors: end of input inside a tag, and an attribute value whose quote
//! is never closed.

use crate::config::is_void_element;
use crate::error::{EngineError, Result};

use super::{Document, Element, NodeData, NodeId};

/// Single-pass parser that allocates nodes directly into a document arena.
pub(super) struct FragmentParser<'input> {
    input: &'input str,
    pos: usize,
}

impl<'input> FragmentParser<'input> {
    pub(super) fn new(input: &'input str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the whole input, returning the top-level node ids.
    pub(super) fn run(mut self, doc: &mut Document) -> Result<Vec<NodeId>> {
        let mut roots: Vec<NodeId> = Vec::new();
        // Open-element stack; the top is the current insertion point.
        let mut stack: Vec<NodeId> = Vec::new();

        while let Some(ch) = self.peek() {
            if ch != '<' {
                let raw = self.read_text();
                append_text(doc, &mut roots, &stack, &decode_entities(raw));
                continue;
            }
            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.skip_comment();
            } else if rest.starts_with("</") {
                let name = self.read_close_tag()?;
                if let Some(depth) = stack
                    .iter()
                    .rposition(|id| doc.tag_name(*id) == Some(name.as_str()))
                {
                    stack.truncate(depth);
                }
                // No matching open element: the close tag is dropped.
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_declaration();
            } else if rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                let (id, has_body) = self.read_open_tag(doc)?;
                attach(doc, &mut roots, &stack, id);
                if has_body {
                    stack.push(id);
                }
            } else {
                // '<' not followed by a tag: literal text.
                self.pos += 1;
                append_text(doc, &mut roots, &stack, "<");
            }
        }

        Ok(roots)
    }

    fn rest(&self) -> &'input str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        self.take_while(|c| c.is_whitespace());
    }

    /// Consume characters while the predicate holds; returns the slice.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'input str {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .find(|(_, c)| !pred(*c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += end;
        &rest[..end]
    }

    fn read_text(&mut self) -> &'input str {
        self.take_while(|c| c != '<')
    }

    fn skip_comment(&mut self) {
        self.pos += 4; // "<!--"
        match self.rest().find("-->") {
            Some(i) => self.pos += i + 3,
            None => self.pos = self.input.len(),
        }
    }

    fn skip_declaration(&mut self) {
        match self.rest().find('>') {
            Some(i) => self.pos += i + 1,
            None => self.pos = self.input.len(),
        }
    }

    /// Read `</name ... >` and return the lowercased name.
    fn read_close_tag(&mut self) -> Result<String> {
        self.pos += 2; // "</"
        let name = self.read_name();
        match self.rest().find('>') {
            Some(i) => {
                self.pos += i + 1;
                Ok(name)
            }
            None => Err(EngineError::UnclosedTag { tag: name }),
        }
    }

    fn read_name(&mut self) -> String {
        self.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
            .to_ascii_lowercase()
    }

    /// Read an open tag from `<` through `>`, allocate the element, and
    /// report whether it can take a body (not self-closed, not void).
    fn read_open_tag(&mut self, doc: &mut Document) -> Result<(NodeId, bool)> {
        self.pos += 1; // '<'
        let tag = self.read_name();
        let mut attrs: Vec<(String, String)> = Vec::new();
        let self_closing;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(EngineError::UnclosedTag { tag }),
                Some('>') => {
                    self.pos += 1;
                    self_closing = false;
                    break;
                }
                Some('/') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    if self.peek() == Some('>') {
                        self.pos += 1;
                        self_closing = true;
                        break;
                    }
                    // Stray '/' inside the tag: ignored.
                }
                Some(other) => {
                    let name = self
                        .take_while(|c| {
                            !c.is_whitespace() && !matches!(c, '=' | '>' | '/')
                        })
                        .to_ascii_lowercase();
                    if name.is_empty() {
                        // Junk character that can start neither an
                        // attribute nor the tag end: skip it.
                        self.pos += other.len_utf8();
                        continue;
                    }
                    self.skip_whitespace();
                    let value = if self.peek() == Some('=') {
                        self.pos += 1;
                        self.skip_whitespace();
                        self.read_attr_value(&tag, &name)?
                    } else {
                        String::new()
                    };
                    attrs.push((name, value));
                }
            }
        }

        let has_body = !self_closing && !is_void_element(&tag);
        let id = doc.push_node(NodeData::Element(Element {
            tag,
            attrs,
            children: Vec::new(),
        }));
        Ok((id, has_body))
    }

    fn read_attr_value(&mut self, tag: &str, attr: &str) -> Result<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                match self.rest().find(quote) {
                    Some(i) => {
                        let raw = &self.rest()[..i];
                        let value = decode_entities(raw);
                        self.pos += i + 1;
                        Ok(value)
                    }
                    None => Err(EngineError::UnterminatedAttribute {
                        tag: tag.to_string(),
                        attribute: attr.to_string(),
                    }),
                }
            }
            _ => {
                let raw = self.take_while(|c| !c.is_whitespace() && c != '>');
                Ok(decode_entities(raw))
            }
        }
    }
}

/// Attach a node under the current insertion point.
fn attach(doc: &mut Document, roots: &mut Vec<NodeId>, stack: &[NodeId], id: NodeId) {
    match stack.last() {
        Some(parent) => doc.append_child(*parent, id),
        None => roots.push(id),
    }
}

/// Attach decoded text, merging with a preceding text sibling.
fn append_text(doc: &mut Document, roots: &mut Vec<NodeId>, stack: &[NodeId], text: &str) {
    if text.is_empty() {
        return;
    }
    let last_sibling = match stack.last() {
        Some(parent) => doc.child_ids(Some(*parent)).last().copied(),
        None => roots.last().copied(),
    };
    if let Some(last) = last_sibling {
        if let NodeData::Text(existing) = doc.node_mut(last) {
            existing.push_str(text);
            return;
        }
    }
    let id = doc.push_node(NodeData::Text(text.to_string()));
    attach(doc, roots, stack, id);
}

/// Decode the named entities `&amp; &lt; &gt; &quot; &apos;` and numeric
/// character references. Anything unrecognized stays literal.
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match decode_entity(tail) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode one entity at the start of `s` (which begins with `&`).
/// Returns the character and the number of bytes consumed.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let end = s.find(';').filter(|&e| e <= 34)?;
    if end < 2 {
        return None;
    }
    let name = &s[1..end];
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().ok()?
            } else {
                return None;
            };
            char::from_u32(code)?
        }
    };
    Some((ch, end + 1))
}
