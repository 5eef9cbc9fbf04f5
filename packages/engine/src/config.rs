//! Configuration constants for the engine.

/// Maximum number of times the walk may re-enter markup injected by a
/// component expansion.
///
/// Each time a rendered fragment is walked again, the depth increases by
/// one; ordinary recursion into the input document does not count. A
/// component whose output reintroduces its own tag hits this limit instead
/// of overflowing the stack.
pub const MAX_EXPANSION_DEPTH: usize = 64;

/// Tag of the neutral container that wraps every expansion result.
///
/// The top-level nodes of a rendered fragment are appended to one of these
/// so a single node can take the expanded component's place in its parent.
pub const CONTAINER_TAG: &str = "span";

/// HTML void elements: these never take children and are serialized
/// without a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Check whether a (lowercase) tag name is an HTML void element.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}
