//! Pluggable component resolution and rendering.
//!
//! A [`Loader`] is a source of components: it can claim a tag name
//! (`resolve`) and later produce replacement markup for it (`render`).
//! Several loaders are held in a priority-ordered list by the
//! [`Expander`](crate::Expander); the first loader to claim a tag wins.

mod debug;
mod template;

pub use debug::DebugLoader;
pub use template::{TemplateFn, TemplateLoader};

use crate::error::RenderError;
use crate::markup::AttributeMap;

/// Opaque token produced by a successful resolution.
///
/// Only the loader that produced a handle can interpret it; the expansion
/// walk just carries it from `resolve` to `render` unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentHandle(String);

impl ComponentHandle {
    /// Wrap a loader-private token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The wrapped token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// A pluggable source of components.
///
/// Tag names arrive already lowercased by the markup parser, but
/// implementations case-fold anyway so direct callers can pass names in
/// any case.
pub trait Loader: Send + Sync {
    /// Claim a tag name, returning a handle for it, or `None` to let the
    /// next loader in the list have a look.
    fn resolve(&self, tag_name: &str) -> Option<ComponentHandle>;

    /// Produce replacement markup for a claimed component.
    ///
    /// `children_markup` is the serialized inner markup of the component
    /// element, with any nested components already expanded.
    ///
    /// # Errors
    /// A render failure aborts the whole expansion call.
    fn render(
        &self,
        tag_name: &str,
        handle: &ComponentHandle,
        attributes: &AttributeMap,
        children_markup: &str,
    ) -> std::result::Result<String, RenderError>;
}
