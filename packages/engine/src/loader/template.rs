//! Loader backed by in-process template functions.

use std::collections::HashMap;
use std::fmt;

use crate::error::RenderError;
use crate::markup::AttributeMap;

use super::{ComponentHandle, Loader};

/// A template render function: attributes and inner markup in, markup out.
pub type TemplateFn = Box<
    dyn Fn(&AttributeMap, &str) -> std::result::Result<String, RenderError> + Send + Sync,
>;

/// Loader that maps component names to template functions.
///
/// Names are case-folded to lowercase at registration, so `Header`,
/// `header` and `HEADER` all address the same template.
#[derive(Default)]
pub struct TemplateLoader {
    templates: HashMap<String, TemplateFn>,
}

impl TemplateLoader {
    /// Create an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under a component name, builder-style.
    #[must_use]
    pub fn with_template<F>(mut self, name: impl Into<String>, template: F) -> Self
    where
        F: Fn(&AttributeMap, &str) -> std::result::Result<String, RenderError>
            + Send
            + Sync
            + 'static,
    {
        self.templates
            .insert(name.into().to_ascii_lowercase(), Box::new(template));
        self
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no templates are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl fmt::Debug for TemplateLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TemplateLoader")
            .field("templates", &names)
            .finish()
    }
}

impl Loader for TemplateLoader {
    fn resolve(&self, tag_name: &str) -> Option<ComponentHandle> {
        let key = tag_name.to_ascii_lowercase();
        self.templates
            .contains_key(&key)
            .then(|| ComponentHandle::new(key))
    }

    fn render(
        &self,
        _tag_name: &str,
        handle: &ComponentHandle,
        attributes: &AttributeMap,
        children_markup: &str,
    ) -> std::result::Result<String, RenderError> {
        let template = self.templates.get(handle.token()).ok_or_else(|| {
            RenderError::new(format!(
                "no template registered for '{}'",
                handle.token()
            ))
        })?;
        template(attributes, children_markup)
    }
}
