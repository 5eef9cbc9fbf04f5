//! Weft - Expand custom component tags in HTML-like documents.
//!
//! This crate turns markup like `<Header title="A"></Header>` into the
//! rendered output of a pluggable component source, recursively and
//! bottom-up: nested components are expanded first, so an outer
//! component always receives fully expanded children markup.
//!
//! # Example
//!
//! ```
//! use weft_engine::{Expander, TemplateLoader};
//!
//! let components = TemplateLoader::new().with_template("header", |attrs, _children| {
//!     let title = attrs.get("title").map(String::as_str).unwrap_or_default();
//!     Ok(format!("<h1>{title}</h1>"))
//! });
//! let expander = Expander::new(vec![Box::new(components)]);
//!
//! let html = expander.expand_str(r#"<Header title="A"></Header>"#).unwrap();
//! assert_eq!(html, "<span><h1>A</h1></span>");
//! ```
//!
//! # Architecture
//!
//! - [`markup`]: arena-based document tree, lenient HTML-like parser,
//!   serializer
//! - [`loader`]: the [`Loader`] capability and the bundled loaders
//! - [`expand`]: the [`Expander`] walk that rewrites trees in place
//! - [`config`]: engine constants
//! - [`error`]: error types and Result alias
//! - [`cli`]: command-line interface for the `weft` binary

pub mod cli;
pub mod config;
pub mod error;
pub mod expand;
pub mod loader;
pub mod markup;

// Re-export the main entry points
pub use expand::Expander;

// Re-export commonly used items
pub use error::{EngineError, RenderError, Result};
pub use loader::{ComponentHandle, DebugLoader, Loader, TemplateFn, TemplateLoader};
pub use markup::{AttributeMap, Document, NodeId};
