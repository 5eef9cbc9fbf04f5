//! Error types for the engine.
//!
//! `EngineError` is the single error type surfaced to library consumers;
//! `RenderError` is what component render functions produce, and is carried
//! as the source of `EngineError::Render`.

use thiserror::Error;

/// Error produced by a component's render operation.
///
/// Loaders construct this for anything that goes wrong while producing
/// replacement markup: a missing required attribute, a template that cannot
/// be evaluated, an internal lookup failure.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RenderError {
    message: String,
}

impl RenderError {
    /// Create a render error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Main error type for the engine library.
#[derive(Debug, Error)]
pub enum EngineError {
    /// End of input reached inside a tag before its closing `>`.
    #[error("unclosed tag <{tag}: reached end of input inside the tag")]
    UnclosedTag { tag: String },

    /// End of input reached inside a quoted attribute value.
    #[error("unterminated value for attribute '{attribute}' on <{tag}>")]
    UnterminatedAttribute { tag: String, attribute: String },

    /// A component's render operation failed. Fatal for the whole call:
    /// no partial output is produced.
    #[error("render failed for component <{component}>: {source}")]
    Render {
        component: String,
        #[source]
        source: RenderError,
    },

    /// The expansion walk exceeded the configured depth limit, which
    /// happens when a component's output keeps reintroducing a
    /// resolvable tag.
    #[error("expansion depth limit of {limit} exceeded; a component may be rendering its own tag")]
    DepthExceeded { limit: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        let err = RenderError::new("missing attribute 'title'");
        assert_eq!(err.to_string(), "missing attribute 'title'");
    }

    #[test]
    fn test_render_variant_includes_component() {
        let err = EngineError::Render {
            component: "header".to_string(),
            source: RenderError::new("boom"),
        };
        assert!(err.to_string().contains("<header>"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_depth_exceeded_display() {
        let err = EngineError::DepthExceeded { limit: 64 };
        assert!(err.to_string().contains("64"));
    }

    #[test]
    fn test_unclosed_tag_display() {
        let err = EngineError::UnclosedTag {
            tag: "div".to_string(),
        };
        assert!(err.to_string().contains("<div"));
    }
}
