//! The values a node can point to as its cause.
//!
//! A [`Cause`] is anything that can be flattened into the text of a reason
//! tree: plain text, a foreign error, another [`Node`], a foreign value that
//! renders itself through the [`Hierarchical`] capability, or any
//! [`Display`](core::fmt::Display) value.
//!
//! ```
//! use causetree::{Cause, TreeStyle};
//!
//! let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
//! let causes = [
//!     Cause::from("plain text"),
//!     Cause::error(io),
//!     Cause::display(42),
//! ];
//!
//! let rendered: Vec<_> = causes
//!     .iter()
//!     .map(|cause| cause.render(&TreeStyle::BOX))
//!     .collect();
//! assert_eq!(rendered, ["plain text", "config.toml", "42"]);
//! ```

use alloc::{
    borrow::Cow,
    string::{String, ToString},
};
use core::fmt;

use triomphe::Arc;
use unsize::CoerceUnsize;

use crate::{Hierarchical, Node, Reason, TreeStyle, render::Renderer};

/// A single cause in a reason tree.
///
/// Cloning a `Cause` is cheap: every non-text payload is reference counted.
#[derive(Clone)]
pub enum Cause {
    /// Plain text, rendered as-is
    Text(Cow<'static, str>),

    /// A foreign error, rendered through its `Display` implementation
    Error(Arc<dyn core::error::Error + Send + Sync>),

    /// A nested node, rendered recursively
    Node(Arc<Node>),

    /// A foreign value that renders its own hierarchy
    Hierarchical(Arc<dyn Hierarchical>),

    /// Any other displayable value
    Display(Arc<dyn fmt::Display + Send + Sync>),
}

impl Cause {
    /// Creates a cause from plain text.
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Text(text.into())
    }

    /// Wraps a foreign error.
    ///
    /// The error is rendered through its [`Display`](core::fmt::Display)
    /// implementation. With [`TreeStyle::follow_source`] enabled, its
    /// [`source`](core::error::Error::source) chain is rendered as nested
    /// reasons.
    pub fn error<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::Error(Arc::new(error).unsize(unsize::Coercion!(to dyn core::error::Error + Send + Sync)))
    }

    /// Wraps a foreign value that renders its own hierarchy.
    pub fn hierarchical<H: Hierarchical>(value: H) -> Self {
        Self::Hierarchical(Arc::new(value).unsize(unsize::Coercion!(to dyn Hierarchical)))
    }

    /// Wraps any displayable value, rendered through its `Display`
    /// implementation at render time.
    pub fn display<D>(value: D) -> Self
    where
        D: fmt::Display + Send + Sync + 'static,
    {
        Self::Display(Arc::new(value).unsize(unsize::Coercion!(to dyn fmt::Display + Send + Sync)))
    }

    /// Returns the nested node, if this cause is one.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The first line of this cause: its own message, without any nested
    /// reasons.
    ///
    /// Foreign [`Hierarchical`] values report their
    /// [`top_message`](Hierarchical::top_message) when they expose one.
    pub fn top_message(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Error(error) => Cow::Owned(error.to_string()),
            Self::Node(node) => Cow::Borrowed(node.message()),
            Self::Hierarchical(value) => value
                .top_message()
                .unwrap_or_else(|| Cow::Owned(value.to_string())),
            Self::Display(value) => Cow::Owned(value.to_string()),
        }
    }

    /// The reasons nested under this cause, if it exposes any.
    ///
    /// Context pairs of a node are not part of its declared reason and are not
    /// returned here.
    pub fn descend(&self) -> Option<&Reason> {
        match self {
            Self::Node(node) => Some(node.reason()),
            Self::Hierarchical(value) => value.nested_reason(),
            Self::Text(_) | Self::Error(_) | Self::Display(_) => None,
        }
    }

    /// Renders this cause with the given style.
    ///
    /// Values implementing [`Hierarchical`] render themselves, nodes are
    /// rendered recursively, everything else falls back to its `Display`
    /// implementation.
    pub fn render(&self, style: &TreeStyle) -> String {
        style.render_cause(self)
    }

    /// Whether rendering this cause produces nested branches of its own.
    pub(crate) fn has_nested(&self, style: &TreeStyle) -> bool {
        match self {
            Self::Node(node) => node.has_branches(),
            Self::Hierarchical(value) => value
                .nested_reason()
                .is_some_and(|reason| !reason.is_empty() || value.nested_context().is_some()),
            Self::Error(error) => style.follow_source && error.source().is_some(),
            Self::Text(_) | Self::Display(_) => false,
        }
    }

    pub(crate) fn render_in(&self, renderer: &mut Renderer<'_>) -> Result<String, crate::RenderError> {
        match self {
            Self::Text(text) => Ok(text.to_string()),
            Self::Node(node) => renderer.render_node(node),
            Self::Hierarchical(value) => renderer.render_hierarchical(&**value),
            Self::Error(error) if renderer.style().follow_source => {
                renderer.render_error_chain(&**error)
            }
            Self::Error(error) => Ok(error.to_string()),
            Self::Display(value) => Ok(value.to_string()),
        }
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Error(error) => f.debug_tuple("Error").field(error).finish(),
            Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Self::Hierarchical(value) => f
                .debug_tuple("Hierarchical")
                .field(&format_args!("{value}"))
                .finish(),
            Self::Display(value) => f
                .debug_tuple("Display")
                .field(&format_args!("{value}"))
                .finish(),
        }
    }
}

impl From<&'static str> for Cause {
    fn from(text: &'static str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Cause {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl From<Node> for Cause {
    fn from(node: Node) -> Self {
        Self::Node(Arc::new(node))
    }
}

impl From<Arc<Node>> for Cause {
    fn from(node: Arc<Node>) -> Self {
        Self::Node(node)
    }
}
