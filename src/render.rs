//! The tree renderer.
//!
//! Rendering walks the reason tree of a [`Node`] recursively and produces a
//! single string. The output only depends on the tree and the [`TreeStyle`]
//! used, so rendering the same tree twice yields the same bytes.
//!
//! Per node, by shape of its reason:
//!
//! - no reason: the message on its own
//! - one reason: the message, then the delimiter and the child's rendering,
//!   with every line of the child shifted by [`TreeStyle::indent`] columns
//! - several reasons: one branch per child. Every child but the last starts
//!   with the splitter and continues its body behind the chainer, the last
//!   one starts with the delimiter and continues behind blanks. When any
//!   sibling has nested reasons of its own, a lone chainer line is inserted
//!   after each non-final child to keep the subtrees visually apart.
//!
//! Context pairs attached to a node are rendered as `key: value` leaves after
//! the declared reasons, and always go through the several-reasons path.
//!
//! ```
//! use causetree::{Cause, TreeStyle, errorf};
//!
//! let error = errorf!(
//!     vec![
//!         Cause::from(errorf!("connection refused", "mirror-1 unavailable")),
//!         Cause::from("mirror-2 unavailable"),
//!     ],
//!     "download failed"
//! );
//!
//! assert_eq!(
//!     TreeStyle::BOX.render(&error),
//!     "download failed\n\
//!      ├─ mirror-1 unavailable\n\
//!      │  └─ connection refused\n\
//!      │\n\
//!      └─ mirror-2 unavailable"
//! );
//! ```
//!
//! # Depth
//!
//! Recursion depth equals tree depth. Reason trees must be acyclic; a cycle
//! built through shared nodes recurses until the stack is exhausted unless
//! [`TreeStyle::max_depth`] is set. With a limit, [`TreeStyle::render`] cuts
//! deeper subtrees off with a marker line and [`TreeStyle::try_render`]
//! reports [`RenderError::TooDeep`]. Foreign values exposing their reasons
//! through [`Hierarchical::nested_reason`] are walked by the same renderer and
//! count towards the same limit; the output of a value that only overrides
//! [`Hierarchical::render_hierarchy`] is opaque and counts as a leaf.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::{
    Cause, Hierarchical, Node, Reason, TreeStyle, context::Context,
    hierarchical::hierarchy_message,
};

/// Line substituted for a subtree cut off by [`TreeStyle::max_depth`].
pub const TRUNCATED_MARKER: &str = "<reason tree too deep>";

/// Error returned by [`TreeStyle::try_render`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The reason tree is nested deeper than [`TreeStyle::max_depth`] allows,
    /// possibly because it is cyclic
    TooDeep {
        /// The configured limit
        limit: usize,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooDeep { limit } => write!(
                f,
                "reason tree nested deeper than {limit} levels, possibly cyclic"
            ),
        }
    }
}

impl core::error::Error for RenderError {}

impl TreeStyle {
    /// Renders a node and everything below it.
    ///
    /// Never fails. With [`max_depth`](Self::max_depth) set, subtrees below
    /// the limit are replaced by [`TRUNCATED_MARKER`].
    pub fn render(&self, node: &Node) -> String {
        Renderer::new(self, Overflow::Truncate)
            .render_node(node)
            .unwrap_or_else(|error| error.to_string())
    }

    /// Renders a node, failing instead of truncating when the tree is deeper
    /// than [`max_depth`](Self::max_depth).
    ///
    /// # Examples
    ///
    /// ```
    /// use causetree::{RenderError, TreeStyle, errorf};
    ///
    /// let error = errorf!(errorf!(errorf!("c", "b"), "a"), "root");
    /// let style = TreeStyle::BOX.with_max_depth(2);
    ///
    /// assert_eq!(style.try_render(&error), Err(RenderError::TooDeep { limit: 2 }));
    /// assert!(TreeStyle::BOX.try_render(&error).is_ok());
    /// ```
    pub fn try_render(&self, node: &Node) -> Result<String, RenderError> {
        Renderer::new(self, Overflow::Fail).render_node(node)
    }

    /// Renders a single cause the way it would appear as a branch.
    pub fn render_cause(&self, cause: &Cause) -> String {
        let mut renderer = Renderer::new(self, Overflow::Truncate);
        cause
            .render_in(&mut renderer)
            .unwrap_or_else(|error| error.to_string())
    }

    /// Renders a message over a reason, without building a [`Node`].
    ///
    /// This is the building block for [`Hierarchical`](crate::Hierarchical)
    /// implementations that keep their own representation.
    pub fn render_parts(&self, message: &str, reason: &Reason) -> String {
        self.render_parts_with_context(message, reason, None)
    }

    pub(crate) fn render_parts_with_context(
        &self,
        message: &str,
        reason: &Reason,
        context: Option<&Context>,
    ) -> String {
        Renderer::new(self, Overflow::Truncate)
            .render_parts(message, reason, context)
            .unwrap_or_else(|error| error.to_string())
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Overflow {
    Truncate,
    Fail,
}

/// One rendered child of a node.
enum Branch<'a> {
    Cause(&'a Cause),
    Pair(&'a str, &'a Cause),
}

impl Branch<'_> {
    fn has_nested(&self, style: &TreeStyle) -> bool {
        match self {
            Self::Cause(cause) => cause.has_nested(style),
            Self::Pair(_, value) => value.has_nested(style),
        }
    }

    fn render(&self, renderer: &mut Renderer<'_>) -> Result<String, RenderError> {
        match self {
            Self::Cause(cause) => cause.render_in(renderer),
            Self::Pair(key, value) => Ok(format!("{key}: {}", value.render_in(renderer)?)),
        }
    }
}

pub(crate) struct Renderer<'a> {
    style: &'a TreeStyle,
    overflow: Overflow,
    depth: usize,
}

impl<'a> Renderer<'a> {
    fn new(style: &'a TreeStyle, overflow: Overflow) -> Self {
        Self {
            style,
            overflow,
            depth: 0,
        }
    }

    pub(crate) fn style(&self) -> &'a TreeStyle {
        self.style
    }

    pub(crate) fn render_node(&mut self, node: &Node) -> Result<String, RenderError> {
        self.render_parts(node.message(), node.reason(), node.context())
    }

    fn render_parts<'n>(
        &mut self,
        message: &str,
        reason: &'n Reason,
        context: Option<&'n Context>,
    ) -> Result<String, RenderError> {
        if let Some(context) = context {
            let branches = reason
                .iter()
                .map(Branch::Cause)
                .chain(context.iter().map(|(key, value)| Branch::Pair(key, value)));
            return self.render_branches(message, branches);
        }

        match reason {
            Reason::None => Ok(message.to_string()),
            Reason::Single(child) => {
                let child = self.nested(|this| child.render_in(this))?;
                Ok(self.join_single(message, &child))
            }
            Reason::Many(children) => self.render_branches(message, children.iter().map(Branch::Cause)),
        }
    }

    pub(crate) fn render_hierarchical(
        &mut self,
        value: &dyn Hierarchical,
    ) -> Result<String, RenderError> {
        match value.nested_reason() {
            Some(reason) => {
                let message = hierarchy_message(value);
                self.render_parts(&message, reason, value.nested_context())
            }
            None => Ok(value.render_hierarchy(self.style)),
        }
    }

    pub(crate) fn render_error_chain(
        &mut self,
        error: &(dyn core::error::Error + 'static),
    ) -> Result<String, RenderError> {
        let message = error.to_string();
        match error.source() {
            Some(source) => {
                let child = self.nested(|this| this.render_error_chain(source))?;
                Ok(self.join_single(&message, &child))
            }
            None => Ok(message),
        }
    }

    fn join_single(&self, message: &str, child: &str) -> String {
        let indentation = " ".repeat(self.style.indent);
        format!(
            "{message}\n{delimiter}{child}",
            delimiter = self.style.delimiter,
            child = child.replace('\n', &format!("\n{indentation}")),
        )
    }

    fn render_branches<'b>(
        &mut self,
        message: &str,
        branches: impl Iterator<Item = Branch<'b>>,
    ) -> Result<String, RenderError> {
        let branches: Vec<Branch<'b>> = branches.collect();
        let prolongate = branches.iter().any(|branch| branch.has_nested(self.style));
        let prolongation = self.style.chainer.trim_end();

        let mut output = String::from(message);
        for (index, branch) in branches.iter().enumerate() {
            let is_last = index + 1 == branches.len();
            let connector = if is_last {
                self.style.delimiter
            } else {
                self.style.splitter
            };
            let indentation = self.style.continuation(is_last);

            let child = self.nested(|this| branch.render(this))?;

            output.push('\n');
            output.push_str(connector);
            output.push_str(&child.replace('\n', &format!("\n{indentation}")));
            if prolongate && !is_last {
                output.push('\n');
                output.push_str(prolongation);
            }
        }
        Ok(output)
    }

    fn nested(
        &mut self,
        render: impl FnOnce(&mut Self) -> Result<String, RenderError>,
    ) -> Result<String, RenderError> {
        if let Some(limit) = self.style.max_depth
            && self.depth >= limit
        {
            return match self.overflow {
                Overflow::Fail => Err(RenderError::TooDeep { limit }),
                Overflow::Truncate => {
                    tracing::warn!(limit, "reason tree exceeds maximum depth, truncating");
                    Ok(TRUNCATED_MARKER.to_string())
                }
            };
        }

        self.depth += 1;
        let result = render(self);
        self.depth -= 1;
        result
    }
}
