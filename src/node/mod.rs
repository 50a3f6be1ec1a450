//! Hierarchical error nodes and the operations that build forests of them.

mod iter;

use alloc::{borrow::Cow, format, string::String};
use core::fmt;

pub use self::iter::Causes;
use crate::{Cause, Context, Hierarchical, IntoReason, Reason, TreeStyle, hooks};

/// A hierarchical error: a message, the reason it was caused by, and an
/// optional chain of key/value context.
///
/// Nodes are immutable once built. Operations that add causes, like
/// [`push`](Node::push) or [`contextualize`](Node::contextualize), return a new
/// node and leave the receiver untouched; cloning is cheap since causes are
/// reference counted.
///
/// [`Display`](fmt::Display) renders the whole tree with the process-wide
/// [`TreeStyle`], read at the time of formatting. Use
/// [`render_with`](Node::render_with) to pass a style explicitly.
///
/// # Examples
///
/// ```
/// use causetree::{Node, TreeStyle};
///
/// let error = Node::new("can't pull remote 'origin'").with_reason(
///     Node::new("can't run git fetch 'origin'").with_reason("exit status 128"),
/// );
///
/// assert_eq!(
///     error.render_with(&TreeStyle::BOX),
///     "can't pull remote 'origin'\n└─ can't run git fetch 'origin'\n   └─ exit status 128"
/// );
/// ```
#[derive(Clone, Default)]
pub struct Node {
    message: String,
    reason: Reason,
    context: Option<Context>,
}

impl Node {
    /// Creates a leaf node with the given message and no reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            reason: Reason::None,
            context: None,
        }
    }

    /// Replaces the reason of this node.
    #[must_use]
    pub fn with_reason(mut self, reason: impl IntoReason) -> Self {
        self.reason = reason.into_reason();
        self
    }

    /// Attaches a context chain, replacing any previous one.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// The node's own text, possibly empty.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The declared reason of this node.
    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    /// The context chain attached to this node, if any.
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Iterates over every cause below this node, depth first.
    ///
    /// Context pairs are not visited; use
    /// [`walk_context`](Node::walk_context) for those.
    pub fn causes(&self) -> Causes<'_> {
        Causes::new(self.reason.as_slice())
    }

    /// Returns a new node with `children` appended to this node's reasons.
    ///
    /// A `None` or `Single` reason is promoted to a list. The receiver is not
    /// modified.
    ///
    /// ```
    /// use causetree::{Node, TreeStyle};
    ///
    /// let first = Node::new("sync failed").with_reason("mirror-1 timed out");
    /// let second = first.push(["mirror-2 refused"]);
    ///
    /// assert_eq!(first.reason().len(), 1);
    /// assert_eq!(
    ///     second.render_with(&TreeStyle::BOX),
    ///     "sync failed\n├─ mirror-1 timed out\n└─ mirror-2 refused"
    /// );
    /// ```
    #[must_use]
    pub fn push<I>(&self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cause>,
    {
        Self {
            message: self.message.clone(),
            reason: self.reason.clone().extended(children),
            context: self.context.clone(),
        }
    }

    /// Returns a new node with a `key: value` leaf appended to its reasons.
    #[must_use]
    pub fn contextualize(&self, key: &str, value: impl fmt::Display) -> Self {
        self.push([format!("{key}: {value}")])
    }

    /// Calls `visitor` once per context pair, newest first.
    ///
    /// Does nothing when no context is attached.
    pub fn walk_context(&self, visitor: impl FnMut(&str, &Cause)) {
        if let Some(context) = &self.context {
            context.walk(visitor);
        }
    }

    /// Renders this node with an explicit style.
    pub fn render_with(&self, style: &TreeStyle) -> String {
        style.render(self)
    }

    /// Whether this node renders any branches: declared reasons or context
    /// pairs.
    pub(crate) fn has_branches(&self) -> bool {
        !self.reason.is_empty() || self.context.is_some()
    }

    pub(crate) fn context_mut(&mut self) -> &mut Option<Context> {
        &mut self.context
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hooks::tree_style::current_tree_style().render(self))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Node");
        debug
            .field("message", &self.message)
            .field("reason", &self.reason);
        if let Some(context) = &self.context {
            debug.field("context", context);
        }
        debug.finish()
    }
}

impl core::error::Error for Node {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.reason {
            Reason::Single(Cause::Error(error)) => Some(&**error),
            Reason::Single(Cause::Node(node)) => Some(&**node),
            _ => None,
        }
    }
}

impl Hierarchical for Node {
    fn top_message(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.message))
    }

    fn nested_reason(&self) -> Option<&Reason> {
        Some(&self.reason)
    }

    fn nested_context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    fn render_hierarchy(&self, style: &TreeStyle) -> String {
        style.render(self)
    }
}

/// Creates a node from a reason and an already formatted message.
///
/// This is the function form of [`errorf!`](crate::errorf), for callers that
/// build the message themselves.
pub fn make_node(reason: impl IntoReason, message: impl Into<String>) -> Node {
    Node::new(message).with_reason(reason)
}

/// Appends `children` to the reasons of `parent`.
///
/// A parent that is not a node becomes a leaf node whose message is its
/// rendered text; a node parent keeps its message and context. Always returns
/// a new node.
///
/// ```
/// use causetree::{Cause, TreeStyle, errorf, push};
///
/// let error = push("batch failed", ["row 3 invalid", "row 9 invalid"]);
/// let error = push(error, [Cause::from(errorf!("disk full", "flush failed"))]);
///
/// assert_eq!(
///     TreeStyle::BOX.render(&error),
///     "batch failed\n├─ row 3 invalid\n│\n├─ row 9 invalid\n│\n└─ flush failed\n   └─ disk full"
/// );
/// ```
pub fn push<P, I>(parent: P, children: I) -> Node
where
    P: Into<Cause>,
    I: IntoIterator,
    I::Item: Into<Cause>,
{
    let parent = match parent.into() {
        Cause::Node(node) => (*node).clone(),
        other => Node::new(other.render(&hooks::tree_style::current_tree_style())),
    };
    let reason = parent.reason.extended(children);
    Node { reason, ..parent }
}

/// Appends a single `key: value` leaf to the reasons of `node`.
pub fn contextualize(node: impl Into<Cause>, key: &str, value: impl fmt::Display) -> Node {
    push(node, [format!("{key}: {value}")])
}
