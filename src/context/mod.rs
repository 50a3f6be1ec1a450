//! Key/value context attached to errors.
//!
//! A [`Context`] is an immutable chain of `key: value` pairs. Extending a
//! chain with [`Context::context`] returns a new head that shares every older
//! link with the receiver, so a chain that was already handed to a node never
//! changes afterwards.
//!
//! ```
//! use causetree::{Context, TreeStyle};
//!
//! let base = Context::new("host", "example.com");
//! let lookup = base.context("operation", "resolv");
//!
//! assert_eq!(base.len(), 1);
//! assert_eq!(
//!     TreeStyle::BOX.render(&lookup.errorf(None, "system error")),
//!     "system error\n├─ operation: resolv\n└─ host: example.com"
//! );
//! ```

mod iter;

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use triomphe::Arc;

pub use self::iter::ContextIter;
use crate::{Cause, IntoReason, Node, hooks};

/// An immutable, structurally shared chain of key/value pairs.
///
/// Pairs are walked newest first. Cloning only bumps a reference count.
#[derive(Clone)]
pub struct Context {
    head: Arc<ContextLink>,
}

pub(crate) struct ContextLink {
    key: String,
    value: Cause,
    len: usize,
    previous: Option<Arc<ContextLink>>,
}

impl Context {
    /// Starts a chain with a single pair.
    ///
    /// The value is rendered through its `Display` implementation.
    pub fn new<V>(key: impl Into<String>, value: V) -> Self
    where
        V: fmt::Display + Send + Sync + 'static,
    {
        Self::new_cause(key, Cause::display(value))
    }

    /// Starts a chain with a single pair whose value is an explicit cause.
    ///
    /// Use this for values that should render as a nested tree, like another
    /// [`Node`].
    pub fn new_cause(key: impl Into<String>, value: impl Into<Cause>) -> Self {
        Self::link(key.into(), value.into(), None)
    }

    /// Returns a chain whose newest pair is `key: value` and whose older pairs
    /// are those of `self`.
    ///
    /// The receiver is not modified.
    #[must_use]
    pub fn context<V>(&self, key: impl Into<String>, value: V) -> Self
    where
        V: fmt::Display + Send + Sync + 'static,
    {
        self.context_cause(key, Cause::display(value))
    }

    /// Like [`context`](Context::context), with an explicit cause as value.
    #[must_use]
    pub fn context_cause(&self, key: impl Into<String>, value: impl Into<Cause>) -> Self {
        Self::link(key.into(), value.into(), Some(self.head.clone()))
    }

    fn link(key: String, value: Cause, previous: Option<Arc<ContextLink>>) -> Self {
        let len = previous.as_ref().map_or(0, |link| link.len) + 1;
        Self {
            head: Arc::new(ContextLink {
                key,
                value,
                len,
                previous,
            }),
        }
    }

    /// Number of pairs in the chain. Never zero.
    pub fn len(&self) -> usize {
        self.head.len
    }

    /// Always `false`: a chain holds at least one pair.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the pairs, newest first.
    pub fn iter(&self) -> ContextIter<'_> {
        ContextIter::new(&self.head)
    }

    /// Calls `visitor` once per pair, newest first.
    pub fn walk(&self, mut visitor: impl FnMut(&str, &Cause)) {
        for (key, value) in self {
            visitor(key, value);
        }
    }

    /// The newest value recorded under `key`.
    pub fn get(&self, key: &str) -> Option<&Cause> {
        self.iter()
            .find_map(|(candidate, value)| (candidate == key).then_some(value))
    }

    /// The pairs as a list of tuples, newest first.
    pub fn pairs(&self) -> Vec<(&str, &Cause)> {
        self.iter().collect()
    }

    /// Flattens the chain into an alternating `key, value, key, value, ..`
    /// list, newest first.
    ///
    /// Values are rendered with the process-wide
    /// [`TreeStyle`](crate::TreeStyle). The list always has an even length,
    /// which makes it suitable for key/value logging interfaces.
    pub fn to_key_value_pairs(&self) -> Vec<String> {
        let style = hooks::tree_style::current_tree_style();
        let mut flat = Vec::with_capacity(self.len() * 2);
        for (key, value) in self {
            flat.push(key.to_string());
            flat.push(value.render(&style));
        }
        flat
    }

    /// Creates a node carrying this chain.
    ///
    /// ```
    /// use causetree::{Context, TreeStyle};
    ///
    /// let error = Context::new("path", "/etc/app.toml").errorf("not found", "can't load config");
    /// assert_eq!(
    ///     TreeStyle::BOX.render(&error),
    ///     "can't load config\n├─ not found\n└─ path: /etc/app.toml"
    /// );
    /// ```
    pub fn errorf(&self, reason: impl IntoReason, message: impl Into<String>) -> Node {
        Node::new(message)
            .with_reason(reason)
            .with_context(self.clone())
    }

    /// Attaches this chain to an existing error.
    ///
    /// A node keeps its message and reason; the pairs of `self` are layered
    /// on top of its own chain, so they render before the node's older pairs.
    /// Anything else is wrapped as the single reason of a new node with an
    /// empty message.
    ///
    /// ```
    /// use causetree::{Cause, Context, TreeStyle, errorf};
    ///
    /// let inner = Context::new("attempt", 2).errorf(None, "timeout");
    /// let error = Context::new("host", "db-1").reason(inner);
    /// assert_eq!(
    ///     TreeStyle::BOX.render(&error),
    ///     "timeout\n├─ host: db-1\n└─ attempt: 2"
    /// );
    ///
    /// let wrapped = Context::new("host", "db-1").reason("refused");
    /// assert_eq!(TreeStyle::BOX.render(&wrapped), "\n├─ refused\n└─ host: db-1");
    /// ```
    pub fn reason(&self, existing: impl Into<Cause>) -> Node {
        match existing.into() {
            Cause::Node(node) => {
                let mut node = (*node).clone();
                let merged = match node.context_mut().take() {
                    Some(base) => self.layered_over(base),
                    None => self.clone(),
                };
                node.with_context(merged)
            }
            other => self.errorf(other, String::new()),
        }
    }

    fn layered_over(&self, base: Context) -> Context {
        let mut oldest_first = self.pairs();
        oldest_first.reverse();
        oldest_first
            .into_iter()
            .fold(base, |chain, (key, value)| chain.context_cause(key, value.clone()))
    }
}

impl<'a> IntoIterator for &'a Context {
    type IntoIter = ContextIter<'a>;
    type Item = (&'a str, &'a Cause);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
