//! The capability that lets foreign values take part in a reason tree.
//!
//! The renderer never needs to know the concrete type of a cause. A
//! third-party error opts into hierarchical rendering by implementing
//! [`Hierarchical`] and wrapping itself with [`Cause::hierarchical`]; values
//! that do not implement it fall back to their `Display` or error output.
//!
//! [`Cause::hierarchical`]: crate::Cause::hierarchical

use alloc::{
    borrow::Cow,
    string::{String, ToString},
};
use core::fmt;

use crate::{Context, Reason, TreeStyle};

/// A value that can render itself as a reason tree.
///
/// Every method has a default. Implementors that only expose their nested
/// reasons through [`nested_reason`](Hierarchical::nested_reason) get a
/// rendering that is indistinguishable from a [`Node`] with the same message
/// and reason.
///
/// # Examples
///
/// ```
/// use causetree::{Cause, Hierarchical, Reason, TreeStyle, errorf};
///
/// struct RetryExhausted {
///     attempts: Reason,
/// }
///
/// impl std::fmt::Display for RetryExhausted {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "gave up after {} attempts", self.attempts.len())
///     }
/// }
///
/// impl Hierarchical for RetryExhausted {
///     fn nested_reason(&self) -> Option<&Reason> {
///         Some(&self.attempts)
///     }
/// }
///
/// let exhausted = RetryExhausted {
///     attempts: Reason::from(vec![Cause::from("timeout"), Cause::from("refused")]),
/// };
/// let error = errorf!(Cause::hierarchical(exhausted), "sync failed");
///
/// assert_eq!(
///     TreeStyle::BOX.render(&error),
///     "sync failed\n└─ gave up after 2 attempts\n   ├─ timeout\n   └─ refused"
/// );
/// ```
///
/// [`Node`]: crate::Node
pub trait Hierarchical: fmt::Display + Send + Sync + 'static {
    /// The first line of this value, without nested reasons.
    ///
    /// Defaults to `None`, in which case the `Display` output is used.
    fn top_message(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// The reasons nested under this value.
    ///
    /// A value exposing its reasons here is drawn by the tree renderer itself,
    /// so depth limits and [`TreeStyle::try_render`] failures reach through
    /// it.
    fn nested_reason(&self) -> Option<&Reason> {
        None
    }

    /// Key/value context rendered after the nested reasons.
    ///
    /// Only consulted when [`nested_reason`](Hierarchical::nested_reason)
    /// returns `Some`.
    fn nested_context(&self) -> Option<&Context> {
        None
    }

    /// Renders this value and everything below it.
    ///
    /// Inside a tree this is only called for values without a
    /// [`nested_reason`](Hierarchical::nested_reason); their output is taken
    /// as-is and reindented. The default composes
    /// [`top_message`](Hierarchical::top_message) (or the `Display` output)
    /// with the nested reasons and context using the same algorithm as for
    /// nodes.
    fn render_hierarchy(&self, style: &TreeStyle) -> String {
        let message = hierarchy_message(self);
        match self.nested_reason() {
            Some(reason) => style.render_parts_with_context(&message, reason, self.nested_context()),
            None => message.into_owned(),
        }
    }
}

/// The first line of a hierarchical value: its top message, or its `Display`
/// output.
pub(crate) fn hierarchy_message<H: Hierarchical + ?Sized>(value: &H) -> Cow<'_, str> {
    match value.top_message() {
        Some(message) => message,
        None => Cow::Owned(value.to_string()),
    }
}
