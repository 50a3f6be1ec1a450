use alloc::{string::String, vec::Vec};
use core::slice;

use crate::{Cause, Node};

/// What a node was caused by: nothing, one cause, or an ordered list of
/// sibling causes.
///
/// The insertion order of [`Many`](Reason::Many) is the display order.
#[derive(Clone, Debug, Default)]
pub enum Reason {
    /// No further nesting
    #[default]
    None,

    /// Exactly one nested cause
    Single(Cause),

    /// Zero or more sibling causes
    Many(Vec<Cause>),
}

impl Reason {
    /// Number of causes held by this reason.
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(_) => 1,
            Self::Many(causes) => causes.len(),
        }
    }

    /// Whether this reason holds no causes.
    ///
    /// An empty [`Many`](Reason::Many) list is empty as well.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The causes of this reason as a slice, in display order.
    pub fn as_slice(&self) -> &[Cause] {
        match self {
            Self::None => &[],
            Self::Single(cause) => slice::from_ref(cause),
            Self::Many(causes) => causes,
        }
    }

    /// Iterates over the causes in display order.
    pub fn iter(&self) -> slice::Iter<'_, Cause> {
        self.as_slice().iter()
    }

    /// Appends causes, promoting `None` and `Single` to `Many`.
    #[must_use]
    pub fn extended<I>(self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cause>,
    {
        let mut causes = match self {
            Self::None => Vec::new(),
            Self::Single(cause) => alloc::vec![cause],
            Self::Many(causes) => causes,
        };
        causes.extend(children.into_iter().map(Into::into));
        Self::Many(causes)
    }
}

impl<'a> IntoIterator for &'a Reason {
    type IntoIter = slice::Iter<'a, Cause>;
    type Item = &'a Cause;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Conversion into a [`Reason`].
///
/// Used by [`Node::with_reason`] and the [`errorf!`](crate::errorf) family of
/// macros, so that a single cause, a list of causes or nothing at all can be
/// passed in the same position.
pub trait IntoReason {
    /// Converts `self` into a reason.
    fn into_reason(self) -> Reason;
}

impl IntoReason for Reason {
    fn into_reason(self) -> Reason {
        self
    }
}

impl IntoReason for Cause {
    fn into_reason(self) -> Reason {
        Reason::Single(self)
    }
}

impl IntoReason for Option<Cause> {
    fn into_reason(self) -> Reason {
        self.map_or(Reason::None, Reason::Single)
    }
}

impl IntoReason for Vec<Cause> {
    fn into_reason(self) -> Reason {
        Reason::Many(self)
    }
}

impl IntoReason for Node {
    fn into_reason(self) -> Reason {
        Reason::Single(self.into())
    }
}

impl IntoReason for &'static str {
    fn into_reason(self) -> Reason {
        Reason::Single(self.into())
    }
}

impl IntoReason for String {
    fn into_reason(self) -> Reason {
        Reason::Single(self.into())
    }
}

macro_rules! reason_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Reason {
                fn from(value: $ty) -> Self {
                    value.into_reason()
                }
            }
        )*
    };
}

reason_from!(Cause, Option<Cause>, Vec<Cause>, Node, &'static str, String);
