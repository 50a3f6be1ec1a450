use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::Cause;

/// An iterator over the causes below a node, in depth-first order.
///
/// Every declared cause is visited before its own nested causes, and the
/// nested causes before the next sibling. Descent goes through nodes and
/// through foreign values exposing
/// [`nested_reason`](crate::Hierarchical::nested_reason); context pairs are
/// not visited.
#[must_use]
pub struct Causes<'a> {
    stack: Vec<&'a Cause>,
}

impl<'a> Causes<'a> {
    pub(crate) fn new(roots: &'a [Cause]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Causes<'a> {
    type Item = &'a Cause;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Some(reason) = current.descend() {
            self.stack.extend(reason.iter().rev());
        }
        Some(current)
    }
}

impl FusedIterator for Causes<'_> {}

#[cfg(test)]
mod tests {
    use alloc::{borrow::Cow, vec::Vec};

    use crate::{Cause, errorf, push};

    #[test]
    fn test_depth_first_order() {
        let tree = push(
            "root",
            [
                Cause::from(errorf!(errorf!("a.1.1", "a.1"), "a")),
                Cause::from(push("b", ["b.1", "b.2"])),
                Cause::from("c"),
            ],
        );

        let visited: Vec<Cow<'_, str>> = tree.causes().map(Cause::top_message).collect();
        assert_eq!(visited, ["a", "a.1", "a.1.1", "b", "b.1", "b.2", "c"]);
    }

    #[test]
    fn test_leaf_has_no_causes() {
        assert_eq!(errorf!(None, "leaf").causes().count(), 0);
        let root = errorf!("only", "root");
        let mut causes = root.causes();
        assert!(causes.next().is_some());
        assert!(causes.next().is_none());
        assert!(causes.next().is_none());
    }
}
