use core::iter::FusedIterator;

use super::ContextLink;
use crate::Cause;

/// An iterator over the pairs of a [`Context`](super::Context), newest first.
#[derive(Clone)]
#[must_use]
pub struct ContextIter<'a> {
    next: Option<&'a ContextLink>,
}

impl<'a> ContextIter<'a> {
    pub(super) fn new(head: &'a ContextLink) -> Self {
        Self { next: Some(head) }
    }
}

impl<'a> Iterator for ContextIter<'a> {
    type Item = (&'a str, &'a Cause);

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.next?;
        self.next = link.previous.as_deref();
        Some((&link.key, &link.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.next.map_or(0, |link| link.len);
        (len, Some(len))
    }
}

impl ExactSizeIterator for ContextIter<'_> {}

impl FusedIterator for ContextIter<'_> {}
