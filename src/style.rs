//! Glyphs and indentation used to draw reason trees.
//!
//! A [`TreeStyle`] is a plain value: it can be passed explicitly to
//! [`TreeStyle::render`], or registered process-wide through
//! [`hooks::tree_style`] where [`Display`] for [`Node`] picks it up at render
//! time.
//!
//! Two predefined styles are provided:
//! - **Box drawing** ([`TreeStyle::BOX`], the default)
//! - **ASCII-only** ([`TreeStyle::ASCII`]) for terminals and log sinks
//!   without Unicode support
//!
//! ```
//! use causetree::{TreeStyle, errorf};
//!
//! let error = errorf!(errorf!("exit status 128", "can't run git fetch"), "can't pull");
//!
//! assert_eq!(
//!     TreeStyle::BOX.render(&error),
//!     "can't pull\n└─ can't run git fetch\n   └─ exit status 128"
//! );
//! assert_eq!(
//!     TreeStyle::ASCII.render(&error),
//!     "can't pull\n\\_ can't run git fetch\n   \\_ exit status 128"
//! );
//! ```
//!
//! [`hooks::tree_style`]: crate::hooks::tree_style
//! [`Display`]: core::fmt::Display
//! [`Node`]: crate::Node

use alloc::string::String;

/// ASCII delimiter placed before a single child or the last of many.
pub const DELIMITER_ASCII: &str = r"\_ ";

/// Box-drawing delimiter placed before a single child or the last of many.
pub const DELIMITER_BOX: &str = "└─ ";

/// ASCII chainer continuing a non-final sibling's body.
pub const CHAINER_ASCII: &str = "| ";

/// Box-drawing chainer continuing a non-final sibling's body.
pub const CHAINER_BOX: &str = "│ ";

/// ASCII splitter placed before every non-final sibling.
pub const SPLITTER_ASCII: &str = "+ ";

/// Box-drawing splitter placed before every non-final sibling.
pub const SPLITTER_BOX: &str = "├─ ";

/// Default number of columns a nested reason is indented by.
pub const DEFAULT_INDENT: usize = 3;

/// Glyphs, indentation and limits used when rendering a reason tree.
///
/// All fields are public so a style can be built with struct update syntax
/// from one of the predefined constants:
///
/// ```
/// use causetree::{TreeStyle, errorf};
///
/// let flat = TreeStyle {
///     delimiter: "* ",
///     indent: 0,
///     ..TreeStyle::BOX
/// };
///
/// let error = errorf!(errorf!("third", "second"), "top level");
/// assert_eq!(flat.render(&error), "top level\n* second\n* third");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TreeStyle {
    /// Connector before a single child, or before the last of several
    pub delimiter: &'static str,

    /// Connector before every child except the last of several
    pub splitter: &'static str,

    /// Continuation drawn in front of the body lines of a non-final sibling
    pub chainer: &'static str,

    /// Number of columns nested lines are shifted by
    pub indent: usize,

    /// Whether foreign errors are expanded through their
    /// [`source`](core::error::Error::source) chain
    pub follow_source: bool,

    /// Maximum nesting depth before a subtree is cut off. `None` means
    /// unlimited.
    pub max_depth: Option<usize>,
}

impl TreeStyle {
    /// ASCII-only glyphs: `\_ `, `+ ` and `| `.
    pub const ASCII: Self = Self {
        delimiter: DELIMITER_ASCII,
        splitter: SPLITTER_ASCII,
        chainer: CHAINER_ASCII,
        indent: DEFAULT_INDENT,
        follow_source: false,
        max_depth: None,
    };
    /// Unicode box-drawing glyphs: `└─ `, `├─ ` and `│ `.
    pub const BOX: Self = Self {
        delimiter: DELIMITER_BOX,
        splitter: SPLITTER_BOX,
        chainer: CHAINER_BOX,
        indent: DEFAULT_INDENT,
        follow_source: false,
        max_depth: None,
    };
    /// The default style, an alias for [`BOX`](Self::BOX).
    pub const DEFAULT: Self = Self::BOX;

    /// Returns a copy of this style with a depth limit.
    ///
    /// Subtrees nested deeper than `max_depth` are replaced by a marker line
    /// by [`render`](Self::render), and rejected by
    /// [`try_render`](Self::try_render).
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Returns a copy of this style that expands foreign errors through their
    /// source chain.
    #[must_use]
    pub const fn following_sources(mut self) -> Self {
        self.follow_source = true;
        self
    }

    /// The continuation prefix for the body of a child.
    ///
    /// Non-final children continue with the chainer, the final child with
    /// blanks of the same width. Either is right-padded up to
    /// [`indent`](Self::indent) columns, but never truncated.
    pub(crate) fn continuation(&self, is_last: bool) -> String {
        let chainer_width = self.chainer.chars().count();
        let mut indentation = if is_last {
            " ".repeat(chainer_width)
        } else {
            String::from(self.chainer)
        };
        if self.indent >= chainer_width {
            indentation.push_str(&" ".repeat(self.indent - chainer_width));
        }
        indentation
    }
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}
