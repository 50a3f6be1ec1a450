#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Hierarchical errors rendered as indented trees.
//!
//! ## Overview
//!
//! An error is a [`Node`]: a message, the [`Reason`] it was caused by and an
//! optional [`Context`] of key/value pairs. Reasons nest, so a failure deep
//! inside a program keeps every step that led to it, and rendering turns the
//! whole structure into box-drawing text:
//!
//! ```
//! use causetree::{Cause, TreeStyle, errorf, push};
//!
//! let fetch = errorf!(errorf!(None, "exit status 128"), "can't run git fetch 'origin'");
//! let error = push(
//!     errorf!(fetch, "can't pull remote 'origin'"),
//!     [Cause::from("can't pull remote 'upstream'")],
//! );
//!
//! assert_eq!(
//!     TreeStyle::BOX.render(&error),
//!     "can't pull remote 'origin'\n\
//!      ├─ can't run git fetch 'origin'\n\
//!      │  └─ exit status 128\n\
//!      │\n\
//!      └─ can't pull remote 'upstream'"
//! );
//! ```
//!
//! ## Causes
//!
//! Anything that can end up in a tree is a [`Cause`]: plain text, another
//! node, a foreign [`core::error::Error`], any `Display` value, or a foreign
//! value implementing [`Hierarchical`] that renders its own subtree.
//!
//! ## Context
//!
//! Key/value context is collected in an immutable chain and rendered as
//! trailing `key: value` branches, newest first:
//!
//! ```
//! use causetree::{Context, TreeStyle};
//!
//! let error = Context::new("host", "example.com")
//!     .context("operation", "resolv")
//!     .errorf(None, "system error");
//!
//! assert_eq!(
//!     TreeStyle::BOX.render(&error),
//!     "system error\n├─ operation: resolv\n└─ host: example.com"
//! );
//! ```
//!
//! ## Styles
//!
//! Glyphs and indentation are described by a [`TreeStyle`]. Pass one
//! explicitly with [`TreeStyle::render`], or rely on the process-wide style
//! from [`hooks::tree_style`], which is what `Display` and [`render`] use.
//!
//! ## Features
//!
//! - `std` (default): enables [`fatal`], the `CAUSETREE_STYLE` environment
//!   variable and `std` locks for process-wide settings. Without it the crate
//!   is `no_std` + `alloc` and uses spin locks.

#[cfg(any(feature = "std", test))]
extern crate std;

extern crate alloc;

#[macro_use]
mod macros;

mod cause;
pub mod context;
mod hierarchical;
pub mod hooks;
mod node;
mod reason;
pub mod render;
pub mod style;

use alloc::string::String;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub use self::hooks::fatal::fatal;
pub use self::{
    cause::Cause,
    context::Context,
    hierarchical::Hierarchical,
    node::{Causes, Node, contextualize, make_node, push},
    reason::{IntoReason, Reason},
    render::RenderError,
    style::TreeStyle,
};

/// Renders a node with the process-wide style.
///
/// Same as formatting the node with `Display`. Use [`TreeStyle::render`] to
/// pick a style explicitly.
pub fn render(node: &Node) -> String {
    hooks::tree_style::current_tree_style().render(node)
}

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub use alloc::format;
    #[doc(hidden)]
    pub use core::result::Result::Err;
}
