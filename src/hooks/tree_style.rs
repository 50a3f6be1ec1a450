//! The process-wide [`TreeStyle`].
//!
//! Explicit styles passed to [`TreeStyle::render`] or
//! [`Node::render_with`](crate::Node::render_with) never consult this
//! setting. It is read by the `Display` implementation of
//! [`Node`](crate::Node), by [`render`](crate::render), by
//! [`fatal`](crate::fatal) and when a non-node parent is flattened by
//! [`push`](crate::push).
//!
//! Until a style is registered, the default is [`TreeStyle::BOX`]. With the
//! `std` feature the `CAUSETREE_STYLE` environment variable can select
//! another starting point:
//!
//! - `CAUSETREE_STYLE=ascii` - [`TreeStyle::ASCII`]
//! - `CAUSETREE_STYLE=box` - [`TreeStyle::BOX`]
//!
//! The variable is read once per process.
//!
//! ```
//! use causetree::{errorf, hooks::tree_style};
//!
//! tree_style::update_tree_style(|style| {
//!     style.delimiter = "* ";
//!     style.indent = 0;
//! });
//! assert_eq!(
//!     errorf!(errorf!("third", "second"), "top level").to_string(),
//!     "top level\n* second\n* third"
//! );
//! tree_style::reset_tree_style();
//! ```

use crate::{TreeStyle, hooks::hook_lock::HookLock};

static STYLE: HookLock<TreeStyle> = HookLock::new();

/// Replaces the process-wide style.
pub fn register_tree_style(style: TreeStyle) {
    tracing::debug!(?style, "registering process-wide tree style");
    *STYLE.write().get() = Some(style);
}

/// Modifies the process-wide style, starting from the current one.
///
/// Useful to change a single glyph without restating the rest. `update` runs
/// on a copy with no lock held, so it may render nodes itself; a style
/// registered concurrently while it runs is overwritten.
pub fn update_tree_style(update: impl FnOnce(&mut TreeStyle)) {
    let mut style = current_tree_style();
    update(&mut style);
    tracing::debug!(?style, "updated process-wide tree style");
    *STYLE.write().get() = Some(style);
}

/// Forgets any registered style, going back to the initial one.
pub fn reset_tree_style() {
    tracing::debug!("resetting process-wide tree style");
    *STYLE.write().get() = None;
}

/// The process-wide style in effect right now.
pub fn current_tree_style() -> TreeStyle {
    STYLE.get_or_init(initial_tree_style)
}

#[cfg(feature = "std")]
fn initial_tree_style() -> TreeStyle {
    use std::sync::OnceLock;

    static FROM_ENV: OnceLock<TreeStyle> = OnceLock::new();

    *FROM_ENV.get_or_init(|| match std::env::var_os("CAUSETREE_STYLE") {
        Some(var) => parse_style_name(&var.to_string_lossy()).unwrap_or_else(|| {
            tracing::warn!(value = %var.to_string_lossy(), "unknown CAUSETREE_STYLE, using default");
            TreeStyle::DEFAULT
        }),
        None => TreeStyle::DEFAULT,
    })
}

#[cfg(not(feature = "std"))]
fn initial_tree_style() -> TreeStyle {
    TreeStyle::DEFAULT
}

#[cfg_attr(not(feature = "std"), allow(dead_code))]
fn parse_style_name(name: &str) -> Option<TreeStyle> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("ascii") {
        Some(TreeStyle::ASCII)
    } else if name.eq_ignore_ascii_case("box") || name.eq_ignore_ascii_case("unicode") {
        Some(TreeStyle::BOX)
    } else {
        None
    }
}
