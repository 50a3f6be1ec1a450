//! Process-wide settings.
//!
//! Most code should pass a [`TreeStyle`](crate::TreeStyle) explicitly and
//! never touch these. They exist for the places where no style can be passed:
//! the `Display` implementation of [`Node`](crate::Node) and the process exit
//! in [`fatal`](crate::fatal).
//!
//! - **[`tree_style`]**: the glyphs and indentation used when no style is
//!   given, optionally seeded from the `CAUSETREE_STYLE` environment variable
//! - **[`fatal`]**: where fatal errors are written and how the process exits
//!   (requires the `std` feature)
//!
//! Every setting can be replaced at any time and reset to its default, which
//! is what tests replacing them should do before finishing.

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod fatal;
pub(crate) mod hook_lock;
pub mod tree_style;

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    static GLOBAL_STATE: Mutex<()> = Mutex::new(());

    /// Serializes tests that replace process-wide settings.
    pub(crate) fn lock_global_state() -> MutexGuard<'static, ()> {
        GLOBAL_STATE.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
