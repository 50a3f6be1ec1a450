//! Terminating the process with a rendered reason tree.
//!
//! [`fatal`] renders an error with the process-wide style, hands the text to
//! the registered [`FatalHandler`] and exits with status `1`. The default
//! handler writes to stderr. Tests can register a handler that captures the
//! text and unwinds instead of exiting:
//!
//! ```
//! use std::{panic, sync::Mutex};
//!
//! use causetree::{fatalf, hooks::fatal::{self, FatalHandler}};
//!
//! static CAPTURED: Mutex<String> = Mutex::new(String::new());
//!
//! struct Capture;
//!
//! impl FatalHandler for Capture {
//!     fn report(&self, rendered: &str) {
//!         CAPTURED.lock().unwrap().push_str(rendered);
//!     }
//!
//!     fn exit(&self, code: i32) {
//!         panic!("exit({code})");
//!     }
//! }
//!
//! fatal::register_fatal_handler(Capture);
//! let outcome = panic::catch_unwind(|| fatalf!("disk full", "can't write {}", "journal"));
//!
//! assert!(outcome.is_err());
//! assert_eq!(*CAPTURED.lock().unwrap(), "can't write journal\n└─ disk full");
//! fatal::reset_fatal_handler();
//! ```

use alloc::string::String;

use triomphe::Arc;
use unsize::CoerceUnsize;

use crate::{IntoReason, hooks::hook_lock::HookLock, make_node};

/// Exit status used by [`fatal`].
pub const FATAL_EXIT_CODE: i32 = 1;

/// Where [`fatal`] sends its output and how it terminates.
pub trait FatalHandler: Send + Sync + 'static {
    /// Receives the rendered reason tree.
    ///
    /// Defaults to writing it to stderr followed by a newline.
    fn report(&self, rendered: &str) {
        std::eprintln!("{rendered}");
    }

    /// Terminates the process.
    ///
    /// Should not return. If it does, [`fatal`] exits through
    /// [`std::process::exit`] anyway.
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }
}

/// The handler used until another one is registered: stderr, then
/// [`std::process::exit`].
#[derive(Copy, Clone, Debug, Default)]
pub struct StderrHandler;

impl FatalHandler for StderrHandler {}

static HANDLER: HookLock<Arc<dyn FatalHandler>> = HookLock::new();

/// Replaces the process-wide fatal handler.
pub fn register_fatal_handler<H: FatalHandler>(handler: H) {
    tracing::debug!(handler = core::any::type_name::<H>(), "registering fatal handler");
    let handler = Arc::new(handler).unsize(unsize::Coercion!(to dyn FatalHandler));
    *HANDLER.write().get() = Some(handler);
}

/// Goes back to [`StderrHandler`].
pub fn reset_fatal_handler() {
    tracing::debug!("resetting fatal handler");
    *HANDLER.write().get() = None;
}

fn current_fatal_handler() -> Arc<dyn FatalHandler> {
    HANDLER.get_or_init(|| Arc::new(StderrHandler).unsize(unsize::Coercion!(to dyn FatalHandler)))
}

/// Renders `message` over `reason` and terminates the process.
///
/// The tree is rendered with the process-wide
/// [`TreeStyle`](crate::TreeStyle), logged at error level, passed to the
/// registered [`FatalHandler`] and followed by an exit with
/// [`FATAL_EXIT_CODE`]. See [`fatalf!`](crate::fatalf) for the formatting
/// variant.
pub fn fatal(reason: impl IntoReason, message: impl Into<String>) -> ! {
    let node = make_node(reason, message);
    let rendered = super::tree_style::current_tree_style().render(&node);
    tracing::error!(error = %rendered, "terminating on fatal error");

    let handler = current_fatal_handler();
    handler.report(&rendered);
    handler.exit(FATAL_EXIT_CODE);
    std::process::exit(FATAL_EXIT_CODE)
}
