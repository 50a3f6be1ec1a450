//! Integration tests for causetree, exercising the public surface only.
//!
//! ## Rendering properties
//! - `test_leaf_renders_message_verbatim`: a node without reason renders as
//!   its message, empty or not
//! - `test_single_reindents_by_indent`: one delimiter on the second line, and
//!   every nested line shifted by exactly `indent` columns
//! - `test_many_connector_counts`: `n - 1` splitters followed by one
//!   delimiter at the top level
//! - `test_prolongation_is_list_wide`: a nested last sibling still separates
//!   the earlier ones
//! - `test_idempotent_rendering`: rendering twice yields the same bytes
//!
//! ## Process-wide settings (serialized on `GLOBAL_STATE`)
//! - `test_global_style_changes_presentation`
//! - `test_display_reads_style_at_render_time`
//! - `test_context_ordering_through_display`
//! - `test_fatal_with_injected_handler`
//!
//! ## Composition
//! - `test_foreign_capability_round_trip`
//! - `test_context_reason_merge`
//! - `test_depth_guard_on_deep_chain`
//! - `test_causes_and_sources`

use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use causetree::{
    Cause, Context, Hierarchical, Node, Reason, RenderError, TreeStyle, errorf,
    hooks::{
        fatal::{self, FatalHandler},
        tree_style,
    },
    push, render,
};

static GLOBAL_STATE: Mutex<()> = Mutex::new(());

fn lock_global_state() -> MutexGuard<'static, ()> {
    GLOBAL_STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

fn deploy_failure() -> Node {
    let build = push(
        "build failed",
        [
            Cause::from("missing dependency 'libfoo'"),
            Cause::from(errorf!("out of disk space", "can't write artifact")),
        ],
    );
    push(
        "deploy failed",
        [Cause::from(build), Cause::from("rollback skipped")],
    )
}

#[test]
fn test_leaf_renders_message_verbatim() {
    for message in ["", "simple", "with\nnewline", "trailing space "] {
        assert_eq!(TreeStyle::BOX.render(&Node::new(message)), message);
        assert_eq!(TreeStyle::ASCII.render(&Node::new(message)), message);
    }
}

#[test]
fn test_single_reindents_by_indent() {
    let child = deploy_failure();
    let child_text = TreeStyle::BOX.render(&child);
    let parent = errorf!(child, "release aborted");
    let rendered = TreeStyle::BOX.render(&parent);

    let mut lines = rendered.lines();
    assert_eq!(lines.next(), Some("release aborted"));
    let second = lines.next().unwrap();
    assert!(second.starts_with("└─ "));
    assert_eq!(rendered.matches("\n└─ ").count(), 1);

    let child_lines: Vec<&str> = child_text.lines().collect();
    for (line, original) in rendered.lines().skip(2).zip(&child_lines[1..]) {
        assert_eq!(line, format!("   {original}"));
    }
    assert_eq!(rendered.lines().count(), child_lines.len() + 1);
}

#[test]
fn test_many_connector_counts() {
    let error = push("top", ["a", "b", "c", "d"]);
    let rendered = TreeStyle::BOX.render(&error);
    let connectors: Vec<&str> = rendered
        .lines()
        .skip(1)
        .map(|line| &line[..line.char_indices().nth(3).map_or(line.len(), |(i, _)| i)])
        .collect();
    assert_eq!(connectors, ["├─ ", "├─ ", "├─ ", "└─ "]);
}

#[test]
fn test_prolongation_is_list_wide() {
    let error = push(
        "top",
        [
            Cause::from("leaf"),
            Cause::from("leaf"),
            Cause::from(errorf!("child", "node")),
        ],
    );
    assert_eq!(
        TreeStyle::BOX.render(&error),
        "top\n├─ leaf\n│\n├─ leaf\n│\n└─ node\n   └─ child"
    );

    let flat = push("top", ["leaf", "leaf", "leaf"]);
    assert!(!TreeStyle::BOX.render(&flat).contains("\n│\n"));
}

#[test]
fn test_idempotent_rendering() {
    let error = deploy_failure();
    let first = TreeStyle::BOX.render(&error);
    assert_eq!(first, TreeStyle::BOX.render(&error));
    assert_eq!(
        first,
        "deploy failed\n\
         ├─ build failed\n\
         │  ├─ missing dependency 'libfoo'\n\
         │  │\n\
         │  └─ can't write artifact\n\
         │     └─ out of disk space\n\
         │\n\
         └─ rollback skipped"
    );
}

#[test]
fn test_global_style_changes_presentation() {
    let _guard = lock_global_state();

    tree_style::update_tree_style(|style| {
        style.delimiter = "* ";
        style.indent = 0;
    });
    let error = errorf!(errorf!("third", "second"), "top level");
    assert_eq!(render(&error), "top level\n* second\n* third");
    assert_eq!(error.to_string(), "top level\n* second\n* third");

    tree_style::reset_tree_style();
    tree_style::register_tree_style(TreeStyle::BOX);
    assert_eq!(render(&error), "top level\n└─ second\n   └─ third");
    tree_style::reset_tree_style();
}

#[test]
fn test_display_reads_style_at_render_time() {
    let _guard = lock_global_state();

    let error = errorf!("inner", "outer");
    tree_style::register_tree_style(TreeStyle::BOX);
    let boxed = error.to_string();
    tree_style::register_tree_style(TreeStyle::ASCII);
    let ascii = error.to_string();
    tree_style::reset_tree_style();

    assert_eq!(boxed, "outer\n└─ inner");
    assert_eq!(ascii, "outer\n\\_ inner");
}

#[test]
fn test_context_ordering_through_display() {
    let _guard = lock_global_state();
    tree_style::register_tree_style(TreeStyle::BOX);

    let error = Context::new("host", "example.com")
        .context("operation", "resolv")
        .errorf(None, "system error");
    let rendered = error.to_string();
    tree_style::reset_tree_style();

    assert_eq!(
        rendered,
        "system error\n├─ operation: resolv\n└─ host: example.com"
    );
}

#[derive(Default)]
struct CapturingHandler {
    output: Mutex<String>,
    codes: Mutex<Vec<i32>>,
}

struct Injected(Arc<CapturingHandler>);

impl FatalHandler for Injected {
    fn report(&self, rendered: &str) {
        self.0.output.lock().unwrap().push_str(rendered);
    }

    fn exit(&self, code: i32) {
        self.0.codes.lock().unwrap().push(code);
        panic::resume_unwind(Box::new(code));
    }
}

#[test]
fn test_fatal_with_injected_handler() {
    let _guard = lock_global_state();
    tree_style::register_tree_style(TreeStyle::BOX);
    let capture = Arc::new(CapturingHandler::default());
    fatal::register_fatal_handler(Injected(capture.clone()));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        causetree::fatalf!(errorf!("connection refused", "can't reach db"), "startup failed after {} attempts", 3)
    }));

    fatal::reset_fatal_handler();
    tree_style::reset_tree_style();

    let payload = outcome.unwrap_err();
    assert_eq!(payload.downcast_ref::<i32>(), Some(&1));
    assert_eq!(
        *capture.output.lock().unwrap(),
        "startup failed after 3 attempts\n└─ can't reach db\n   └─ connection refused"
    );
    assert_eq!(*capture.codes.lock().unwrap(), [1]);
}

struct Batch {
    name: &'static str,
    failures: Reason,
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "batch {} had {} failures", self.name, self.failures.len())
    }
}

impl Hierarchical for Batch {
    fn nested_reason(&self) -> Option<&Reason> {
        Some(&self.failures)
    }
}

#[test]
fn test_foreign_capability_round_trip() {
    let batch = Cause::hierarchical(Batch {
        name: "nightly",
        failures: Reason::from(vec![
            Cause::from(errorf!("checksum mismatch", "row 3")),
            Cause::from("row 9"),
        ]),
    });

    let direct = batch.render(&TreeStyle::BOX);
    assert_eq!(
        direct,
        "batch nightly had 2 failures\n├─ row 3\n│  └─ checksum mismatch\n│\n└─ row 9"
    );

    let wrapped = causetree::make_node(batch.clone(), "wrapper");
    assert_eq!(
        TreeStyle::BOX.render(&wrapped),
        format!("wrapper\n└─ {}", direct.replace('\n', "\n   "))
    );
    assert_eq!(batch.top_message(), "batch nightly had 2 failures");
    assert_eq!(batch.descend().map(Reason::len), Some(2));
}

#[test]
fn test_context_reason_merge() {
    let inner = Context::new("table", "users").errorf("unique violation", "insert failed");
    let outer = Context::new("request", "42").context("tenant", "acme");

    let merged = outer.reason(inner.clone());
    assert_eq!(
        TreeStyle::BOX.render(&merged),
        "insert failed\n├─ unique violation\n├─ tenant: acme\n├─ request: 42\n└─ table: users"
    );
    assert_eq!(
        TreeStyle::BOX.render(&inner),
        "insert failed\n├─ unique violation\n└─ table: users"
    );

    let wrapped = outer.reason(Cause::error(std::io::Error::other("reset by peer")));
    assert_eq!(
        TreeStyle::BOX.render(&wrapped),
        "\n├─ reset by peer\n├─ tenant: acme\n└─ request: 42"
    );

    assert_eq!(
        outer.to_key_value_pairs(),
        ["tenant", "acme", "request", "42"]
    );
}

#[test]
fn test_depth_guard_on_deep_chain() {
    let mut error = Node::new("bottom");
    for level in 0..300 {
        error = errorf!(error, "level {level}");
    }

    let guarded = TreeStyle::BOX.with_max_depth(64);
    assert_eq!(
        guarded.try_render(&error),
        Err(RenderError::TooDeep { limit: 64 })
    );
    let truncated = guarded.render(&error);
    assert!(truncated.ends_with("└─ <reason tree too deep>"));
    assert_eq!(truncated.lines().count(), 66);

    let full = TreeStyle::BOX.try_render(&error).unwrap();
    assert_eq!(full.lines().count(), 301);
}

#[derive(Debug, thiserror::Error)]
#[error("can't load plugin")]
struct PluginError {
    #[source]
    source: std::io::Error,
}

#[test]
fn test_causes_and_sources() {
    let error = push(
        "startup failed",
        [
            Cause::error(PluginError {
                source: std::io::Error::other("no such file"),
            }),
            Cause::from(push("config invalid", ["port missing"])),
        ],
    );

    let visited: Vec<String> = error
        .causes()
        .map(|cause| cause.top_message().into_owned())
        .collect();
    assert_eq!(
        visited,
        ["can't load plugin", "config invalid", "port missing"]
    );

    assert_eq!(
        TreeStyle::BOX.following_sources().render(&error),
        "startup failed\n\
         ├─ can't load plugin\n\
         │  └─ no such file\n\
         │\n\
         └─ config invalid\n   \
            └─ port missing"
    );
}
