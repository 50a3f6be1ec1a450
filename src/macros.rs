/// Creates a [`Node`](crate::Node) from a reason and a formatted message.
///
/// The first argument is the reason: anything implementing
/// [`IntoReason`](crate::IntoReason), such as another node, a
/// [`Cause`](crate::Cause), a `Vec<Cause>` or a string. A bare `None` stands
/// for no reason at all. The remaining arguments are interpreted the same way
/// as by [`format!()`].
///
/// [`format!()`]: std::format
///
/// # Examples
///
/// ```
/// use causetree::{Cause, TreeStyle, errorf};
///
/// let leaf = errorf!(None, "exit status {}", 128);
/// assert_eq!(leaf.message(), "exit status 128");
///
/// let remote = "origin";
/// let error = errorf!(errorf!(leaf, "can't run git fetch '{remote}'"), "can't pull remote '{remote}'");
/// assert_eq!(
///     TreeStyle::BOX.render(&error),
///     "can't pull remote 'origin'\n└─ can't run git fetch 'origin'\n   └─ exit status 128"
/// );
///
/// let io = std::io::Error::other("broken pipe");
/// let error = errorf!(Cause::error(io), "can't send request");
/// assert_eq!(TreeStyle::BOX.render(&error), "can't send request\n└─ broken pipe");
/// ```
#[macro_export]
macro_rules! errorf {
    (None, $($fmt:tt)+) => {
        $crate::Node::new($crate::__private::format!($($fmt)+))
    };
    ($reason:expr, $($fmt:tt)+) => {
        $crate::make_node($reason, $crate::__private::format!($($fmt)+))
    };
}

/// Renders a node built like [`errorf!`] and terminates the process through
/// [`fatal`](crate::fatal).
///
/// Requires the `std` feature.
///
/// # Examples
///
/// ```no_run
/// use causetree::fatalf;
///
/// let path = "/etc/app.toml";
/// fatalf!("permission denied", "can't read {path}");
/// ```
#[cfg(feature = "std")]
#[macro_export]
macro_rules! fatalf {
    (None, $($fmt:tt)+) => {
        $crate::fatal($crate::Reason::None, $crate::__private::format!($($fmt)+))
    };
    ($reason:expr, $($fmt:tt)+) => {
        $crate::fatal($reason, $crate::__private::format!($($fmt)+))
    };
}

/// Returns early with an error built like [`errorf!`].
///
/// This is equivalent to writing `return Err(errorf!(...).into());`, so the
/// function may return any error type a [`Node`](crate::Node) converts into.
///
/// # Examples
///
/// ```
/// use causetree::{Node, bail};
///
/// fn parse_port(raw: &str) -> Result<u16, Node> {
///     match raw.parse() {
///         Ok(port) => Ok(port),
///         Err(error) => bail!(error.to_string(), "invalid port {raw:?}"),
///     }
/// }
///
/// assert_eq!(parse_port("8080").ok(), Some(8080));
/// assert_eq!(
///     parse_port("http").unwrap_err().message(),
///     "invalid port \"http\""
/// );
/// ```
#[macro_export]
macro_rules! bail {
    ($($args:tt)*) => {
        return $crate::__private::Err($crate::errorf!($($args)*).into())
    };
}
