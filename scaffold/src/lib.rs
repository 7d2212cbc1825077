//! Idempotent project scaffolding.
//!
//! Ensures an ordered list of relative paths exists under a project root:
//! entries with an extension become empty files, everything else becomes a
//! directory. Nothing that already exists is modified.
//!
//! - **[`core`]**: Pure logic (classification, validation, events, the
//!   built-in layout). No I/O.
//! - **[`io`]**: Filesystem access, manifests and event sinks.
//!
//! [`scaffold`] drives a [`io::fs::Filesystem`] and reports to an
//! [`io::sink::EventSink`], both injected by the caller.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod scaffold;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
