//! Deterministic, pure logic for the scaffolder.
//!
//! Core modules must be free of I/O side effects. They classify and validate
//! entries and describe what happened, leaving disk access to [`crate::io`].

pub mod entry;
pub mod events;
pub mod layout;
