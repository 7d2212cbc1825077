//! I/O helpers for scaffold commands.

pub mod fs;
pub mod manifest;
pub mod sink;
