//! Type aliases shared across the workspace.

mod aliases;

pub use aliases::*;
