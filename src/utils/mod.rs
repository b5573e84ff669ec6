//! Shared numeric helpers.

pub mod optimization;

pub use optimization::minimize;
