//! Shared tree utilities for Pagecraft crates

pub mod visitor;

pub use visitor::*;
