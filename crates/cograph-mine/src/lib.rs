//! Git history mining and method-level change collection.
//!
//! Walks a repository's commit history with git2, detects which method
//! bodies changed per commit by intersecting tree-sitter function spans
//! with diff line ranges, and deduplicates the observations into a set of
//! [`cograph_core::ChangeRecord`]s ready for graph construction.

pub mod collect;
pub mod methods;
pub mod mining;
