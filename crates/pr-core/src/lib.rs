//! # pr-core
//!
//! Core types, error definitions, and formatting helpers for parareduce.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – the numeric and rank type aliases, the
//! error hierarchy with its `ensure!` macro, and the helpers used
//! to render timing reports.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` macro.
pub mod errors;

/// Report formatting helpers.
pub mod formatting;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the workspace.
pub type Real = f64;

/// Alias used for array sizes, point counts, and worker indices.
pub type Size = usize;

/// Identifier of a process within a fixed-size process group.
pub type Rank = usize;

/// Message tag attached to point-to-point messages.
pub type Tag = u32;

/// Rank that aggregates partial results.
pub const COORDINATOR: Rank = 0;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
