//! Common types and utilities shared by the typeexpand crates.
//!
//! - Position/Range types for line/character source locations
//! - `LineMap` for byte offset <-> position conversion
//! - `Span` byte ranges
//! - Centralized recursion limits

// Position/Range types for line/character source locations
pub mod position;
pub use position::{LineMap, Position, Range};

// Span - Byte ranges into source text
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;
