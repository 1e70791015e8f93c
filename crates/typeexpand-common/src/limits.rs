//! Centralized limits for type projection.
//!
//! Object-shaped types never recurse during classification (their members are
//! deferred behind store keys), so these limits only bound shapes that nest
//! without passing through an object: callables returning themselves, unions
//! containing arrays of themselves, deeply nested tuples.

/// Maximum nesting depth of a single classification pass.
///
/// Reaching it turns the current node into an `Unsupported` leaf with the
/// `recursionLimit` reason.
///
/// ```typescript
/// type F = () => F;             // return type re-enters F forever
/// type U = string | U[];        // array child re-enters the union
/// ```
pub const MAX_CLASSIFY_DEPTH: u32 = 64;

/// Maximum length of a re-export chain followed by the extraction driver.
///
/// Cycles are detected separately; this only bounds very long acyclic chains.
pub const MAX_REEXPORT_DEPTH: u32 = 32;
