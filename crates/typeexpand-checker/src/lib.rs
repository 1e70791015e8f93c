//! The type-checker contract consumed by typeexpand.
//!
//! The projection core never inspects a checker's internals. It talks to a
//! [`TypeChecker`] through small copyable handles (`TypeId`, `SymbolId`,
//! `NodeId`, ...) and a closed syntax view ([`SyntaxNode`]).
//!
//! [`MemoryProgram`] is a complete in-memory implementation: a snapshot of
//! files, nodes, symbols, types and signatures that can be assembled by hand
//! or loaded from JSON.

mod checker;
pub use checker::{ModuleLookup, TypeChecker};

pub mod ids;
pub use ids::{FileId, NodeId, SignatureId, SymbolId, TypeId};

pub mod literal;
pub use literal::{LiteralValue, PseudoBigInt};

pub mod syntax;
pub use syntax::{ExportClause, ExportSpecifier, SyntaxNode};

pub mod memory;
pub use memory::{MemoryProgram, NodeRecord, SignatureRecord, SymbolRecord, TypeKind, TypeRecord};

#[cfg(test)]
#[path = "../tests/memory_tests.rs"]
mod memory_tests;
