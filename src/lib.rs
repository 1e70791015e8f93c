//! typeexpand: project a type checker's view of a TypeScript program into a
//! portable type-object graph.
//!
//! This crate is a facade over the workspace:
//!
//! - [`common`]: positions, ranges and limits
//! - [`checker`]: the `TypeChecker` contract and the in-memory `MemoryProgram`
//! - [`projection`]: type objects, the classifier, extraction and the `Session`
//!
//! It also carries the tracing setup and, behind the default `cli` feature,
//! the CLI used by the `typeexpand` binary.

pub use typeexpand_checker as checker;
pub use typeexpand_common as common;
pub use typeexpand_core as projection;

pub use typeexpand_checker::{MemoryProgram, TypeChecker};
pub use typeexpand_core::{
    ExtractError, ExtractOptions, ObjectProp, Session, TypeDeclaration, TypeObject, deserialize,
    serialize,
};

pub mod tracing_config;

#[cfg(feature = "cli")]
pub mod cli;
