//! Type projection core.
//!
//! Walks the types a [`TypeChecker`](typeexpand_checker::TypeChecker) reports
//! and projects them into [`TypeObject`]s: a closed, serializable graph that
//! tooling can consume without access to the checker.
//!
//! All work happens inside a [`Session`]:
//!
//! - [`Session::extract_types`] projects the top-level declarations of a file,
//!   following named re-exports.
//! - [`Session::convert_type`] projects the type at one node.
//! - [`Session::get_object_props`] expands an object type on demand through
//!   the store key its `ObjectTO` carries.

pub mod type_object;
pub use type_object::{
    ArrayType, CallableArgument, CallableType, EnumMember, EnumType, LiteralType, ObjectProp,
    ObjectType, PrimitiveKind, PrimitiveType, PromiseType, SourceFileLocation, SpecialKind,
    SpecialType, TooFewMembers, TupleType, TypeDeclaration, TypeObject, UnionMembers, UnionType,
    UnsupportedKind, UnsupportedType,
};

pub mod error;
pub use error::{ExportError, ExportErrorReason, ExtractError, SerializeError};

pub mod store;
pub use store::{ObjectStore, StoreKey, StoredObject};

mod session;
pub use session::Session;

mod classify;
mod extract;
pub use extract::ExtractOptions;
mod locations;
mod props;

pub mod serialize;
pub use serialize::{deserialize, serialize};

#[cfg(test)]
#[path = "../tests/fixtures.rs"]
mod fixtures;

#[cfg(test)]
#[path = "../tests/classify_tests.rs"]
mod classify_tests;

#[cfg(test)]
#[path = "../tests/props_tests.rs"]
mod props_tests;

#[cfg(test)]
#[path = "../tests/extract_tests.rs"]
mod extract_tests;

#[cfg(test)]
#[path = "../tests/serialize_tests.rs"]
mod serialize_tests;
