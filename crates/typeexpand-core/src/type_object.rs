//! The type-object graph.
//!
//! A `TypeObject` is the portable projection of one checker type. The graph
//! is a finite tree: object-shaped types are leaves holding a store key, and
//! their members are produced on demand by `Session::get_object_props`.

use serde::{Deserialize, Serialize};
use std::fmt;
use typeexpand_checker::LiteralValue;
use typeexpand_common::Range;

/// Where a type (or the symbol behind it) is declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFileLocation {
    pub file_name: String,
    pub range: Range,
}

// =============================================================================
// Variant payloads
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Number,
    Bigint,
    Boolean,
}

impl PrimitiveKind {
    pub fn from_type_text(text: &str) -> Option<Self> {
        Some(match text {
            "string" => PrimitiveKind::String,
            "number" => PrimitiveKind::Number,
            "bigint" => PrimitiveKind::Bigint,
            "boolean" => PrimitiveKind::Boolean,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialKind {
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "undefined")]
    Undefined,
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "Date")]
    Date,
    #[serde(rename = "unique symbol")]
    UniqueSymbol,
    #[serde(rename = "Symbol")]
    Symbol,
}

impl SpecialKind {
    pub fn from_type_text(text: &str) -> Option<Self> {
        Some(match text {
            "null" => SpecialKind::Null,
            "undefined" => SpecialKind::Undefined,
            "void" => SpecialKind::Void,
            "any" => SpecialKind::Any,
            "unknown" => SpecialKind::Unknown,
            "never" => SpecialKind::Never,
            "Date" => SpecialKind::Date,
            "unique symbol" => SpecialKind::UniqueSymbol,
            "Symbol" | "symbol" => SpecialKind::Symbol,
            _ => return None,
        })
    }
}

/// Why a type was projected as `Unsupported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnsupportedKind {
    /// Array element type could not be resolved.
    #[serde(rename = "arrayT")]
    ArrayT,
    /// Property could not be resolved (or the store key is unknown).
    Prop,
    /// No classification rule matched.
    Convert,
    /// A generic parameter without an instantiation.
    UnresolvedTypeParameter,
    /// `Promise`/`PromiseLike` without a resolvable type argument.
    PromiseNoArgument,
    /// Nesting exceeded `limits::MAX_CLASSIFY_DEPTH`.
    RecursionLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveType {
    pub kind: PrimitiveKind,
    pub locations: Vec<SourceFileLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialType {
    pub kind: SpecialKind,
    pub locations: Vec<SourceFileLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralType {
    pub value: LiteralValue,
    #[serde(default)]
    pub locations: Vec<SourceFileLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayType {
    pub type_name: String,
    pub child: Box<TypeObject>,
    pub locations: Vec<SourceFileLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleType {
    pub type_name: String,
    pub items: Vec<TypeObject>,
    pub locations: Vec<SourceFileLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionType {
    pub type_name: String,
    pub members: UnionMembers,
    pub locations: Vec<SourceFileLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: LiteralType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    pub type_name: String,
    pub members: Vec<EnumMember>,
    pub locations: Vec<SourceFileLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallableArgument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallableType {
    pub arg_types: Vec<CallableArgument>,
    pub return_type: Box<TypeObject>,
    #[serde(default)]
    pub locations: Vec<SourceFileLocation>,
}

/// Payload shared by `Promise` and `PromiseLike`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromiseType {
    pub child: Box<TypeObject>,
    pub locations: Vec<SourceFileLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    pub type_name: String,
    pub store_key: String,
    pub locations: Vec<SourceFileLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsupportedType {
    pub kind: UnsupportedKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_text: Option<String>,
    pub locations: Vec<SourceFileLocation>,
}

// =============================================================================
// UnionMembers
// =============================================================================

/// Union constituents, at least two by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TypeObject>", into = "Vec<TypeObject>")]
pub struct UnionMembers(Vec<TypeObject>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooFewMembers(pub usize);

impl fmt::Display for TooFewMembers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a union needs at least 2 members, got {}", self.0)
    }
}

impl std::error::Error for TooFewMembers {}

impl UnionMembers {
    pub fn new(first: TypeObject, second: TypeObject, rest: Vec<TypeObject>) -> Self {
        let mut members = Vec::with_capacity(rest.len() + 2);
        members.push(first);
        members.push(second);
        members.extend(rest);
        UnionMembers(members)
    }

    pub fn as_slice(&self) -> &[TypeObject] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeObject> {
        self.0.iter()
    }
}

impl TryFrom<Vec<TypeObject>> for UnionMembers {
    type Error = TooFewMembers;

    fn try_from(members: Vec<TypeObject>) -> Result<Self, Self::Error> {
        if members.len() < 2 {
            return Err(TooFewMembers(members.len()));
        }
        Ok(UnionMembers(members))
    }
}

impl From<UnionMembers> for Vec<TypeObject> {
    fn from(members: UnionMembers) -> Self {
        members.0
    }
}

impl<'a> IntoIterator for &'a UnionMembers {
    type Item = &'a TypeObject;
    type IntoIter = std::slice::Iter<'a, TypeObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// TypeObject
// =============================================================================

/// Closed projection of a checker type.
///
/// Serialized with an explicit `__type` discriminant per variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type")]
pub enum TypeObject {
    #[serde(rename = "PrimitiveTO")]
    Primitive(PrimitiveType),
    #[serde(rename = "SpecialTO")]
    Special(SpecialType),
    #[serde(rename = "LiteralTO")]
    Literal(LiteralType),
    #[serde(rename = "ArrayTO")]
    Array(ArrayType),
    #[serde(rename = "TupleTO")]
    Tuple(TupleType),
    #[serde(rename = "UnionTO")]
    Union(UnionType),
    #[serde(rename = "EnumTO")]
    Enum(EnumType),
    #[serde(rename = "CallableTO")]
    Callable(CallableType),
    #[serde(rename = "PromiseTO")]
    Promise(PromiseType),
    #[serde(rename = "PromiseLikeTO")]
    PromiseLike(PromiseType),
    #[serde(rename = "ObjectTO")]
    Object(ObjectType),
    #[serde(rename = "UnsupportedTO")]
    Unsupported(UnsupportedType),
}

impl TypeObject {
    pub fn primitive(kind: PrimitiveKind, locations: Vec<SourceFileLocation>) -> Self {
        TypeObject::Primitive(PrimitiveType { kind, locations })
    }

    pub fn special(kind: SpecialKind, locations: Vec<SourceFileLocation>) -> Self {
        TypeObject::Special(SpecialType { kind, locations })
    }

    pub fn literal(value: LiteralValue, locations: Vec<SourceFileLocation>) -> Self {
        TypeObject::Literal(LiteralType { value, locations })
    }

    pub fn unsupported(kind: UnsupportedKind, locations: Vec<SourceFileLocation>) -> Self {
        TypeObject::Unsupported(UnsupportedType {
            kind,
            type_text: None,
            locations,
        })
    }

    pub fn unsupported_with_text(
        kind: UnsupportedKind,
        type_text: impl Into<String>,
        locations: Vec<SourceFileLocation>,
    ) -> Self {
        TypeObject::Unsupported(UnsupportedType {
            kind,
            type_text: Some(type_text.into()),
            locations,
        })
    }

    /// The `__type` discriminant this variant serializes with.
    pub fn tag(&self) -> &'static str {
        match self {
            TypeObject::Primitive(_) => "PrimitiveTO",
            TypeObject::Special(_) => "SpecialTO",
            TypeObject::Literal(_) => "LiteralTO",
            TypeObject::Array(_) => "ArrayTO",
            TypeObject::Tuple(_) => "TupleTO",
            TypeObject::Union(_) => "UnionTO",
            TypeObject::Enum(_) => "EnumTO",
            TypeObject::Callable(_) => "CallableTO",
            TypeObject::Promise(_) => "PromiseTO",
            TypeObject::PromiseLike(_) => "PromiseLikeTO",
            TypeObject::Object(_) => "ObjectTO",
            TypeObject::Unsupported(_) => "UnsupportedTO",
        }
    }

    pub fn locations(&self) -> &[SourceFileLocation] {
        match self {
            TypeObject::Primitive(t) => &t.locations,
            TypeObject::Special(t) => &t.locations,
            TypeObject::Literal(t) => &t.locations,
            TypeObject::Array(t) => &t.locations,
            TypeObject::Tuple(t) => &t.locations,
            TypeObject::Union(t) => &t.locations,
            TypeObject::Enum(t) => &t.locations,
            TypeObject::Callable(t) => &t.locations,
            TypeObject::Promise(t) | TypeObject::PromiseLike(t) => &t.locations,
            TypeObject::Object(t) => &t.locations,
            TypeObject::Unsupported(t) => &t.locations,
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        match self {
            TypeObject::Array(t) => Some(&t.type_name),
            TypeObject::Tuple(t) => Some(&t.type_name),
            TypeObject::Union(t) => Some(&t.type_name),
            TypeObject::Enum(t) => Some(&t.type_name),
            TypeObject::Object(t) => Some(&t.type_name),
            _ => None,
        }
    }

    pub fn store_key(&self) -> Option<&str> {
        match self {
            TypeObject::Object(t) => Some(&t.store_key),
            _ => None,
        }
    }

    pub fn unsupported_kind(&self) -> Option<UnsupportedKind> {
        match self {
            TypeObject::Unsupported(t) => Some(t.kind),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&LiteralType> {
        match self {
            TypeObject::Literal(t) => Some(t),
            _ => None,
        }
    }
}

/// A named top-level declaration and its projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    /// `None` for anonymous declarations.
    pub declared_name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeObject,
}

/// One property of an object-shaped type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectProp {
    pub prop_name: String,
    #[serde(rename = "type")]
    pub ty: TypeObject,
}
