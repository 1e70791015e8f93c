//! Type classification.
//!
//! Classification runs in two steps. [`TypeDescriptor::collect`] asks the
//! checker every question the rules need, once. [`TypeShape::of`] then picks
//! the first rule that matches, in a fixed order:
//!
//! 1. enum (a union whose symbol has exported members)
//! 2. union (a single constituent stands for itself)
//! 3. unresolved type parameter
//! 4. tuple
//! 5. literal
//! 6. primitive
//! 7. special
//! 8. array
//! 9. callable
//! 10. `Promise` / `PromiseLike`
//! 11. object (interned in the store, expanded lazily)
//! 12. anything else is `Unsupported`
//!
//! The session then builds the `TypeObject` with an exhaustive match on the
//! shape. Nesting is bounded by [`MAX_CLASSIFY_DEPTH`] so that recursive
//! types which never pass through an object (`type F = () => F`) terminate.

use crate::session::Session;
use crate::type_object::{
    ArrayType, CallableArgument, CallableType, EnumMember, EnumType, ObjectType, PrimitiveKind,
    PromiseType, SourceFileLocation, SpecialKind, TupleType, TypeObject, UnionMembers, UnionType,
    UnsupportedKind,
};
use tracing::{debug, trace};
use typeexpand_checker::{LiteralValue, NodeId, SignatureId, SymbolId, SyntaxNode, TypeChecker, TypeId};
use typeexpand_common::limits::MAX_CLASSIFY_DEPTH;

/// Checker facts about one type, gathered before any rule is applied.
#[derive(Debug, Clone)]
pub(crate) struct TypeDescriptor {
    /// Display text with the leading `typeof ` removed.
    pub text: String,
    pub constituents: Option<Vec<TypeId>>,
    pub symbol_name: Option<String>,
    /// Exported members of the type's symbol.
    pub exports: Vec<SymbolId>,
    pub is_type_parameter: bool,
    pub tuple_elements: Option<Vec<NodeId>>,
    pub literal: Option<LiteralValue>,
    pub call_signature: Option<SignatureId>,
    pub has_properties: bool,
}

impl TypeDescriptor {
    pub(crate) fn collect<C: TypeChecker + ?Sized>(
        checker: &C,
        ty: TypeId,
        anchor: Option<NodeId>,
    ) -> Self {
        let symbol = checker.type_symbol(ty);
        let literal = checker
            .literal_value(ty)
            .or_else(|| match checker.type_to_string(ty).as_str() {
                "true" => Some(LiteralValue::Boolean(true)),
                "false" => Some(LiteralValue::Boolean(false)),
                _ => None,
            });

        TypeDescriptor {
            text: display_text(checker, ty),
            constituents: checker.union_constituents(ty),
            symbol_name: symbol.and_then(|symbol| checker.symbol_name(symbol)),
            exports: symbol
                .map(|symbol| checker.symbol_exports(symbol))
                .unwrap_or_default(),
            is_type_parameter: checker.is_type_parameter(ty),
            tuple_elements: tuple_elements(checker, ty, anchor),
            literal,
            call_signature: checker.call_signatures(ty).first().copied(),
            has_properties: !checker.properties_of_type(ty).is_empty(),
        }
    }
}

/// Checker display text with the first `typeof ` removed.
pub(crate) fn display_text<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> String {
    checker.type_to_string(ty).replacen("typeof ", "", 1)
}

/// Element nodes of the tuple syntax the type came from: the type's origin
/// node, or else the anchor itself, or else the anchor's annotation.
fn tuple_elements<C: TypeChecker + ?Sized>(
    checker: &C,
    ty: TypeId,
    anchor: Option<NodeId>,
) -> Option<Vec<NodeId>> {
    let annotation = anchor
        .and_then(|anchor| checker.node(anchor))
        .and_then(|syntax| syntax.type_annotation());
    [checker.type_origin_node(ty), anchor, annotation]
        .into_iter()
        .flatten()
        .find_map(|node| match checker.node(node) {
            Some(SyntaxNode::TupleType { elements }) => Some(elements),
            _ => None,
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PromiseFlavor {
    Promise,
    PromiseLike,
}

/// The classification rule a type falls under.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TypeShape {
    // =========================================================================
    // Unions
    // =========================================================================
    Enum(Vec<SymbolId>),
    Union {
        first: TypeId,
        second: TypeId,
        rest: Vec<TypeId>,
    },
    /// A one-member union, classified as that member.
    Constituent(TypeId),

    // =========================================================================
    // Leaves
    // =========================================================================
    TypeParameter,
    Tuple(Vec<NodeId>),
    Literal(LiteralValue),
    Primitive(PrimitiveKind),
    Special(SpecialKind),

    // =========================================================================
    // Structured
    // =========================================================================
    Array,
    Callable(SignatureId),
    Promise(PromiseFlavor),
    Object,

    Unknown,
}

impl TypeShape {
    pub(crate) fn of(descriptor: TypeDescriptor) -> Self {
        let TypeDescriptor {
            text,
            constituents,
            symbol_name,
            exports,
            is_type_parameter,
            tuple_elements,
            literal,
            call_signature,
            has_properties,
        } = descriptor;

        if let Some(constituents) = constituents {
            if !constituents.is_empty() && !exports.is_empty() {
                return TypeShape::Enum(exports);
            }
            match constituents.as_slice() {
                [single] => return TypeShape::Constituent(*single),
                [first, second, rest @ ..] => {
                    return TypeShape::Union {
                        first: *first,
                        second: *second,
                        rest: rest.to_vec(),
                    };
                }
                [] => {}
            }
        }
        if is_type_parameter {
            return TypeShape::TypeParameter;
        }
        if let Some(elements) = tuple_elements {
            return TypeShape::Tuple(elements);
        }
        if let Some(value) = literal {
            return TypeShape::Literal(value);
        }
        if let Some(kind) = PrimitiveKind::from_type_text(&text) {
            return TypeShape::Primitive(kind);
        }
        if let Some(kind) = SpecialKind::from_type_text(&text) {
            return TypeShape::Special(kind);
        }
        let symbol_name = symbol_name.as_deref();
        if text.ends_with("[]") || symbol_name == Some("Array") {
            return TypeShape::Array;
        }
        if let Some(signature) = call_signature {
            return TypeShape::Callable(signature);
        }
        match symbol_name {
            Some("Promise") => return TypeShape::Promise(PromiseFlavor::Promise),
            Some("PromiseLike") => return TypeShape::Promise(PromiseFlavor::PromiseLike),
            _ => {}
        }
        if has_properties {
            return TypeShape::Object;
        }
        TypeShape::Unknown
    }

    fn name(&self) -> &'static str {
        match self {
            TypeShape::Enum(_) => "enum",
            TypeShape::Union { .. } => "union",
            TypeShape::Constituent(_) => "constituent",
            TypeShape::TypeParameter => "type-parameter",
            TypeShape::Tuple(_) => "tuple",
            TypeShape::Literal(_) => "literal",
            TypeShape::Primitive(_) => "primitive",
            TypeShape::Special(_) => "special",
            TypeShape::Array => "array",
            TypeShape::Callable(_) => "callable",
            TypeShape::Promise(_) => "promise",
            TypeShape::Object => "object",
            TypeShape::Unknown => "unknown",
        }
    }
}

impl<'c, C: TypeChecker + ?Sized> Session<'c, C> {
    /// Classify `ty`. `anchor` is the syntax the type was read from, used for
    /// locations and for syntax-driven fallbacks.
    pub(crate) fn classify(&mut self, ty: TypeId, anchor: Option<NodeId>) -> TypeObject {
        if self.depth >= MAX_CLASSIFY_DEPTH {
            let text = display_text(self.checker, ty);
            debug!(ty = %ty, text = %text, "classification depth limit reached");
            return TypeObject::unsupported_with_text(
                UnsupportedKind::RecursionLimit,
                text,
                Vec::new(),
            );
        }
        self.depth += 1;
        let result = self.classify_type(ty, anchor);
        self.depth -= 1;
        result
    }

    fn classify_type(&mut self, ty: TypeId, anchor: Option<NodeId>) -> TypeObject {
        let locations = self.locations_of(self.anchor_symbol(anchor));
        let descriptor = TypeDescriptor::collect(self.checker, ty, anchor);
        let text = descriptor.text.clone();
        let shape = TypeShape::of(descriptor);
        trace!(ty = %ty, text = %text, shape = shape.name(), depth = self.depth, "classify");

        match shape {
            TypeShape::Enum(members) => self.enum_type(text, members, locations),
            TypeShape::Union {
                first,
                second,
                rest,
            } => {
                let first = self.classify(first, None);
                let second = self.classify(second, None);
                let rest = rest.into_iter().map(|ty| self.classify(ty, None)).collect();
                TypeObject::Union(UnionType {
                    type_name: text,
                    members: UnionMembers::new(first, second, rest),
                    locations,
                })
            }
            TypeShape::Constituent(member) => self.classify(member, anchor),
            TypeShape::TypeParameter => TypeObject::unsupported_with_text(
                UnsupportedKind::UnresolvedTypeParameter,
                text,
                locations,
            ),
            TypeShape::Tuple(elements) => {
                let items = elements
                    .into_iter()
                    .map(|element| {
                        let element_type = self.checker.type_from_type_node(element);
                        self.classify(element_type, Some(element))
                    })
                    .collect();
                TypeObject::Tuple(TupleType {
                    type_name: text,
                    items,
                    locations,
                })
            }
            TypeShape::Literal(value) => TypeObject::literal(value, locations),
            TypeShape::Primitive(kind) => TypeObject::primitive(kind, locations),
            TypeShape::Special(kind) => TypeObject::special(kind, locations),
            TypeShape::Array => {
                let child = self.array_element(ty, anchor).unwrap_or_else(|| {
                    debug!(ty = %ty, text = %text, "array element unresolved");
                    TypeObject::unsupported(UnsupportedKind::ArrayT, Vec::new())
                });
                TypeObject::Array(ArrayType {
                    type_name: text,
                    child: Box::new(child),
                    locations,
                })
            }
            TypeShape::Callable(signature) => self.callable(signature, locations),
            TypeShape::Promise(flavor) => {
                let child = self.promise_argument(ty).unwrap_or_else(|| {
                    TypeObject::unsupported(UnsupportedKind::PromiseNoArgument, locations.clone())
                });
                let promise = PromiseType {
                    child: Box::new(child),
                    locations,
                };
                match flavor {
                    PromiseFlavor::Promise => TypeObject::Promise(promise),
                    PromiseFlavor::PromiseLike => TypeObject::PromiseLike(promise),
                }
            }
            TypeShape::Object => {
                let key = self.store.intern(ty, locations.clone());
                TypeObject::Object(ObjectType {
                    type_name: text,
                    store_key: key.to_string(),
                    locations,
                })
            }
            TypeShape::Unknown => {
                debug!(ty = %ty, text = %text, "no classification rule matched");
                TypeObject::unsupported_with_text(UnsupportedKind::Convert, text, locations)
            }
        }
    }

    /// Enum members whose value classifies as a literal. Computed members
    /// are dropped.
    fn enum_type(
        &mut self,
        type_name: String,
        members: Vec<SymbolId>,
        locations: Vec<SourceFileLocation>,
    ) -> TypeObject {
        let mut enum_members = Vec::with_capacity(members.len());
        for member in members {
            let Some(name) = self.checker.symbol_name(member) else {
                continue;
            };
            let Some(declaration) = self.checker.symbol_value_declaration(member) else {
                continue;
            };
            let member_type = self.checker.type_at_location(declaration);
            match self.classify(member_type, Some(declaration)) {
                TypeObject::Literal(value) => enum_members.push(EnumMember { name, value }),
                other => trace!(member = %name, tag = other.tag(), "skipping non-literal enum member"),
            }
        }
        TypeObject::Enum(EnumType {
            type_name,
            members: enum_members,
            locations,
        })
    }

    /// Project the first call signature. Parameters without a declaration
    /// are skipped.
    pub(crate) fn callable(
        &mut self,
        signature: SignatureId,
        locations: Vec<SourceFileLocation>,
    ) -> TypeObject {
        let mut arg_types = Vec::new();
        for parameter in self.checker.signature_parameters(signature) {
            let Some(&declaration) = self.checker.symbol_declarations(parameter).first() else {
                continue;
            };
            let name = self.checker.symbol_name(parameter).unwrap_or_default();
            let parameter_type = self.checker.type_of_symbol_at_location(parameter, declaration);
            let ty = self.classify(parameter_type, Some(declaration));
            arg_types.push(CallableArgument { name, ty });
        }
        let return_type = self.classify(self.checker.signature_return_type(signature), None);
        TypeObject::Callable(CallableType {
            arg_types,
            return_type: Box::new(return_type),
            locations,
        })
    }

    /// Element type of an array: the instantiation's type argument, or else
    /// whatever the anchor's syntax says.
    fn array_element(&mut self, ty: TypeId, anchor: Option<NodeId>) -> Option<TypeObject> {
        if let Some(&argument) = self.checker.resolved_type_arguments(ty).first() {
            return Some(self.classify(argument, None));
        }
        match self.array_syntax(anchor)? {
            SyntaxNode::TypeReference { type_arguments, .. } => {
                let &argument = type_arguments.first()?;
                let argument_type = self.checker.type_from_type_node(argument);
                Some(self.classify(argument_type, Some(argument)))
            }
            SyntaxNode::ArrayType { element_type } => {
                let element = self.checker.type_at_location(element_type);
                Some(self.classify(element, Some(element_type)))
            }
            _ => None,
        }
    }

    /// `T[]` or `Array<T>` syntax at the anchor or in its annotation.
    fn array_syntax(&self, anchor: Option<NodeId>) -> Option<SyntaxNode> {
        let syntax = self.checker.node(anchor?)?;
        if is_array_syntax(&syntax) {
            return Some(syntax);
        }
        let annotation = self.checker.node(syntax.type_annotation()?)?;
        is_array_syntax(&annotation).then_some(annotation)
    }

    /// First type argument of a promise: resolved from the instantiation, or
    /// read off the alias declaration's annotation.
    fn promise_argument(&mut self, ty: TypeId) -> Option<TypeObject> {
        if let Some(&argument) = self.checker.resolved_type_arguments(ty).first() {
            return Some(self.classify(argument, None));
        }
        let alias = self.checker.alias_symbol(ty)?;
        let &declaration = self.checker.symbol_declarations(alias).first()?;
        let annotation = self.checker.node(declaration)?.type_annotation()?;
        let SyntaxNode::TypeReference { type_arguments, .. } = self.checker.node(annotation)? else {
            return None;
        };
        let &argument = type_arguments.first()?;
        let argument_type = self.checker.type_from_type_node(argument);
        Some(self.classify(argument_type, Some(argument)))
    }
}

fn is_array_syntax(syntax: &SyntaxNode) -> bool {
    match syntax {
        SyntaxNode::ArrayType { .. } => true,
        SyntaxNode::TypeReference { type_name, .. } => {
            matches!(type_name.as_str(), "Array" | "ReadonlyArray")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(text: &str) -> TypeDescriptor {
        TypeDescriptor {
            text: text.to_string(),
            constituents: None,
            symbol_name: None,
            exports: Vec::new(),
            is_type_parameter: false,
            tuple_elements: None,
            literal: None,
            call_signature: None,
            has_properties: false,
        }
    }

    #[test]
    fn test_enum_wins_over_union() {
        let d = TypeDescriptor {
            constituents: Some(vec![TypeId(1), TypeId(2)]),
            exports: vec![SymbolId(0)],
            ..descriptor("Color")
        };
        assert_eq!(TypeShape::of(d), TypeShape::Enum(vec![SymbolId(0)]));
    }

    #[test]
    fn test_single_constituent_union() {
        let d = TypeDescriptor {
            constituents: Some(vec![TypeId(4)]),
            ..descriptor("X")
        };
        assert_eq!(TypeShape::of(d), TypeShape::Constituent(TypeId(4)));
    }

    #[test]
    fn test_literal_before_primitive() {
        let d = TypeDescriptor {
            literal: Some(LiteralValue::from("string")),
            ..descriptor("string")
        };
        assert_eq!(
            TypeShape::of(d),
            TypeShape::Literal(LiteralValue::from("string"))
        );
        assert_eq!(
            TypeShape::of(descriptor("string")),
            TypeShape::Primitive(PrimitiveKind::String)
        );
    }

    #[test]
    fn test_array_before_callable_and_object() {
        let d = TypeDescriptor {
            call_signature: Some(SignatureId(0)),
            has_properties: true,
            ..descriptor("number[]")
        };
        assert_eq!(TypeShape::of(d), TypeShape::Array);
    }

    #[test]
    fn test_promise_before_object() {
        let d = TypeDescriptor {
            symbol_name: Some("PromiseLike".to_string()),
            has_properties: true,
            ..descriptor("PromiseLike<string>")
        };
        assert_eq!(
            TypeShape::of(d),
            TypeShape::Promise(PromiseFlavor::PromiseLike)
        );
    }

    #[test]
    fn test_fallthrough_is_unknown() {
        assert_eq!(TypeShape::of(descriptor("keyof T")), TypeShape::Unknown);
        let d = TypeDescriptor {
            has_properties: true,
            ..descriptor("{ a: string; }")
        };
        assert_eq!(TypeShape::of(d), TypeShape::Object);
    }
}
