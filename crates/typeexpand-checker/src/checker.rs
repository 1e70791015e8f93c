//! The checker contract.

use crate::ids::{FileId, NodeId, SignatureId, SymbolId, TypeId};
use crate::literal::LiteralValue;
use crate::syntax::SyntaxNode;
use typeexpand_common::{Position, Span};

/// Outcome of looking a module specifier up in a file's resolution table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleLookup {
    /// The file has no resolution table at all.
    TableMissing,
    /// The table exists but has no entry for the specifier.
    NotFound,
    /// File name the specifier resolved to.
    Resolved(String),
}

/// Everything the projection core needs from a type checker.
///
/// Implementations answer for a single, immutable snapshot of a program.
/// Queries on handles the snapshot does not know about must not panic: they
/// return `None`, an empty list, or the checker's error type.
pub trait TypeChecker {
    // -------------------------------------------------------------------------
    // Program
    // -------------------------------------------------------------------------

    fn source_file(&self, file_name: &str) -> Option<FileId>;

    fn file_name(&self, file: FileId) -> Option<String>;

    /// Top-level statements of a file in source order.
    fn statements(&self, file: FileId) -> Vec<NodeId>;

    fn resolved_module(&self, file: FileId, specifier: &str) -> ModuleLookup;

    fn offset_to_position(&self, file: FileId, offset: u32) -> Option<Position>;

    fn position_to_offset(&self, file: FileId, position: Position) -> Option<u32>;

    /// The deepest node whose span touches `offset`.
    fn node_at_offset(&self, file: FileId, offset: u32) -> Option<NodeId>;

    // -------------------------------------------------------------------------
    // Nodes
    // -------------------------------------------------------------------------

    fn node(&self, node: NodeId) -> Option<SyntaxNode>;

    fn node_file(&self, node: NodeId) -> Option<FileId>;

    /// `None` for synthesized nodes without a source range.
    fn node_span(&self, node: NodeId) -> Option<Span>;

    /// The symbol a declaration node introduces.
    fn declared_symbol(&self, node: NodeId) -> Option<SymbolId>;

    /// The symbol an identifier or reference denotes.
    fn symbol_at_location(&self, node: NodeId) -> Option<SymbolId>;

    fn type_at_location(&self, node: NodeId) -> TypeId;

    fn type_from_type_node(&self, node: NodeId) -> TypeId;

    // -------------------------------------------------------------------------
    // Symbols
    // -------------------------------------------------------------------------

    fn symbol_name(&self, symbol: SymbolId) -> Option<String>;

    fn symbol_declarations(&self, symbol: SymbolId) -> Vec<NodeId>;

    fn symbol_value_declaration(&self, symbol: SymbolId) -> Option<NodeId>;

    /// Exported members, in declaration order (enum members for enums).
    fn symbol_exports(&self, symbol: SymbolId) -> Vec<SymbolId>;

    fn symbol_is_module(&self, symbol: SymbolId) -> bool;

    /// Template value type of a property produced by a mapped type.
    fn mapped_type_template(&self, symbol: SymbolId) -> Option<TypeId>;

    fn type_of_symbol_at_location(&self, symbol: SymbolId, node: NodeId) -> TypeId;

    fn declared_type_of_symbol(&self, symbol: SymbolId) -> TypeId;

    // -------------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------------

    fn type_to_string(&self, ty: TypeId) -> String;

    fn is_error_type(&self, ty: TypeId) -> bool;

    /// Constituents when `ty` is a union, `None` otherwise.
    fn union_constituents(&self, ty: TypeId) -> Option<Vec<TypeId>>;

    fn is_type_parameter(&self, ty: TypeId) -> bool;

    /// Value of a string, number or bigint literal type.
    fn literal_value(&self, ty: TypeId) -> Option<LiteralValue>;

    /// The symbol that declares the type (`Array`, `Promise`, an enum, ...).
    fn type_symbol(&self, ty: TypeId) -> Option<SymbolId>;

    fn alias_symbol(&self, ty: TypeId) -> Option<SymbolId>;

    fn alias_type_arguments(&self, ty: TypeId) -> Vec<TypeId>;

    /// Type arguments of a generic instantiation.
    fn resolved_type_arguments(&self, ty: TypeId) -> Vec<TypeId>;

    /// The type node the type was created from, when there is one.
    fn type_origin_node(&self, ty: TypeId) -> Option<NodeId>;

    /// Properties in the checker's enumeration order.
    fn properties_of_type(&self, ty: TypeId) -> Vec<SymbolId>;

    fn call_signatures(&self, ty: TypeId) -> Vec<SignatureId>;

    fn signature_parameters(&self, signature: SignatureId) -> Vec<SymbolId>;

    fn signature_return_type(&self, signature: SignatureId) -> TypeId;
}
