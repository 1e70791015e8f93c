//! In-memory checker snapshots.
//!
//! `MemoryProgram` stores every entity in a flat arena indexed by its handle.
//! Entities are added through the `add_*` methods and completed through the
//! `*_mut` accessors, which lets recursive types reference their own handle
//! before their members exist. A program serializes to and from JSON; line
//! maps are rebuilt on load.

use crate::checker::{ModuleLookup, TypeChecker};
use crate::ids::{FileId, NodeId, SignatureId, SymbolId, TypeId};
use crate::literal::LiteralValue;
use crate::syntax::SyntaxNode;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use typeexpand_common::{LineMap, Position, Span};

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "FileSnapshot", into = "FileSnapshot")]
pub struct FileRecord {
    pub name: String,
    pub text: String,
    pub statements: Vec<NodeId>,
    /// `None` models a file whose resolution table was never built.
    pub resolved_modules: Option<IndexMap<String, String>>,
    line_map: LineMap,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileSnapshot {
    name: String,
    text: String,
    #[serde(default)]
    statements: Vec<NodeId>,
    #[serde(default)]
    resolved_modules: Option<IndexMap<String, String>>,
}

impl From<FileSnapshot> for FileRecord {
    fn from(snapshot: FileSnapshot) -> Self {
        FileRecord {
            line_map: LineMap::build(&snapshot.text),
            name: snapshot.name,
            text: snapshot.text,
            statements: snapshot.statements,
            resolved_modules: snapshot.resolved_modules,
        }
    }
}

impl From<FileRecord> for FileSnapshot {
    fn from(record: FileRecord) -> Self {
        FileSnapshot {
            name: record.name,
            text: record.text,
            statements: record.statements,
            resolved_modules: record.resolved_modules,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub file: FileId,
    #[serde(default)]
    pub span: Option<Span>,
    #[serde(default)]
    pub parent: Option<NodeId>,
    pub syntax: SyntaxNode,
    /// Symbol introduced by this node when it is a declaration.
    #[serde(default)]
    pub declared_symbol: Option<SymbolId>,
    /// Symbol this node refers to when it is an identifier or reference.
    #[serde(default)]
    pub location_symbol: Option<SymbolId>,
    /// Type at this node (also the type a type node denotes).
    #[serde(default)]
    pub ty: Option<TypeId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRecord {
    pub name: String,
    #[serde(default)]
    pub declarations: Vec<NodeId>,
    #[serde(default)]
    pub value_declaration: Option<NodeId>,
    #[serde(default)]
    pub exports: Vec<SymbolId>,
    #[serde(default)]
    pub is_module: bool,
    #[serde(default)]
    pub mapped_template: Option<TypeId>,
    /// Value-side type of the symbol.
    #[serde(default)]
    pub ty: Option<TypeId>,
    /// Type-side type of the symbol (what the declaration names).
    #[serde(default)]
    pub declared_type: Option<TypeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum TypeKind {
    Error,
    /// Keyword types and other types identified by their text alone.
    Intrinsic,
    Literal(LiteralValue),
    Union(Vec<TypeId>),
    TypeParameter,
    /// Structural types: objects, interfaces, functions, instantiations.
    Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    pub text: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub symbol: Option<SymbolId>,
    #[serde(default)]
    pub alias_symbol: Option<SymbolId>,
    #[serde(default)]
    pub alias_type_arguments: Vec<TypeId>,
    #[serde(default)]
    pub type_arguments: Vec<TypeId>,
    #[serde(default)]
    pub origin_node: Option<NodeId>,
    #[serde(default)]
    pub properties: Vec<SymbolId>,
    #[serde(default)]
    pub call_signatures: Vec<SignatureId>,
}

impl TypeRecord {
    pub fn new(text: impl Into<String>, kind: TypeKind) -> Self {
        TypeRecord {
            text: text.into(),
            kind,
            symbol: None,
            alias_symbol: None,
            alias_type_arguments: Vec::new(),
            type_arguments: Vec::new(),
            origin_node: None,
            properties: Vec::new(),
            call_signatures: Vec::new(),
        }
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn with_alias(mut self, symbol: SymbolId, arguments: Vec<TypeId>) -> Self {
        self.alias_symbol = Some(symbol);
        self.alias_type_arguments = arguments;
        self
    }

    pub fn with_type_arguments(mut self, arguments: Vec<TypeId>) -> Self {
        self.type_arguments = arguments;
        self
    }

    pub fn with_origin_node(mut self, node: NodeId) -> Self {
        self.origin_node = Some(node);
        self
    }

    pub fn with_properties(mut self, properties: Vec<SymbolId>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_call_signatures(mut self, signatures: Vec<SignatureId>) -> Self {
        self.call_signatures = signatures;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    pub parameters: Vec<SymbolId>,
    pub return_type: TypeId,
}

// =============================================================================
// MemoryProgram
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ProgramSnapshot", into = "ProgramSnapshot")]
pub struct MemoryProgram {
    files: Vec<FileRecord>,
    nodes: Vec<NodeRecord>,
    symbols: Vec<SymbolRecord>,
    types: Vec<TypeRecord>,
    signatures: Vec<SignatureRecord>,
    /// Intrinsic types by text, so `intrinsic("string")` is stable.
    intrinsics: FxHashMap<String, TypeId>,
}

#[derive(Serialize, Deserialize)]
struct ProgramSnapshot {
    #[serde(default)]
    files: Vec<FileRecord>,
    #[serde(default)]
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    symbols: Vec<SymbolRecord>,
    #[serde(default)]
    types: Vec<TypeRecord>,
    #[serde(default)]
    signatures: Vec<SignatureRecord>,
}

impl From<ProgramSnapshot> for MemoryProgram {
    fn from(snapshot: ProgramSnapshot) -> Self {
        let mut types = snapshot.types;
        // slot 0 is the error type; snapshots written by `to_json` carry it
        if types.is_empty() {
            types.push(TypeRecord::new("error", TypeKind::Error));
        }
        let intrinsics = types
            .iter()
            .enumerate()
            .filter(|(_, ty)| ty.kind == TypeKind::Intrinsic)
            .map(|(i, ty)| (ty.text.clone(), TypeId(i as u32)))
            .collect();
        MemoryProgram {
            files: snapshot.files,
            nodes: snapshot.nodes,
            symbols: snapshot.symbols,
            types,
            signatures: snapshot.signatures,
            intrinsics,
        }
    }
}

impl From<MemoryProgram> for ProgramSnapshot {
    fn from(program: MemoryProgram) -> Self {
        ProgramSnapshot {
            files: program.files,
            nodes: program.nodes,
            symbols: program.symbols,
            types: program.types,
            signatures: program.signatures,
        }
    }
}

impl Default for MemoryProgram {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProgram {
    pub fn new() -> Self {
        MemoryProgram {
            files: Vec::new(),
            nodes: Vec::new(),
            symbols: Vec::new(),
            types: vec![TypeRecord::new("error", TypeKind::Error)],
            signatures: Vec::new(),
            intrinsics: FxHashMap::default(),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    // -------------------------------------------------------------------------
    // Files
    // -------------------------------------------------------------------------

    pub fn add_file(&mut self, name: impl Into<String>, text: impl Into<String>) -> FileId {
        let text = text.into();
        let id = FileId(self.files.len() as u32);
        self.files.push(FileRecord {
            name: name.into(),
            line_map: LineMap::build(&text),
            text,
            statements: Vec::new(),
            resolved_modules: None,
        });
        id
    }

    pub fn file(&self, file: FileId) -> Option<&FileRecord> {
        self.files.get(file.index())
    }

    pub fn add_statement(&mut self, file: FileId, node: NodeId) {
        if let Some(record) = self.files.get_mut(file.index()) {
            record.statements.push(node);
        }
    }

    /// Record that `specifier` resolves to `target` from `file`, creating the
    /// resolution table on first use.
    pub fn add_resolved_module(
        &mut self,
        file: FileId,
        specifier: impl Into<String>,
        target: impl Into<String>,
    ) {
        if let Some(record) = self.files.get_mut(file.index()) {
            record
                .resolved_modules
                .get_or_insert_with(IndexMap::new)
                .insert(specifier.into(), target.into());
        }
    }

    /// Mark the file as having an (empty) resolution table.
    pub fn init_resolved_modules(&mut self, file: FileId) {
        if let Some(record) = self.files.get_mut(file.index()) {
            record.resolved_modules.get_or_insert_with(IndexMap::new);
        }
    }

    /// Span of the `nth` occurrence of `needle` in the file's text.
    pub fn find_span(&self, file: FileId, needle: &str, nth: usize) -> Option<Span> {
        let text = &self.files.get(file.index())?.text;
        let (start, _) = text.match_indices(needle).nth(nth)?;
        Some(Span::at(start as u32, needle.len() as u32))
    }

    // -------------------------------------------------------------------------
    // Nodes
    // -------------------------------------------------------------------------

    pub fn add_node(&mut self, file: FileId, syntax: SyntaxNode, span: Option<Span>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeRecord {
            file,
            span,
            parent: None,
            syntax,
            declared_symbol: None,
            location_symbol: None,
            ty: None,
        });
        id
    }

    pub fn node_record(&self, node: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(node.index())
    }

    pub fn node_mut(&mut self, node: NodeId) -> Option<&mut NodeRecord> {
        self.nodes.get_mut(node.index())
    }

    pub fn set_parent(&mut self, node: NodeId, parent: NodeId) {
        if let Some(record) = self.nodes.get_mut(node.index()) {
            record.parent = Some(parent);
        }
    }

    pub fn set_node_type(&mut self, node: NodeId, ty: TypeId) {
        if let Some(record) = self.nodes.get_mut(node.index()) {
            record.ty = Some(ty);
        }
    }

    // -------------------------------------------------------------------------
    // Symbols
    // -------------------------------------------------------------------------

    pub fn add_symbol(&mut self, name: impl Into<String>) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(SymbolRecord {
            name: name.into(),
            ..SymbolRecord::default()
        });
        id
    }

    pub fn symbol_record(&self, symbol: SymbolId) -> Option<&SymbolRecord> {
        self.symbols.get(symbol.index())
    }

    pub fn symbol_mut(&mut self, symbol: SymbolId) -> Option<&mut SymbolRecord> {
        self.symbols.get_mut(symbol.index())
    }

    /// Attach `node` as a declaration of `symbol`: the node declares the
    /// symbol and becomes its value declaration if it has none yet.
    pub fn declare(&mut self, symbol: SymbolId, node: NodeId) {
        if let Some(record) = self.nodes.get_mut(node.index()) {
            record.declared_symbol = Some(symbol);
        }
        if let Some(record) = self.symbols.get_mut(symbol.index()) {
            record.declarations.push(node);
            record.value_declaration.get_or_insert(node);
        }
    }

    /// Make `node` an identifier-like reference to `symbol`.
    pub fn refer(&mut self, node: NodeId, symbol: SymbolId) {
        if let Some(record) = self.nodes.get_mut(node.index()) {
            record.location_symbol = Some(symbol);
        }
    }

    // -------------------------------------------------------------------------
    // Types and signatures
    // -------------------------------------------------------------------------

    pub fn add_type(&mut self, record: TypeRecord) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(record);
        id
    }

    pub fn type_record(&self, ty: TypeId) -> Option<&TypeRecord> {
        self.types.get(ty.index())
    }

    pub fn type_mut(&mut self, ty: TypeId) -> Option<&mut TypeRecord> {
        self.types.get_mut(ty.index())
    }

    /// Interned keyword type (`string`, `undefined`, `true`, ...).
    pub fn intrinsic(&mut self, text: &str) -> TypeId {
        if let Some(&ty) = self.intrinsics.get(text) {
            return ty;
        }
        let ty = self.add_type(TypeRecord::new(text, TypeKind::Intrinsic));
        self.intrinsics.insert(text.to_string(), ty);
        ty
    }

    pub fn literal(&mut self, value: LiteralValue) -> TypeId {
        let text = value.to_string();
        self.add_type(TypeRecord::new(text, TypeKind::Literal(value)))
    }

    pub fn union(&mut self, text: impl Into<String>, members: Vec<TypeId>) -> TypeId {
        self.add_type(TypeRecord::new(text, TypeKind::Union(members)))
    }

    pub fn type_parameter(&mut self, name: impl Into<String>) -> TypeId {
        self.add_type(TypeRecord::new(name, TypeKind::TypeParameter))
    }

    pub fn object(&mut self, text: impl Into<String>) -> TypeId {
        self.add_type(TypeRecord::new(text, TypeKind::Object))
    }

    pub fn add_signature(&mut self, parameters: Vec<SymbolId>, return_type: TypeId) -> SignatureId {
        let id = SignatureId(self.signatures.len() as u32);
        self.signatures.push(SignatureRecord {
            parameters,
            return_type,
        });
        id
    }

    fn type_or_error(&self, ty: Option<TypeId>) -> TypeId {
        ty.filter(|ty| ty.index() < self.types.len())
            .unwrap_or(TypeId::ERROR)
    }

    fn depth_of(&self, mut node: NodeId) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.nodes.get(node.index()).and_then(|n| n.parent) {
            depth += 1;
            node = parent;
            if depth > self.nodes.len() {
                break;
            }
        }
        depth
    }
}

impl TypeChecker for MemoryProgram {
    fn source_file(&self, file_name: &str) -> Option<FileId> {
        self.files
            .iter()
            .position(|file| file.name == file_name)
            .map(|i| FileId(i as u32))
    }

    fn file_name(&self, file: FileId) -> Option<String> {
        self.files.get(file.index()).map(|f| f.name.clone())
    }

    fn statements(&self, file: FileId) -> Vec<NodeId> {
        self.files
            .get(file.index())
            .map(|f| f.statements.clone())
            .unwrap_or_default()
    }

    fn resolved_module(&self, file: FileId, specifier: &str) -> ModuleLookup {
        let Some(table) = self
            .files
            .get(file.index())
            .and_then(|f| f.resolved_modules.as_ref())
        else {
            return ModuleLookup::TableMissing;
        };
        match table.get(specifier) {
            Some(target) => ModuleLookup::Resolved(target.clone()),
            None => ModuleLookup::NotFound,
        }
    }

    fn offset_to_position(&self, file: FileId, offset: u32) -> Option<Position> {
        let file = self.files.get(file.index())?;
        Some(file.line_map.offset_to_position(offset, &file.text))
    }

    fn position_to_offset(&self, file: FileId, position: Position) -> Option<u32> {
        let file = self.files.get(file.index())?;
        file.line_map.position_to_offset(position, &file.text)
    }

    fn node_at_offset(&self, file: FileId, offset: u32) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.file == file)
            .filter_map(|(i, node)| {
                let span = node.span?;
                span.touches(offset).then_some((NodeId(i as u32), span))
            })
            // narrowest span wins, deeper node breaks ties
            .min_by(|(a, a_span), (b, b_span)| {
                a_span
                    .len()
                    .cmp(&b_span.len())
                    .then_with(|| self.depth_of(*b).cmp(&self.depth_of(*a)))
            })
            .map(|(node, _)| node)
    }

    fn node(&self, node: NodeId) -> Option<SyntaxNode> {
        self.nodes.get(node.index()).map(|n| n.syntax.clone())
    }

    fn node_file(&self, node: NodeId) -> Option<FileId> {
        self.nodes.get(node.index()).map(|n| n.file)
    }

    fn node_span(&self, node: NodeId) -> Option<Span> {
        self.nodes.get(node.index())?.span
    }

    fn declared_symbol(&self, node: NodeId) -> Option<SymbolId> {
        self.nodes.get(node.index())?.declared_symbol
    }

    fn symbol_at_location(&self, node: NodeId) -> Option<SymbolId> {
        self.nodes.get(node.index())?.location_symbol
    }

    fn type_at_location(&self, node: NodeId) -> TypeId {
        self.type_or_error(self.nodes.get(node.index()).and_then(|n| n.ty))
    }

    fn type_from_type_node(&self, node: NodeId) -> TypeId {
        self.type_at_location(node)
    }

    fn symbol_name(&self, symbol: SymbolId) -> Option<String> {
        self.symbols.get(symbol.index()).map(|s| s.name.clone())
    }

    fn symbol_declarations(&self, symbol: SymbolId) -> Vec<NodeId> {
        self.symbols
            .get(symbol.index())
            .map(|s| s.declarations.clone())
            .unwrap_or_default()
    }

    fn symbol_value_declaration(&self, symbol: SymbolId) -> Option<NodeId> {
        self.symbols.get(symbol.index())?.value_declaration
    }

    fn symbol_exports(&self, symbol: SymbolId) -> Vec<SymbolId> {
        self.symbols
            .get(symbol.index())
            .map(|s| s.exports.clone())
            .unwrap_or_default()
    }

    fn symbol_is_module(&self, symbol: SymbolId) -> bool {
        self.symbols
            .get(symbol.index())
            .is_some_and(|s| s.is_module)
    }

    fn mapped_type_template(&self, symbol: SymbolId) -> Option<TypeId> {
        self.symbols.get(symbol.index())?.mapped_template
    }

    fn type_of_symbol_at_location(&self, symbol: SymbolId, _node: NodeId) -> TypeId {
        self.type_or_error(self.symbols.get(symbol.index()).and_then(|s| s.ty))
    }

    fn declared_type_of_symbol(&self, symbol: SymbolId) -> TypeId {
        self.type_or_error(
            self.symbols
                .get(symbol.index())
                .and_then(|s| s.declared_type),
        )
    }

    fn type_to_string(&self, ty: TypeId) -> String {
        self.types
            .get(ty.index())
            .map(|t| t.text.clone())
            .unwrap_or_else(|| "error".to_string())
    }

    fn is_error_type(&self, ty: TypeId) -> bool {
        self.types
            .get(ty.index())
            .is_none_or(|t| t.kind == TypeKind::Error)
    }

    fn union_constituents(&self, ty: TypeId) -> Option<Vec<TypeId>> {
        match &self.types.get(ty.index())?.kind {
            TypeKind::Union(members) => Some(members.clone()),
            _ => None,
        }
    }

    fn is_type_parameter(&self, ty: TypeId) -> bool {
        self.types
            .get(ty.index())
            .is_some_and(|t| t.kind == TypeKind::TypeParameter)
    }

    fn literal_value(&self, ty: TypeId) -> Option<LiteralValue> {
        match &self.types.get(ty.index())?.kind {
            TypeKind::Literal(value) => Some(value.clone()),
            _ => None,
        }
    }

    fn type_symbol(&self, ty: TypeId) -> Option<SymbolId> {
        self.types.get(ty.index())?.symbol
    }

    fn alias_symbol(&self, ty: TypeId) -> Option<SymbolId> {
        self.types.get(ty.index())?.alias_symbol
    }

    fn alias_type_arguments(&self, ty: TypeId) -> Vec<TypeId> {
        self.types
            .get(ty.index())
            .map(|t| t.alias_type_arguments.clone())
            .unwrap_or_default()
    }

    fn resolved_type_arguments(&self, ty: TypeId) -> Vec<TypeId> {
        self.types
            .get(ty.index())
            .map(|t| t.type_arguments.clone())
            .unwrap_or_default()
    }

    fn type_origin_node(&self, ty: TypeId) -> Option<NodeId> {
        self.types.get(ty.index())?.origin_node
    }

    fn properties_of_type(&self, ty: TypeId) -> Vec<SymbolId> {
        self.types
            .get(ty.index())
            .map(|t| t.properties.clone())
            .unwrap_or_default()
    }

    fn call_signatures(&self, ty: TypeId) -> Vec<SignatureId> {
        self.types
            .get(ty.index())
            .map(|t| t.call_signatures.clone())
            .unwrap_or_default()
    }

    fn signature_parameters(&self, signature: SignatureId) -> Vec<SymbolId> {
        self.signatures
            .get(signature.index())
            .map(|s| s.parameters.clone())
            .unwrap_or_default()
    }

    fn signature_return_type(&self, signature: SignatureId) -> TypeId {
        self.type_or_error(self.signatures.get(signature.index()).map(|s| s.return_type))
    }
}
