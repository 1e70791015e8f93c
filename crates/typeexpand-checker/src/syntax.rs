//! Closed view over the syntax kinds the projection core branches on.
//!
//! A checker maps its own AST onto these shapes; anything the core does not
//! distinguish collapses into `OtherType` (type positions) or `Other`.

use crate::ids::NodeId;
use serde::{Deserialize, Serialize};

/// One element of `export { a, b as c } from "..."`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSpecifier {
    /// Name visible to importers.
    pub name: String,
    /// Name inside the source module when aliased (`b` in `b as c`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
}

impl ExportSpecifier {
    pub fn named(name: impl Into<String>) -> Self {
        ExportSpecifier {
            name: name.into(),
            property_name: None,
        }
    }

    pub fn aliased(property_name: impl Into<String>, name: impl Into<String>) -> Self {
        ExportSpecifier {
            name: name.into(),
            property_name: Some(property_name.into()),
        }
    }

    /// The name to look up in the source module.
    pub fn source_name(&self) -> &str {
        self.property_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportClause {
    /// `export { a, b as c }`
    Named { elements: Vec<ExportSpecifier> },
    /// `export * as ns` (`alias` is `None` for a bare `export *`)
    Namespace { alias: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SyntaxNode {
    TypeAliasDeclaration {
        name: String,
        exported: bool,
        type_node: Option<NodeId>,
    },
    InterfaceDeclaration {
        name: String,
        exported: bool,
    },
    EnumDeclaration {
        name: String,
        exported: bool,
    },
    EnumMember {
        name: String,
    },
    VariableStatement {
        exported: bool,
        declarations: Vec<NodeId>,
    },
    VariableDeclaration {
        name: String,
        type_node: Option<NodeId>,
    },
    ExportDeclaration {
        module_specifier: Option<String>,
        clause: Option<ExportClause>,
    },
    PropertySignature {
        name: String,
        type_node: Option<NodeId>,
    },
    Parameter {
        name: String,
        type_node: Option<NodeId>,
    },
    Identifier {
        text: String,
    },
    /// `[A, B]`
    TupleType {
        elements: Vec<NodeId>,
    },
    /// `T[]`
    ArrayType {
        element_type: NodeId,
    },
    /// `Name<Args>`
    TypeReference {
        type_name: String,
        type_arguments: Vec<NodeId>,
    },
    /// Any other node in a type position (keywords, literal types, ...).
    OtherType,
    Other,
}

impl SyntaxNode {
    /// The annotated type node of a declaration, if it has one.
    pub fn type_annotation(&self) -> Option<NodeId> {
        match self {
            SyntaxNode::TypeAliasDeclaration { type_node, .. }
            | SyntaxNode::VariableDeclaration { type_node, .. }
            | SyntaxNode::PropertySignature { type_node, .. }
            | SyntaxNode::Parameter { type_node, .. } => *type_node,
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            SyntaxNode::TypeAliasDeclaration { .. } => "TypeAliasDeclaration",
            SyntaxNode::InterfaceDeclaration { .. } => "InterfaceDeclaration",
            SyntaxNode::EnumDeclaration { .. } => "EnumDeclaration",
            SyntaxNode::EnumMember { .. } => "EnumMember",
            SyntaxNode::VariableStatement { .. } => "VariableStatement",
            SyntaxNode::VariableDeclaration { .. } => "VariableDeclaration",
            SyntaxNode::ExportDeclaration { .. } => "ExportDeclaration",
            SyntaxNode::PropertySignature { .. } => "PropertySignature",
            SyntaxNode::Parameter { .. } => "Parameter",
            SyntaxNode::Identifier { .. } => "Identifier",
            SyntaxNode::TupleType { .. } => "TupleType",
            SyntaxNode::ArrayType { .. } => "ArrayType",
            SyntaxNode::TypeReference { .. } => "TypeReference",
            SyntaxNode::OtherType => "OtherType",
            SyntaxNode::Other => "Other",
        }
    }
}
