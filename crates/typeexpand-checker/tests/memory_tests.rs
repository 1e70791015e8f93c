use super::*;
use typeexpand_common::{Position, Span};

fn program_with_alias() -> (MemoryProgram, FileId, NodeId, NodeId, SymbolId) {
    let mut program = MemoryProgram::new();
    let file = program.add_file("a.ts", "export type Name = string;\n");

    let string = program.intrinsic("string");
    let symbol = program.add_symbol("Name");
    let decl_span = program.find_span(file, "export type Name = string;", 0);
    let decl = program.add_node(
        file,
        SyntaxNode::TypeAliasDeclaration {
            name: "Name".to_string(),
            exported: true,
            type_node: None,
        },
        decl_span,
    );
    let ident_span = program.find_span(file, "Name", 0);
    let ident = program.add_node(
        file,
        SyntaxNode::Identifier {
            text: "Name".to_string(),
        },
        ident_span,
    );
    program.set_parent(ident, decl);
    program.declare(symbol, decl);
    program.refer(ident, symbol);
    program.set_node_type(decl, string);
    program.add_statement(file, decl);

    (program, file, decl, ident, symbol)
}

#[test]
fn test_intrinsics_are_interned() {
    let mut program = MemoryProgram::new();
    let a = program.intrinsic("string");
    let b = program.intrinsic("string");
    let c = program.intrinsic("number");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, TypeId::ERROR);
    assert!(program.is_error_type(TypeId::ERROR));
    assert!(!program.is_error_type(a));
}

#[test]
fn test_unknown_handles_do_not_panic() {
    let program = MemoryProgram::new();
    assert_eq!(program.node(NodeId(42)), None);
    assert_eq!(program.type_at_location(NodeId(42)), TypeId::ERROR);
    assert_eq!(program.type_to_string(TypeId(99)), "error");
    assert!(program.is_error_type(TypeId(99)));
    assert!(program.symbol_declarations(SymbolId(7)).is_empty());
    assert_eq!(program.signature_return_type(SignatureId(3)), TypeId::ERROR);
    assert_eq!(program.file_name(FileId(1)), None);
}

#[test]
fn test_declare_sets_value_declaration_once() {
    let (mut program, file, decl, _, symbol) = program_with_alias();
    let second = program.add_node(file, SyntaxNode::Other, None);
    program.declare(symbol, second);

    assert_eq!(program.symbol_declarations(symbol), vec![decl, second]);
    assert_eq!(program.symbol_value_declaration(symbol), Some(decl));
    assert_eq!(program.declared_symbol(second), Some(symbol));
}

#[test]
fn test_node_at_offset_prefers_narrowest() {
    let (program, file, decl, ident, _) = program_with_alias();

    // "export" keyword only touches the declaration
    assert_eq!(program.node_at_offset(file, 0), Some(decl));
    // inside "Name"
    assert_eq!(program.node_at_offset(file, 13), Some(ident));
    assert_eq!(program.node_at_offset(file, 200), None);
}

#[test]
fn test_positions_follow_file_text() {
    let mut program = MemoryProgram::new();
    let file = program.add_file("b.ts", "type A = 1;\ntype B = 2;\n");
    let span = program.find_span(file, "B", 0).unwrap();
    assert_eq!(span, Span::new(17, 18));
    assert_eq!(program.offset_to_position(file, 17), Some(Position::new(1, 5)));
    assert_eq!(program.position_to_offset(file, Position::new(1, 5)), Some(17));
    assert_eq!(program.find_span(file, "type", 1), Some(Span::new(12, 16)));
    assert_eq!(program.find_span(file, "type", 2), None);
}

#[test]
fn test_resolved_module_lookup() {
    let mut program = MemoryProgram::new();
    let a = program.add_file("a.ts", "");
    let b = program.add_file("b.ts", "");

    assert_eq!(program.resolved_module(a, "./b"), ModuleLookup::TableMissing);

    program.add_resolved_module(a, "./b", "b.ts");
    assert_eq!(
        program.resolved_module(a, "./b"),
        ModuleLookup::Resolved("b.ts".to_string())
    );
    assert_eq!(program.resolved_module(a, "./c"), ModuleLookup::NotFound);

    program.init_resolved_modules(b);
    assert_eq!(program.resolved_module(b, "./a"), ModuleLookup::NotFound);
}

#[test]
fn test_union_and_literal_queries() {
    let mut program = MemoryProgram::new();
    let hello = program.literal(LiteralValue::from("hello"));
    let twenty = program.literal(LiteralValue::from(20.0));
    let union = program.union("\"hello\" | 20", vec![hello, twenty]);

    assert_eq!(program.type_to_string(hello), "\"hello\"");
    assert_eq!(program.type_to_string(twenty), "20");
    assert_eq!(program.literal_value(twenty), Some(LiteralValue::Number(20.0)));
    assert_eq!(program.union_constituents(union), Some(vec![hello, twenty]));
    assert_eq!(program.union_constituents(hello), None);
}

#[test]
fn test_snapshot_json_round_trip() {
    let (program, file, decl, ident, symbol) = program_with_alias();
    let json = program.to_json().unwrap();
    let loaded = MemoryProgram::from_json(&json).unwrap();

    assert_eq!(loaded.source_file("a.ts"), Some(file));
    assert_eq!(loaded.statements(file), vec![decl]);
    assert_eq!(loaded.symbol_name(symbol).as_deref(), Some("Name"));
    assert_eq!(loaded.type_to_string(loaded.type_at_location(decl)), "string");
    // line maps are rebuilt on load
    assert_eq!(loaded.offset_to_position(file, 12), Some(Position::new(0, 12)));
    assert_eq!(loaded.node_at_offset(file, 13), Some(ident));

    // intrinsic interning survives the round trip
    let mut loaded = loaded;
    let string = loaded.type_at_location(decl);
    assert_eq!(loaded.intrinsic("string"), string);
}

#[test]
fn test_snapshot_from_hand_written_json() {
    let json = r#"{
        "files": [{ "name": "x.ts", "text": "let x = 1;", "statements": [0] }],
        "nodes": [{
            "file": 0,
            "span": { "start": 0, "end": 10 },
            "syntax": { "kind": "variableStatement", "exported": false, "declarations": [] }
        }],
        "types": [
            { "text": "error", "kind": { "kind": "error" } },
            { "text": "1", "kind": { "kind": "literal", "data": 1 } }
        ]
    }"#;
    let program = MemoryProgram::from_json(json).unwrap();
    let file = program.source_file("x.ts").unwrap();
    let statement = program.statements(file)[0];
    assert!(matches!(
        program.node(statement),
        Some(SyntaxNode::VariableStatement { .. })
    ));
    assert_eq!(
        program.literal_value(TypeId(1)),
        Some(LiteralValue::Number(1.0))
    );
}
