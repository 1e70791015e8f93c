use super::*;
use crate::fixtures::Fixture;
use typeexpand_checker::{NodeId, SyntaxNode, TypeKind, TypeRecord};

/// `type Node = { name: string; next: Node }`
fn linked_node() -> (Fixture, NodeId) {
    let src = "export type Node = { name: string; next: Node };\n";
    let mut fx = Fixture::new("node.ts", src);
    let file = fx.file;
    let string = fx.intrinsic("string");
    let node_type = fx.object(TypeRecord::new("Node", TypeKind::Object));
    let name = fx.property(file, "name: string", 0, "name", string, None);
    let next = fx.property(file, "next: Node", 0, "next", node_type, None);
    if let Some(record) = fx.program.type_mut(node_type) {
        record.properties = vec![name, next];
    }
    let (decl, _) = fx.type_alias(file, src.trim_end(), "Node", node_type);
    (fx, decl)
}

fn object_key(ty: &TypeObject) -> String {
    match ty.store_key() {
        Some(key) => key.to_string(),
        None => panic!("expected ObjectTO, got {ty:?}"),
    }
}

#[test]
fn test_recursive_object_expands_one_level_at_a_time() {
    let (fx, decl) = linked_node();
    let mut session = Session::new(&fx.program);

    let root = session.convert_type(decl);
    assert_eq!(root.type_name(), Some("Node"));
    let root_key = object_key(&root);

    let props = session.get_object_props(&root_key);
    let names: Vec<_> = props.iter().map(|p| p.prop_name.as_str()).collect();
    assert_eq!(names, ["name", "next"]);
    assert!(matches!(&props[0].ty, TypeObject::Primitive(p) if p.kind == PrimitiveKind::String));

    // the self reference is a new leaf, not the root again
    let next_key = object_key(&props[1].ty);
    assert_ne!(next_key, root_key);
    assert_eq!(props[1].ty.type_name(), Some("Node"));

    let nested = session.get_object_props(&next_key);
    assert_eq!(nested.len(), 2);
    // expanding does not invalidate earlier keys
    assert_eq!(session.get_object_props(&root_key).len(), 2);
}

#[test]
fn test_property_locations_point_at_declarations() {
    let (fx, decl) = linked_node();
    let mut session = Session::new(&fx.program);
    let root = session.convert_type(decl);
    let props = session.get_object_props(&object_key(&root));

    let location = &props[0].ty.locations()[0];
    assert_eq!(location.file_name, "node.ts");
    assert_eq!(location.range.start.character, 21);
}

#[test]
fn test_unknown_key_yields_unknown_prop() {
    let (fx, _) = linked_node();
    let mut session = Session::new(&fx.program);

    let props = session.get_object_props("nonexistent-key");
    assert_eq!(props.len(), 1);
    assert_eq!(props[0].prop_name, "unknown");
    assert_eq!(props[0].ty.unsupported_kind(), Some(UnsupportedKind::Prop));
    assert!(props[0].ty.locations().is_empty());
}

#[test]
fn test_stale_key_after_new_conversion() {
    let (fx, decl) = linked_node();
    let mut session = Session::new(&fx.program);
    let stale = object_key(&session.convert_type(decl));
    session.convert_type(decl);

    let props = session.get_object_props(&stale);
    assert_eq!(props.len(), 1);
    assert_eq!(props[0].prop_name, "unknown");
}

#[test]
fn test_array_property_uses_annotation() {
    let src = "export interface Team { members: User[] }\n";
    let mut fx = Fixture::new("team.ts", src);
    let file = fx.file;
    let user = fx.object(TypeRecord::new("User", TypeKind::Object));
    let id = fx.program.add_symbol("id");
    if let Some(record) = fx.program.type_mut(user) {
        record.properties = vec![id];
    }
    let users = fx.object(TypeRecord::new("User[]", TypeKind::Object));
    let element = fx.node(file, "User", 0, SyntaxNode::TypeReference {
        type_name: "User".to_string(),
        type_arguments: Vec::new(),
    }, Some(user));
    let annotation = fx.node(
        file,
        "User[]",
        0,
        SyntaxNode::ArrayType {
            element_type: element,
        },
        Some(users),
    );
    let members = fx.property(file, "members: User[]", 0, "members", users, Some(annotation));
    let team = fx.object(TypeRecord::new("Team", TypeKind::Object).with_properties(vec![members]));
    let (decl, _) = fx.interface(file, src.trim_end(), "Team", team);

    let mut session = Session::new(&fx.program);
    let team = session.convert_type(decl);
    let props = session.get_object_props(&object_key(&team));
    let TypeObject::Array(array) = &props[0].ty else {
        panic!("expected ArrayTO, got {:?}", props[0].ty);
    };
    assert_eq!(props[0].prop_name, "members");
    assert_eq!(array.type_name, "User[]");
    assert_eq!(array.child.type_name(), Some("User"));
    assert!(array.child.store_key().is_some());
}

#[test]
fn test_method_and_special_properties() {
    let src = "export interface Api {\n  handler: (event: string) => void;\n  label?: string | undefined;\n}\n";
    let mut fx = Fixture::new("api.ts", src);
    let file = fx.file;
    let string = fx.intrinsic("string");
    let void = fx.intrinsic("void");
    let undefined = fx.intrinsic("undefined");

    let event = fx.parameter(file, "event: string", "event", string);
    let signature = fx.program.add_signature(vec![event], void);
    let handler_type = fx.object(
        TypeRecord::new("(event: string) => void", TypeKind::Object)
            .with_call_signatures(vec![signature]),
    );
    let handler = fx.property(
        file,
        "handler: (event: string) => void",
        0,
        "handler",
        handler_type,
        None,
    );
    let optional = fx.program.union("string | undefined", vec![string, undefined]);
    let label = fx.property(file, "label?: string | undefined", 0, "label", optional, None);

    let template = fx.intrinsic("number");
    let mapped = fx.program.add_symbol("count");
    if let Some(record) = fx.program.symbol_mut(mapped) {
        record.mapped_template = Some(template);
    }
    let ghost = fx.program.add_symbol("ghost");

    let api = fx.object(
        TypeRecord::new("Api", TypeKind::Object).with_properties(vec![handler, label, mapped, ghost]),
    );
    let (decl, _) = fx.interface(file, src.trim_end(), "Api", api);

    let mut session = Session::new(&fx.program);
    let api = session.convert_type(decl);
    let props = session.get_object_props(&object_key(&api));
    let names: Vec<_> = props.iter().map(|p| p.prop_name.as_str()).collect();
    assert_eq!(names, ["handler", "label", "count", "ghost"]);

    let TypeObject::Callable(callable) = &props[0].ty else {
        panic!("expected CallableTO");
    };
    assert_eq!(callable.arg_types.len(), 1);
    assert_eq!(callable.arg_types[0].name, "event");

    let TypeObject::Union(union) = &props[1].ty else {
        panic!("expected UnionTO");
    };
    assert!(matches!(
        &union.members.as_slice()[1],
        TypeObject::Special(s) if s.kind == SpecialKind::Undefined
    ));

    assert!(matches!(&props[2].ty, TypeObject::Primitive(p) if p.kind == PrimitiveKind::Number));
    assert_eq!(props[3].ty.unsupported_kind(), Some(UnsupportedKind::Prop));
}
