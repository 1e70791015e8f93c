use super::*;
use crate::fixtures::Fixture;
use serde_json::json;
use typeexpand_checker::{LiteralValue, PseudoBigInt, TypeKind, TypeRecord};
use typeexpand_common::{Position, Range};

fn location() -> SourceFileLocation {
    SourceFileLocation {
        file_name: "models.ts".to_string(),
        range: Range::new(Position::new(3, 0), Position::new(5, 1)),
    }
}

#[test]
fn test_wire_shape_of_leaves() {
    let primitive = TypeObject::primitive(PrimitiveKind::String, vec![location()]);
    assert_eq!(
        serialize::to_value(&primitive).unwrap(),
        json!({
            "__type": "PrimitiveTO",
            "kind": "string",
            "locations": [{
                "fileName": "models.ts",
                "range": {
                    "start": { "line": 3, "character": 0 },
                    "end": { "line": 5, "character": 1 }
                }
            }]
        })
    );

    let unsupported = TypeObject::unsupported(UnsupportedKind::ArrayT, Vec::new());
    assert_eq!(
        serialize::to_value(&unsupported).unwrap(),
        json!({ "__type": "UnsupportedTO", "kind": "arrayT", "locations": [] })
    );

    let special = TypeObject::special(SpecialKind::UniqueSymbol, Vec::new());
    assert_eq!(
        serialize::to_value(&special).unwrap(),
        json!({ "__type": "SpecialTO", "kind": "unique symbol", "locations": [] })
    );
}

#[test]
fn test_wire_shape_of_composites() {
    let object = TypeObject::Object(ObjectType {
        type_name: "User".to_string(),
        store_key: "7-0".to_string(),
        locations: Vec::new(),
    });
    let callable = TypeObject::Callable(CallableType {
        arg_types: vec![CallableArgument {
            name: "user".to_string(),
            ty: object.clone(),
        }],
        return_type: Box::new(TypeObject::Promise(PromiseType {
            child: Box::new(TypeObject::special(SpecialKind::Void, Vec::new())),
            locations: Vec::new(),
        })),
        locations: Vec::new(),
    });

    let value = serialize::to_value(&callable).unwrap();
    assert_eq!(value["__type"], "CallableTO");
    assert_eq!(value["argTypes"][0]["name"], "user");
    assert_eq!(value["argTypes"][0]["type"]["__type"], "ObjectTO");
    assert_eq!(value["argTypes"][0]["type"]["typeName"], "User");
    assert_eq!(value["argTypes"][0]["type"]["storeKey"], "7-0");
    assert_eq!(value["returnType"]["__type"], "PromiseTO");
    assert_eq!(value["returnType"]["child"]["kind"], "void");
}

#[test]
fn test_literals_are_untagged() {
    let big = TypeObject::literal(PseudoBigInt::new(true, "45").into(), Vec::new());
    assert_eq!(
        serialize::to_value(&big).unwrap(),
        json!({
            "__type": "LiteralTO",
            "value": { "negative": true, "base10Value": "45" },
            "locations": []
        })
    );

    let wire = r#"{"__type":"LiteralTO","value":"red","locations":[]}"#;
    assert_eq!(
        deserialize(wire).unwrap().as_literal().map(|l| l.value.clone()),
        Some(LiteralValue::from("red"))
    );
    let wire = r#"{"__type":"LiteralTO","value":false}"#;
    assert_eq!(
        deserialize(wire).unwrap().as_literal().map(|l| l.value.clone()),
        Some(LiteralValue::Boolean(false))
    );
}

#[test]
fn test_round_trip_preserves_structure() {
    let union = TypeObject::Union(UnionType {
        type_name: "Color | null | 3".to_string(),
        members: UnionMembers::new(
            TypeObject::Enum(EnumType {
                type_name: "Color".to_string(),
                members: vec![EnumMember {
                    name: "Red".to_string(),
                    value: LiteralType {
                        value: LiteralValue::from("red"),
                        locations: vec![location()],
                    },
                }],
                locations: vec![location()],
            }),
            TypeObject::special(SpecialKind::Null, Vec::new()),
            vec![TypeObject::literal(LiteralValue::Number(3.0), Vec::new())],
        ),
        locations: Vec::new(),
    });
    let tuple = TypeObject::Tuple(TupleType {
        type_name: "[Color | null | 3, string[]]".to_string(),
        items: vec![
            union,
            TypeObject::Array(ArrayType {
                type_name: "string[]".to_string(),
                child: Box::new(TypeObject::primitive(PrimitiveKind::String, Vec::new())),
                locations: Vec::new(),
            }),
        ],
        locations: Vec::new(),
    });

    let wire = serialize(&tuple).unwrap();
    assert_eq!(deserialize(&wire).unwrap(), tuple);
    let pretty = serialize::serialize_pretty(&tuple).unwrap();
    assert_eq!(deserialize(&pretty).unwrap(), tuple);
}

#[test]
fn test_rejects_narrow_unions_and_unknown_tags() {
    let one_member = json!({
        "__type": "UnionTO",
        "typeName": "string",
        "members": [{ "__type": "PrimitiveTO", "kind": "string", "locations": [] }],
        "locations": []
    });
    assert!(serialize::from_value(one_member).is_err());

    let unknown = json!({ "__type": "IntersectionTO", "locations": [] });
    let err = serialize::from_value(unknown).unwrap_err();
    assert!(err.to_string().contains("IntersectionTO"));
}

#[test]
fn test_extracted_declarations_round_trip() {
    let src = "export interface User { id: string }\n";
    let mut fx = Fixture::new("user.ts", src);
    let file = fx.file;
    let string = fx.intrinsic("string");
    let id = fx.property(file, "id: string", 0, "id", string, None);
    let user = fx.object(TypeRecord::new("User", TypeKind::Object).with_properties(vec![id]));
    fx.interface(file, src.trim_end(), "User", user);

    let mut session = Session::new(&fx.program);
    let declarations = session.extract_types("user.ts", true).unwrap();
    let wire = serde_json::to_string(&declarations).unwrap();
    assert!(wire.contains("\"declaredName\":\"User\""));
    let back: Vec<TypeDeclaration> = serde_json::from_str(&wire).unwrap();
    assert_eq!(back, declarations);

    // the key survives the wire and still resolves in the session
    let key = back[0].ty.store_key().unwrap();
    let props = session.get_object_props(key);
    assert_eq!(props[0].prop_name, "id");
    let wire = serde_json::to_value(&props).unwrap();
    assert_eq!(wire[0]["propName"], "id");
    assert_eq!(wire[0]["type"]["__type"], "PrimitiveTO");
}
