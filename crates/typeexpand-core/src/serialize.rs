//! Wire form of the type-object graph.
//!
//! Every variant carries its `__type` discriminant, so a JSON document can be
//! decoded back into a `TypeObject` without outside context.

use crate::error::SerializeError;
use crate::type_object::TypeObject;

pub fn serialize(ty: &TypeObject) -> Result<String, SerializeError> {
    Ok(serde_json::to_string(ty)?)
}

pub fn serialize_pretty(ty: &TypeObject) -> Result<String, SerializeError> {
    Ok(serde_json::to_string_pretty(ty)?)
}

pub fn deserialize(wire: &str) -> Result<TypeObject, SerializeError> {
    Ok(serde_json::from_str(wire)?)
}

pub fn to_value(ty: &TypeObject) -> Result<serde_json::Value, SerializeError> {
    Ok(serde_json::to_value(ty)?)
}

pub fn from_value(value: serde_json::Value) -> Result<TypeObject, SerializeError> {
    Ok(serde_json::from_value(value)?)
}
