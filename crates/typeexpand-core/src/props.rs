//! Lazy expansion of object types.

use crate::classify::display_text;
use crate::session::Session;
use crate::type_object::{ArrayType, ObjectProp, TypeObject, UnsupportedKind};
use tracing::{debug, warn};
use typeexpand_checker::{NodeId, SymbolId, SyntaxNode, TypeChecker};

impl<'c, C: TypeChecker + ?Sized> Session<'c, C> {
    /// Expand the object type behind `store_key` into its properties, in
    /// checker order.
    ///
    /// Objects met while expanding get fresh keys in the same store, so a
    /// recursive type can be walked one level per call. An unknown or stale
    /// key yields a single `unknown` property.
    pub fn get_object_props(&mut self, store_key: &str) -> Vec<ObjectProp> {
        let Some(stored) = self.store.lookup(store_key) else {
            warn!(store_key, "unknown store key");
            return vec![ObjectProp {
                prop_name: "unknown".to_string(),
                ty: TypeObject::unsupported(UnsupportedKind::Prop, Vec::new()),
            }];
        };
        let object_type = stored.ty;
        debug!(store_key, ty = %object_type, "get_object_props");

        self.depth = 0;
        self.checker
            .properties_of_type(object_type)
            .into_iter()
            .map(|property| ObjectProp {
                prop_name: self
                    .checker
                    .symbol_name(property)
                    .unwrap_or_else(|| "unknown".to_string()),
                ty: self.property_type(property),
            })
            .collect()
    }

    fn property_type(&mut self, property: SymbolId) -> TypeObject {
        if let Some(template) = self.checker.mapped_type_template(property) {
            return self.classify(template, None);
        }

        if let Some(array) = self.annotated_array(property) {
            return array;
        }

        let Some(&declaration) = self.checker.symbol_declarations(property).first() else {
            return TypeObject::unsupported(UnsupportedKind::Prop, Vec::new());
        };
        let property_type = self.checker.type_of_symbol_at_location(property, declaration);
        if let Some(&signature) = self.checker.call_signatures(property_type).first() {
            let locations = self.locations_of(self.checker.type_symbol(property_type));
            return self.callable(signature, locations);
        }
        self.classify(property_type, Some(declaration))
    }

    /// A property declared as `T[]` is projected from its annotation.
    fn annotated_array(&mut self, property: SymbolId) -> Option<TypeObject> {
        let declaration = self.checker.symbol_value_declaration(property)?;
        let annotation = self.checker.node(declaration)?.type_annotation()?;
        let SyntaxNode::ArrayType { element_type } = self.checker.node(annotation)? else {
            return None;
        };
        Some(self.array_from_annotation(annotation, element_type))
    }

    fn array_from_annotation(&mut self, annotation: NodeId, element_type: NodeId) -> TypeObject {
        let locations = self.locations_of(self.node_symbol(annotation));
        let type_name = display_text(self.checker, self.checker.type_from_type_node(annotation));
        let element = self.checker.type_at_location(element_type);
        let child = self.classify(element, Some(element_type));
        TypeObject::Array(ArrayType {
            type_name,
            child: Box::new(child),
            locations,
        })
    }
}
