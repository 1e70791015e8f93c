//! Session: the context every projection runs in.
//!
//! A session borrows one checker snapshot and owns the object store that
//! backs the store keys it hands out. Top-level calls (`convert_type`,
//! `extract_types`, `type_at_position`) start a fresh store generation, so a
//! key is valid until the next top-level call on the same session. Hosts that
//! serve requests in parallel give each request its own session.

use crate::error::ExtractError;
use crate::store::ObjectStore;
use crate::type_object::TypeObject;
use tracing::debug;
use typeexpand_checker::{NodeId, TypeChecker};
use typeexpand_common::Position;

pub struct Session<'c, C: TypeChecker + ?Sized> {
    pub(crate) checker: &'c C,
    pub(crate) store: ObjectStore,
    /// Current classification nesting.
    pub(crate) depth: u32,
}

impl<'c, C: TypeChecker + ?Sized> Session<'c, C> {
    pub fn new(checker: &'c C) -> Self {
        Session {
            checker,
            store: ObjectStore::new(),
            depth: 0,
        }
    }

    pub fn checker(&self) -> &'c C {
        self.checker
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Point the session at a newer snapshot of the program. Keys minted
    /// against the previous snapshot stop resolving.
    pub fn set_checker(&mut self, checker: &'c C) {
        self.checker = checker;
        self.reset();
    }

    /// Start a new store generation.
    pub fn reset(&mut self) {
        self.store.reset();
        self.depth = 0;
    }

    /// Classify the type at `node`, using `node` as the syntactic anchor.
    pub fn convert_type(&mut self, node: NodeId) -> TypeObject {
        self.reset();
        let ty = self.checker.type_at_location(node);
        debug!(node = %node, ty = %ty, "convert_type");
        self.classify(ty, Some(node))
    }

    /// The type under a cursor, named by the symbol found there.
    pub fn type_at_position(
        &mut self,
        file_name: &str,
        position: Position,
    ) -> Result<(Option<String>, TypeObject), ExtractError> {
        let file = self
            .checker
            .source_file(file_name)
            .ok_or_else(|| ExtractError::FileNotFound {
                file_name: file_name.to_string(),
            })?;
        let node_not_found = || ExtractError::NodeNotFound {
            file_name: file_name.to_string(),
            position,
        };
        let offset = self
            .checker
            .position_to_offset(file, position)
            .ok_or_else(node_not_found)?;
        let node = self
            .checker
            .node_at_offset(file, offset)
            .ok_or_else(node_not_found)?;

        let name = self
            .checker
            .symbol_at_location(node)
            .or_else(|| self.checker.declared_symbol(node))
            .and_then(|symbol| self.checker.symbol_name(symbol));

        Ok((name, self.convert_type(node)))
    }
}
