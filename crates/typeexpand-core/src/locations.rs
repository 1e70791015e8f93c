//! Declaration locations.
//!
//! A location is reported only when it round-trips: looking up the node at
//! the location's start must yield the same symbol again. This drops stale
//! positions from cached or synthesized declarations.

use crate::session::Session;
use crate::type_object::SourceFileLocation;
use tracing::trace;
use typeexpand_checker::{NodeId, SymbolId, TypeChecker};
use typeexpand_common::Range;

impl<'c, C: TypeChecker + ?Sized> Session<'c, C> {
    /// Verified declaration locations of `symbol`, in declaration order.
    pub(crate) fn locations_of(&self, symbol: Option<SymbolId>) -> Vec<SourceFileLocation> {
        let Some(symbol) = symbol else {
            return Vec::new();
        };
        self.checker
            .symbol_declarations(symbol)
            .into_iter()
            .filter_map(|declaration| self.declaration_location(declaration))
            .filter(|location| {
                let verified = self.location_resolves_to(location, symbol);
                if !verified {
                    trace!(
                        file = %location.file_name,
                        line = location.range.start.line,
                        symbol = %symbol,
                        "dropping unverified location"
                    );
                }
                verified
            })
            .collect()
    }

    fn declaration_location(&self, declaration: NodeId) -> Option<SourceFileLocation> {
        let span = self.checker.node_span(declaration)?;
        let file = self.checker.node_file(declaration)?;
        let file_name = self.checker.file_name(file)?;
        let start = self.checker.offset_to_position(file, span.start)?;
        let end = self.checker.offset_to_position(file, span.end)?;
        Some(SourceFileLocation {
            file_name,
            range: Range::new(start, end),
        })
    }

    /// Re-resolve the location through the program by file name.
    fn location_resolves_to(&self, location: &SourceFileLocation, symbol: SymbolId) -> bool {
        let Some(file) = self.checker.source_file(&location.file_name) else {
            return false;
        };
        let Some(offset) = self.checker.position_to_offset(file, location.range.start) else {
            return false;
        };
        self.checker
            .node_at_offset(file, offset)
            .and_then(|node| self.node_symbol(node))
            == Some(symbol)
    }

    /// The symbol a node declares, or else the one it refers to.
    pub(crate) fn node_symbol(&self, node: NodeId) -> Option<SymbolId> {
        self.checker
            .declared_symbol(node)
            .or_else(|| self.checker.symbol_at_location(node))
    }

    /// The symbol whose declarations locate a type classified at `anchor`.
    ///
    /// Synthesized anchors (no span) have none. A symbol qualifies when the
    /// checker can give it a type, or when it is a module.
    pub(crate) fn anchor_symbol(&self, anchor: Option<NodeId>) -> Option<SymbolId> {
        let anchor = anchor?;
        self.checker.node_span(anchor)?;
        let symbol = self
            .checker
            .symbol_at_location(anchor)
            .or_else(|| self.checker.declared_symbol(anchor))?;
        (self.symbol_has_type(symbol, anchor) || self.checker.symbol_is_module(symbol))
            .then_some(symbol)
    }

    fn symbol_has_type(&self, symbol: SymbolId, anchor: NodeId) -> bool {
        let checker = self.checker;
        if !checker.is_error_type(checker.type_of_symbol_at_location(symbol, anchor)) {
            return true;
        }
        let declaration = checker
            .symbol_value_declaration(symbol)
            .or_else(|| checker.symbol_declarations(symbol).first().copied());
        let declaration_type = declaration
            .map(|declaration| checker.type_of_symbol_at_location(symbol, declaration));
        if declaration_type.is_some_and(|ty| !checker.is_error_type(ty)) {
            return true;
        }
        !checker.is_error_type(checker.declared_type_of_symbol(symbol))
    }
}
