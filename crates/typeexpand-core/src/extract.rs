//! Declaration extraction and re-export resolution.

use crate::error::{ExportError, ExportErrorReason, ExtractError};
use crate::session::Session;
use crate::type_object::TypeDeclaration;
use tracing::{debug, error, warn};
use typeexpand_checker::{ExportClause, FileId, ModuleLookup, NodeId, SyntaxNode, TypeChecker};
use typeexpand_common::limits::MAX_REEXPORT_DEPTH;

/// Extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Drop declarations whose alias is instantiated with bare type
    /// parameters (`type Box<T> = { value: T }`).
    pub skip_unresolved_generics: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            skip_unresolved_generics: true,
        }
    }
}

/// Top-level statements that produce declarations.
fn is_extractable(syntax: &SyntaxNode) -> bool {
    match syntax {
        SyntaxNode::VariableStatement { .. }
        | SyntaxNode::VariableDeclaration { .. }
        | SyntaxNode::ExportDeclaration { .. }
        | SyntaxNode::EnumDeclaration { .. } => true,
        SyntaxNode::TypeAliasDeclaration { exported, .. }
        | SyntaxNode::InterfaceDeclaration { exported, .. } => *exported,
        _ => false,
    }
}

impl<'c, C: TypeChecker + ?Sized> Session<'c, C> {
    /// Project every extractable top-level declaration of `file_name`.
    pub fn extract_types(
        &mut self,
        file_name: &str,
        skip_unresolved_generics: bool,
    ) -> Result<Vec<TypeDeclaration>, ExtractError> {
        self.extract_types_with(
            file_name,
            ExtractOptions {
                skip_unresolved_generics,
            },
        )
    }

    pub fn extract_types_with(
        &mut self,
        file_name: &str,
        options: ExtractOptions,
    ) -> Result<Vec<TypeDeclaration>, ExtractError> {
        self.reset();
        let mut chain = Vec::new();
        self.extract_file(file_name, options, &mut chain)
    }

    /// Resolve one `export { ... } from "..."` statement to the declarations
    /// it re-exports, renamed to their exported names.
    pub fn resolve_reexport(
        &mut self,
        export_declaration: NodeId,
        options: ExtractOptions,
    ) -> Result<Vec<TypeDeclaration>, ExtractError> {
        self.reset();
        let file = self.checker.node_file(export_declaration);
        let file_name = file.and_then(|file| self.checker.file_name(file));
        let (Some(file), Some(file_name)) = (file, file_name) else {
            return Err(ExtractError::FileNotFound {
                file_name: format!("<file of {export_declaration}>"),
            });
        };
        let Some(SyntaxNode::ExportDeclaration {
            module_specifier,
            clause,
        }) = self.checker.node(export_declaration)
        else {
            error!(
                file = %file_name,
                kind = "ExportDeclaration",
                node = %export_declaration,
                "re-export target is not an export declaration"
            );
            return Err(ExtractError::InvariantViolation {
                file_name,
                declaration_kind: "ExportDeclaration",
                message: format!("{export_declaration} is not an export declaration"),
            });
        };
        let mut chain = vec![file];
        self.reexported_types(
            file,
            module_specifier.as_deref(),
            clause.as_ref(),
            options,
            &mut chain,
        )
    }

    fn extract_file(
        &mut self,
        file_name: &str,
        options: ExtractOptions,
        chain: &mut Vec<FileId>,
    ) -> Result<Vec<TypeDeclaration>, ExtractError> {
        let file = self
            .checker
            .source_file(file_name)
            .ok_or_else(|| ExtractError::FileNotFound {
                file_name: file_name.to_string(),
            })?;
        debug!(file = file_name, depth = chain.len(), "extract_types");

        chain.push(file);
        let result = self.extract_statements(file, file_name, options, chain);
        chain.pop();
        result
    }

    fn extract_statements(
        &mut self,
        file: FileId,
        file_name: &str,
        options: ExtractOptions,
        chain: &mut Vec<FileId>,
    ) -> Result<Vec<TypeDeclaration>, ExtractError> {
        let mut declarations = Vec::new();

        for statement in self.checker.statements(file) {
            let Some(syntax) = self.checker.node(statement) else {
                continue;
            };
            if !is_extractable(&syntax) {
                continue;
            }
            let is_export = matches!(syntax, SyntaxNode::ExportDeclaration { .. });
            if options.skip_unresolved_generics && !is_export && self.has_unresolved_generics(statement) {
                debug!(file = file_name, kind = syntax.kind_name(), "skipping unresolved generic");
                continue;
            }

            match syntax {
                SyntaxNode::ExportDeclaration {
                    module_specifier,
                    clause,
                } => match self.reexported_types(
                    file,
                    module_specifier.as_deref(),
                    clause.as_ref(),
                    options,
                    chain,
                ) {
                    Ok(reexported) => declarations.extend(reexported),
                    Err(ExtractError::Export(err)) => {
                        warn!(file = file_name, reason = %err.reason, "skipping re-export: {err}");
                    }
                    Err(err) => return Err(err),
                },
                SyntaxNode::VariableStatement {
                    declarations: variables,
                    ..
                } => {
                    if variables.is_empty() {
                        error!(file = file_name, "variable statement without declarations");
                        return Err(ExtractError::InvariantViolation {
                            file_name: file_name.to_string(),
                            declaration_kind: "VariableStatement",
                            message: "variable statement has no declarations".to_string(),
                        });
                    }
                    for variable in variables {
                        declarations.push(self.variable_declaration(variable));
                    }
                }
                SyntaxNode::VariableDeclaration { .. } => {
                    declarations.push(self.variable_declaration(statement));
                }
                _ => {
                    let declared_name = self
                        .checker
                        .declared_symbol(statement)
                        .and_then(|symbol| self.checker.symbol_name(symbol));
                    let ty = self.checker.type_at_location(statement);
                    declarations.push(TypeDeclaration {
                        declared_name,
                        ty: self.classify(ty, Some(statement)),
                    });
                }
            }
        }

        Ok(declarations)
    }

    fn variable_declaration(&mut self, variable: NodeId) -> TypeDeclaration {
        let declared_name = match self.checker.node(variable) {
            Some(SyntaxNode::VariableDeclaration { name, .. }) => Some(name),
            _ => self
                .checker
                .declared_symbol(variable)
                .and_then(|symbol| self.checker.symbol_name(symbol)),
        };
        let ty = self.checker.type_at_location(variable);
        TypeDeclaration {
            declared_name,
            ty: self.classify(ty, Some(variable)),
        }
    }

    /// True when the declared type is an alias instantiated with at least
    /// one bare type parameter.
    fn has_unresolved_generics(&self, statement: NodeId) -> bool {
        let ty = self.checker.type_at_location(statement);
        self.checker
            .alias_type_arguments(ty)
            .into_iter()
            .any(|argument| self.checker.is_type_parameter(argument))
    }

    fn reexported_types(
        &mut self,
        file: FileId,
        module_specifier: Option<&str>,
        clause: Option<&ExportClause>,
        options: ExtractOptions,
        chain: &mut Vec<FileId>,
    ) -> Result<Vec<TypeDeclaration>, ExtractError> {
        let Some(specifier) = module_specifier.map(|s| s.trim_matches(['"', '\'']).to_string()) else {
            return Err(ExportError::new(ExportErrorReason::MissingModuleSpecifier, None).into());
        };
        let fail = |reason| -> ExtractError { ExportError::new(reason, Some(specifier.clone())).into() };

        let target_name = match self.checker.resolved_module(file, &specifier) {
            ModuleLookup::TableMissing => return Err(fail(ExportErrorReason::ResolvedModulesNotFound)),
            ModuleLookup::NotFound => return Err(fail(ExportErrorReason::ModuleNotFound)),
            ModuleLookup::Resolved(target_name) => target_name,
        };
        let Some(target) = self.checker.source_file(&target_name) else {
            return Err(fail(ExportErrorReason::ModuleFileNotFound));
        };
        if chain.contains(&target) || chain.len() >= MAX_REEXPORT_DEPTH as usize {
            warn!(module = %specifier, target = %target_name, "re-export cycle");
            return Err(fail(ExportErrorReason::Unknown));
        }

        let exported = match self.extract_file(&target_name, options, chain) {
            Ok(exported) => exported,
            Err(ExtractError::FileNotFound { .. }) => {
                return Err(fail(ExportErrorReason::ModuleFileNotFound));
            }
            Err(err) => return Err(err),
        };

        match clause {
            None => Err(fail(ExportErrorReason::Unknown)),
            Some(ExportClause::Namespace { .. }) => Err(fail(ExportErrorReason::NotNamedExport)),
            Some(ExportClause::Named { elements }) => Ok(elements
                .iter()
                .filter_map(|element| {
                    exported
                        .iter()
                        .find(|declaration| declaration.declared_name.as_deref() == Some(element.source_name()))
                        .map(|declaration| TypeDeclaration {
                            declared_name: Some(element.name.clone()),
                            ty: declaration.ty.clone(),
                        })
                })
                .collect()),
        }
    }
}
