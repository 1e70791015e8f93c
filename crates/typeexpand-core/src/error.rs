//! Error types for extraction and serialization.
//!
//! Expected failures are values with a closed set of reasons. Unsupported
//! types are not errors at all; they become `Unsupported` leaves.

use std::fmt;
use typeexpand_common::Position;

/// Why a named re-export could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportErrorReason {
    /// The export declaration has no `from "..."` clause.
    MissingModuleSpecifier,
    /// The containing file has no module resolution table.
    ResolvedModulesNotFound,
    /// The resolution table has no entry for the specifier.
    ModuleNotFound,
    /// The resolved file is not part of the program.
    ModuleFileNotFound,
    /// `export * from` / `export * as ns from`.
    NotNamedExport,
    Unknown,
}

impl ExportErrorReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportErrorReason::MissingModuleSpecifier => "missingModuleSpecifier",
            ExportErrorReason::ResolvedModulesNotFound => "resolvedModulesNotFound",
            ExportErrorReason::ModuleNotFound => "moduleNotFound",
            ExportErrorReason::ModuleFileNotFound => "moduleFileNotFound",
            ExportErrorReason::NotNamedExport => "notNamedExport",
            ExportErrorReason::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ExportErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportError {
    pub reason: ExportErrorReason,
    pub module_specifier: Option<String>,
}

impl ExportError {
    pub fn new(reason: ExportErrorReason, module_specifier: Option<String>) -> Self {
        ExportError {
            reason,
            module_specifier,
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module_specifier {
            Some(specifier) => write!(f, "re-export from '{}' failed: {}", specifier, self.reason),
            None => write!(f, "re-export failed: {}", self.reason),
        }
    }
}

impl std::error::Error for ExportError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    FileNotFound {
        file_name: String,
    },
    NodeNotFound {
        file_name: String,
        position: Position,
    },
    /// A single re-export failed. The driver drops the declaration and keeps
    /// going; this only escapes when re-export resolution is called directly.
    Export(ExportError),
    /// The checker handed back something that breaks a structural guarantee.
    /// Fatal for the request that hit it.
    InvariantViolation {
        file_name: String,
        declaration_kind: &'static str,
        message: String,
    },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::FileNotFound { file_name } => {
                write!(f, "file not found: {file_name}")
            }
            ExtractError::NodeNotFound {
                file_name,
                position,
            } => write!(
                f,
                "no node at {}:{}:{}",
                file_name, position.line, position.character
            ),
            ExtractError::Export(err) => err.fmt(f),
            ExtractError::InvariantViolation {
                file_name,
                declaration_kind,
                message,
            } => write!(
                f,
                "invariant violated in {file_name} ({declaration_kind}): {message}"
            ),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Export(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExportError> for ExtractError {
    fn from(err: ExportError) -> Self {
        ExtractError::Export(err)
    }
}

#[derive(Debug)]
pub struct SerializeError(serde_json::Error);

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type object (de)serialization failed: {}", self.0)
    }
}

impl std::error::Error for SerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for SerializeError {
    fn from(err: serde_json::Error) -> Self {
        SerializeError(err)
    }
}
