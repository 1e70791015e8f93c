//! Opaque handles into a checker's program.
//!
//! Handles are only meaningful for the checker that produced them.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

define_id!(
    /// A source unit known to the checker.
    FileId,
    "file"
);
define_id!(
    /// A syntax node.
    NodeId,
    "node"
);
define_id!(
    /// A declared entity (type alias, variable, property, enum member, ...).
    SymbolId,
    "symbol"
);
define_id!(
    /// A resolved type.
    TypeId,
    "type"
);
define_id!(
    /// A call signature.
    SignatureId,
    "signature"
);

impl TypeId {
    /// Slot reserved for the error type in checkers that intern types.
    pub const ERROR: TypeId = TypeId(0);
}
