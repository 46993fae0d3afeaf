//! Error types for symbol-table construction.

use crate::symbol::SymbolKind;
use nestml_ast::ScopeId;

/// Errors raised while building a [`ScopeGraph`](crate::ScopeGraph).
#[derive(Debug, thiserror::Error)]
pub enum SymbolTableError {
    /// The scope handle does not belong to this graph.
    #[error("unknown scope: {0}")]
    UnknownScope(ScopeId),

    /// A name was defined twice in the same scope.
    #[error("{kind} '{name}' is already defined in {scope}")]
    DuplicateSymbol {
        kind: SymbolKind,
        name: String,
        scope: ScopeId,
    },
}
