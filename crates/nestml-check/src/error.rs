//! Error types for the checker.
//!
//! These are host-side failures. Problems in the checked model are reported
//! as diagnostics, never as errors.

use nestml_ast::{ScopeId, SourcePosition};

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// A node reached the checker before the symbol-table creator ran.
    #[error("node at {position} has no enclosing scope; run the symbol table creator first")]
    MissingScope { position: SourcePosition },

    /// A node refers to a scope the resolver does not know.
    #[error("node at {position} refers to {scope}, which the symbol table does not contain")]
    UnknownScope {
        scope: ScopeId,
        position: SourcePosition,
    },

    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
