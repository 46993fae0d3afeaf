//! # NESTML symbols
//!
//! The read-only view of the symbol table that semantic checks consume.
//!
//! ```text
//! ScopeResolution     ← resolve(scope, name): local scope, then ancestors
//!     │
//! ScopeGraph          ← in-memory arena of scopes (one implementation)
//!     │
//! VariableSymbol      ← name, declaring position, block type
//! TypeSymbol          ← unit/primitive type with its own built-in methods
//! ```
//!
//! Checks depend on the [`ScopeResolution`] trait only, so hosts can plug in
//! their own symbol table.

pub mod error;
pub mod scope;
pub mod symbol;
pub mod types;

pub use error::SymbolTableError;
pub use scope::{ScopeGraph, ScopeResolution};
pub use symbol::{BlockType, SymbolKind, VariableSymbol};
pub use types::{MethodSymbol, TypeKind, TypeSymbol};
