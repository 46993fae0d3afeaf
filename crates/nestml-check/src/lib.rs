//! # NESTML context conditions
//!
//! Checks that run over statement nodes after the symbol table is built.
//! The one condition implemented here is definition order: a variable may
//! only be used at a position after its declaration, and a declaration's
//! initializer may not mention the names the declaration introduces.
//!
//! ## Architecture
//!
//! ```text
//! check_statements      ← walks a block, descends into nested bodies
//!     │
//! Checkable             ← declaration | assignment | for (closed set)
//!     │
//! DefinitionOrder       ← one check per variant + shared ordering rule
//!     │
//! ScopeResolution       ← symbol lookup (nestml-symbols)
//! DiagnosticSink        ← where findings go; checking never stops on them
//! ```
//!
//! Findings are [`Diagnostic`]s with stable codes. Broken preconditions
//! (a node without an enclosing scope) are [`CheckError`]s instead.

pub mod config;
pub mod definition_order;
pub mod diagnostic;
pub mod error;
pub mod walk;

pub use config::{CheckConfig, DefinitionOrderConfig};
pub use definition_order::{Checkable, DefinitionOrder};
pub use diagnostic::{
    Diagnostic, DiagnosticKind, DiagnosticSink, Diagnostics, DiagnosticsReport, Severity,
    TracingSink, code,
};
pub use error::CheckError;
pub use walk::{check_statements, check_unit};
