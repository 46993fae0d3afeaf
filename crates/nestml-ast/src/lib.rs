//! # NESTML AST
//!
//! The node shapes the semantic passes consume. Parsing and symbol-table
//! construction happen upstream; by the time a node reaches this crate's
//! consumers it carries its [`Span`] and a back-reference to its enclosing
//! scope.
//!
//! ```text
//! Stmt            ← declaration | assignment | for | while | if | return | call
//!     │
//! Expr            ← literals, variables, operators, calls
//!     │
//! Variable        ← one occurrence of a name, with its own span
//! ```

pub mod expr;
pub mod position;
pub mod stmt;

pub use expr::{BinaryOp, DIFFERENTIATION_MARK, Derivative, Expr, UnaryOp, Variable};
pub use position::{ScopeId, SourcePosition, Span};
pub use stmt::{
    AssignOp, Assignment, CallStmt, Declaration, ElifClause, ForStmt, IfStmt, ReturnStmt, Stmt,
    WhileStmt,
};
