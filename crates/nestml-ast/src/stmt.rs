//! Statements of SPL blocks (`update`, `function` bodies, ...).

use crate::expr::{Expr, Variable};
use crate::position::{ScopeId, Span};
use serde::{Deserialize, Serialize};

/// `V_m, V_th mV = E_L + 5 mV`
///
/// `vars` is ordered and free of duplicates; the parser guarantees the
/// latter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub vars: Vec<String>,
    pub datatype: String,
    #[serde(default)]
    pub expr: Option<Expr>,
    pub span: Span,
    #[serde(default)]
    pub scope: Option<ScopeId>,
}

impl Declaration {
    /// Whether `name` is one of the names this statement declares.
    pub fn declares(&self, name: &str) -> bool {
        self.vars.iter().any(|v| v == name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignOp {
    #[default]
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

/// `lhs = rhs`, `lhs += rhs`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub lhs: Variable,
    #[serde(default)]
    pub op: AssignOp,
    pub rhs: Expr,
    pub span: Span,
    #[serde(default)]
    pub scope: Option<ScopeId>,
}

/// `for var in from ... to step step: body end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    pub var: String,
    pub from: Expr,
    pub to: Expr,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub body: Vec<Stmt>,
    pub span: Span,
    #[serde(default)]
    pub scope: Option<ScopeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub condition: Expr,
    #[serde(default)]
    pub body: Vec<Stmt>,
    pub span: Span,
    #[serde(default)]
    pub scope: Option<ScopeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElifClause {
    pub condition: Expr,
    #[serde(default)]
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: Expr,
    #[serde(default)]
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub elifs: Vec<ElifClause>,
    #[serde(default)]
    pub otherwise: Option<Vec<Stmt>>,
    pub span: Span,
    #[serde(default)]
    pub scope: Option<ScopeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    #[serde(default)]
    pub value: Option<Expr>,
    pub span: Span,
    #[serde(default)]
    pub scope: Option<ScopeId>,
}

/// A function call used as a statement (`emit_spike()`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallStmt {
    pub function: String,
    #[serde(default)]
    pub args: Vec<Expr>,
    pub span: Span,
    #[serde(default)]
    pub scope: Option<ScopeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    Declaration(Declaration),
    Assignment(Assignment),
    For(ForStmt),
    While(WhileStmt),
    If(IfStmt),
    Return(ReturnStmt),
    Call(CallStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Declaration(s) => s.span,
            Stmt::Assignment(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Call(s) => s.span,
        }
    }

    pub fn scope(&self) -> Option<ScopeId> {
        match self {
            Stmt::Declaration(s) => s.scope,
            Stmt::Assignment(s) => s.scope,
            Stmt::For(s) => s.scope,
            Stmt::While(s) => s.scope,
            Stmt::If(s) => s.scope,
            Stmt::Return(s) => s.scope,
            Stmt::Call(s) => s.scope,
        }
    }

    /// Statement blocks nested directly inside this statement, in source
    /// order.
    pub fn nested_blocks(&self) -> Vec<&[Stmt]> {
        match self {
            Stmt::For(s) => vec![s.body.as_slice()],
            Stmt::While(s) => vec![s.body.as_slice()],
            Stmt::If(s) => {
                let mut blocks = vec![s.body.as_slice()];
                blocks.extend(s.elifs.iter().map(|e| e.body.as_slice()));
                if let Some(otherwise) = &s.otherwise {
                    blocks.push(otherwise.as_slice());
                }
                blocks
            }
            Stmt::Declaration(_) | Stmt::Assignment(_) | Stmt::Return(_) | Stmt::Call(_) => {
                Vec::new()
            }
        }
    }
}
