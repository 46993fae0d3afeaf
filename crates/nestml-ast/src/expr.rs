//! Expression trees.
//!
//! Only [`Variable`] occurrences matter to the definition-order check; the
//! remaining variants exist so that references nested anywhere in an
//! initializer are found.

use crate::position::Span;
use serde::{Deserialize, Serialize};

/// Character that marks one order of differentiation in a name (`g_in''`).
pub const DIFFERENTIATION_MARK: char = '\'';

/// One occurrence of a variable name.
///
/// `name` is the raw text as written, including any differentiation marks.
/// `span` is the position of this occurrence, not of the declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub span: Span,
}

impl Variable {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Number of differentiation marks in the name.
    pub fn differential_order(&self) -> usize {
        self.name
            .chars()
            .filter(|&c| c == DIFFERENTIATION_MARK)
            .count()
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Left-hand side of an ODE: a base name differentiated `order` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivative {
    pub name: String,
    pub order: usize,
    pub span: Span,
}

impl Derivative {
    pub fn new(name: impl Into<String>, order: usize, span: Span) -> Self {
        Self {
            name: name.into(),
            order,
            span,
        }
    }

    /// Source text of the derivative: the base name followed by `order` marks.
    pub fn raw_name(&self) -> String {
        let mut raw = String::with_capacity(self.name.len() + self.order);
        raw.push_str(&self.name);
        raw.extend(std::iter::repeat_n(DIFFERENTIATION_MARK, self.order));
        raw
    }
}

impl std::fmt::Display for Derivative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// Numeric literal, optionally carrying a physical unit (`10 mV`).
    Number {
        value: f64,
        #[serde(default)]
        unit: Option<String>,
        span: Span,
    },
    Boolean {
        value: bool,
        span: Span,
    },
    String {
        value: String,
        span: Span,
    },
    Variable(Variable),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    /// `condition ? consequent : alternative`
    Conditional {
        condition: Box<Expr>,
        consequent: Box<Expr>,
        alternative: Box<Expr>,
        span: Span,
    },
    /// Function call. The callee name is not a variable reference.
    Call {
        function: String,
        args: Vec<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn variable(name: impl Into<String>, span: Span) -> Self {
        Expr::Variable(Variable::new(name, span))
    }

    pub fn number(value: f64, span: Span) -> Self {
        Expr::Number {
            value,
            unit: None,
            span,
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, span: Span) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Number { span, .. }
            | Expr::Boolean { span, .. }
            | Expr::String { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Conditional { span, .. }
            | Expr::Call { span, .. } => *span,
            Expr::Variable(var) => var.span,
        }
    }

    /// Every variable occurrence in this tree, in source order.
    ///
    /// A name used twice appears twice.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a Variable>) {
        match self {
            Expr::Number { .. } | Expr::Boolean { .. } | Expr::String { .. } => {}
            Expr::Variable(var) => out.push(var),
            Expr::Unary { operand, .. } => operand.collect_variables(out),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(out);
                rhs.collect_variables(out);
            }
            Expr::Conditional {
                condition,
                consequent,
                alternative,
                ..
            } => {
                condition.collect_variables(out);
                consequent.collect_variables(out);
                alternative.collect_variables(out);
            }
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.collect_variables(out);
                }
            }
        }
    }
}
