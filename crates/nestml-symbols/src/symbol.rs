//! Variable symbols.

use nestml_ast::SourcePosition;
use serde::{Deserialize, Serialize};

/// Which model block a variable was declared in.
///
/// Opaque to the semantic checks; carried through for code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    State,
    Parameter,
    Internal,
    Local,
    Input,
    Output,
    Equation,
    /// Built into the language (`t`, `e`, ...).
    Predefined,
}

/// Classification of symbol-table entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Variable,
    Type,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Variable => f.write_str("variable"),
            SymbolKind::Type => f.write_str("type"),
        }
    }
}

/// A variable entry in the scope graph.
///
/// `declaring_position` is the start of the declaration that introduced the
/// variable and never changes after the graph is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableSymbol {
    pub name: String,
    pub declaring_position: SourcePosition,
    pub block_type: BlockType,
}

impl VariableSymbol {
    pub fn new(
        name: impl Into<String>,
        declaring_position: SourcePosition,
        block_type: BlockType,
    ) -> Self {
        Self {
            name: name.into(),
            declaring_position,
            block_type,
        }
    }

    pub fn kind(&self) -> SymbolKind {
        SymbolKind::Variable
    }
}
