//! Source positions, spans and scope references.

use serde::{Deserialize, Serialize};

/// A (line, column) pair in a model file.
///
/// Ordering is lexicographic: line first, then column. Every "before/after"
/// decision in the semantic passes goes through this ordering.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start and end position of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl Span {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    /// Span on a single line, from `start_column` to `end_column`.
    pub fn on_line(line: u32, start_column: u32, end_column: u32) -> Self {
        Self {
            start: SourcePosition::new(line, start_column),
            end: SourcePosition::new(line, end_column),
        }
    }
}

/// Handle of a scope in the host's scope graph.
///
/// Nodes carry an `Option<ScopeId>`: `None` means the symbol-table creator
/// has not run over the node yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(pub usize);

impl std::fmt::Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_order_by_line_then_column() {
        let a = SourcePosition::new(2, 30);
        let b = SourcePosition::new(3, 1);
        let c = SourcePosition::new(3, 4);

        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
        assert_eq!(b.cmp(&SourcePosition::new(3, 1)), std::cmp::Ordering::Equal);
    }

    #[test]
    fn position_display() {
        assert_eq!(SourcePosition::new(12, 4).to_string(), "12:4");
    }

    #[test]
    fn scope_id_is_a_bare_number_on_the_wire() {
        let json = serde_json::to_string(&ScopeId(3)).unwrap();
        assert_eq!(json, "3");
    }
}
