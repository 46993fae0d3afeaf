//! Scope resolution.
//!
//! A scope graph is built once, before any check runs, and is only read
//! afterwards. Resolution searches the given scope, then its parent, and so
//! on up to the root; the nearest definition wins.

use crate::error::SymbolTableError;
use crate::symbol::{SymbolKind, VariableSymbol};
use crate::types::TypeSymbol;
use nestml_ast::ScopeId;
use std::collections::BTreeMap;

/// The lookup interface semantic checks depend on.
///
/// Implementations must be side-effect free: checks call these methods
/// freely and in any order.
pub trait ScopeResolution {
    /// Nearest variable named `name`, searching `scope` then its ancestors.
    fn resolve_variable(&self, scope: ScopeId, name: &str) -> Option<&VariableSymbol>;

    /// Nearest type named `name`, searching `scope` then its ancestors.
    fn resolve_type(&self, scope: ScopeId, name: &str) -> Option<&TypeSymbol> {
        let _ = (scope, name);
        None
    }

    /// Whether `scope` is a handle this resolver knows about.
    ///
    /// Implementations that cannot tell return `true`.
    fn contains_scope(&self, scope: ScopeId) -> bool {
        let _ = scope;
        true
    }
}

#[derive(Debug, Clone, Default)]
struct ScopeData {
    parent: Option<ScopeId>,
    variables: BTreeMap<String, VariableSymbol>,
    types: BTreeMap<String, TypeSymbol>,
}

/// Arena of scopes. `ScopeId(0)` is the root.
#[derive(Debug, Clone)]
pub struct ScopeGraph {
    scopes: Vec<ScopeData>,
}

impl Default for ScopeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeGraph {
    /// A graph holding only the root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![ScopeData::default()],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Number of scopes, root included.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Open a child scope of `parent`.
    pub fn add_scope(&mut self, parent: ScopeId) -> Result<ScopeId, SymbolTableError> {
        self.data(parent)?;
        let id = ScopeId(self.scopes.len());
        self.scopes.push(ScopeData {
            parent: Some(parent),
            ..ScopeData::default()
        });
        Ok(id)
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes.get(scope.0).and_then(|s| s.parent)
    }

    /// Define a variable in `scope`. Shadowing a name from an enclosing scope
    /// is allowed; redefining it in the same scope is not.
    pub fn define_variable(
        &mut self,
        scope: ScopeId,
        symbol: VariableSymbol,
    ) -> Result<(), SymbolTableError> {
        let data = self.data_mut(scope)?;
        if data.variables.contains_key(&symbol.name) {
            return Err(SymbolTableError::DuplicateSymbol {
                kind: SymbolKind::Variable,
                name: symbol.name,
                scope,
            });
        }
        data.variables.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    pub fn define_type(
        &mut self,
        scope: ScopeId,
        symbol: TypeSymbol,
    ) -> Result<(), SymbolTableError> {
        let data = self.data_mut(scope)?;
        if data.types.contains_key(&symbol.name) {
            return Err(SymbolTableError::DuplicateSymbol {
                kind: SymbolKind::Type,
                name: symbol.name,
                scope,
            });
        }
        data.types.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Variables defined directly in `scope`, ordered by name.
    pub fn local_variables(&self, scope: ScopeId) -> impl Iterator<Item = &VariableSymbol> {
        self.scopes
            .get(scope.0)
            .into_iter()
            .flat_map(|s| s.variables.values())
    }

    fn data(&self, scope: ScopeId) -> Result<&ScopeData, SymbolTableError> {
        self.scopes
            .get(scope.0)
            .ok_or(SymbolTableError::UnknownScope(scope))
    }

    fn data_mut(&mut self, scope: ScopeId) -> Result<&mut ScopeData, SymbolTableError> {
        self.scopes
            .get_mut(scope.0)
            .ok_or(SymbolTableError::UnknownScope(scope))
    }

    /// Scopes from `scope` up to the root. Empty for an unknown handle.
    fn chain(&self, scope: ScopeId) -> impl Iterator<Item = &ScopeData> {
        let mut next = self.scopes.get(scope.0);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.parent.and_then(|p| self.scopes.get(p.0));
            Some(current)
        })
    }
}

impl ScopeResolution for ScopeGraph {
    fn resolve_variable(&self, scope: ScopeId, name: &str) -> Option<&VariableSymbol> {
        self.chain(scope).find_map(|s| s.variables.get(name))
    }

    fn resolve_type(&self, scope: ScopeId, name: &str) -> Option<&TypeSymbol> {
        self.chain(scope).find_map(|s| s.types.get(name))
    }

    fn contains_scope(&self, scope: ScopeId) -> bool {
        scope.0 < self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::BlockType;
    use nestml_ast::SourcePosition;

    fn var(name: &str, line: u32, block_type: BlockType) -> VariableSymbol {
        VariableSymbol::new(name, SourcePosition::new(line, 5), block_type)
    }

    #[test]
    fn resolution_walks_up_to_the_root() {
        let mut graph = ScopeGraph::new();
        let root = graph.root();
        let update = graph.add_scope(root).unwrap();
        let loop_body = graph.add_scope(update).unwrap();

        graph
            .define_variable(root, var("V_m", 3, BlockType::State))
            .unwrap();
        graph
            .define_variable(update, var("h", 10, BlockType::Local))
            .unwrap();

        assert_eq!(
            graph.resolve_variable(loop_body, "V_m").unwrap().block_type,
            BlockType::State
        );
        assert_eq!(graph.resolve_variable(loop_body, "h").unwrap().name, "h");
        assert!(graph.resolve_variable(root, "h").is_none());
        assert!(graph.resolve_variable(loop_body, "missing").is_none());
    }

    #[test]
    fn nearest_definition_wins() {
        let mut graph = ScopeGraph::new();
        let root = graph.root();
        let inner = graph.add_scope(root).unwrap();

        graph
            .define_variable(root, var("x", 2, BlockType::Parameter))
            .unwrap();
        graph
            .define_variable(inner, var("x", 12, BlockType::Local))
            .unwrap();

        let found = graph.resolve_variable(inner, "x").unwrap();
        assert_eq!(found.declaring_position.line, 12);
        assert_eq!(graph.resolve_variable(root, "x").unwrap().declaring_position.line, 2);
    }

    #[test]
    fn redefinition_in_one_scope_is_rejected() {
        let mut graph = ScopeGraph::new();
        let root = graph.root();
        graph
            .define_variable(root, var("x", 2, BlockType::State))
            .unwrap();

        let err = graph
            .define_variable(root, var("x", 4, BlockType::State))
            .unwrap_err();
        assert!(matches!(err, SymbolTableError::DuplicateSymbol { ref name, .. } if name == "x"));
        assert_eq!(err.to_string(), "variable 'x' is already defined in scope#0");
    }

    #[test]
    fn unknown_parent_scope_is_rejected() {
        let mut graph = ScopeGraph::new();
        let err = graph.add_scope(ScopeId(7)).unwrap_err();
        assert!(matches!(err, SymbolTableError::UnknownScope(ScopeId(7))));
        assert!(!graph.contains_scope(ScopeId(7)));
        assert!(graph.resolve_variable(ScopeId(7), "x").is_none());
    }

    #[test]
    fn types_resolve_through_the_chain() {
        let mut graph = ScopeGraph::new();
        let root = graph.root();
        let inner = graph.add_scope(root).unwrap();
        graph.define_type(root, TypeSymbol::unit("mV")).unwrap();

        assert_eq!(graph.resolve_type(inner, "mV").unwrap().name, "mV");
        assert!(graph.resolve_type(inner, "pA").is_none());
        assert!(graph.define_type(root, TypeSymbol::unit("mV")).is_err());
    }

    #[test]
    fn local_variables_lists_only_the_given_scope() {
        let mut graph = ScopeGraph::new();
        let root = graph.root();
        let inner = graph.add_scope(root).unwrap();
        graph
            .define_variable(root, var("b", 2, BlockType::State))
            .unwrap();
        graph
            .define_variable(root, var("a", 3, BlockType::State))
            .unwrap();
        graph
            .define_variable(inner, var("c", 9, BlockType::Local))
            .unwrap();

        let names: Vec<&str> = graph.local_variables(root).map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(graph.parent(inner), Some(root));
        assert_eq!(graph.parent(root), None);
        assert_eq!(graph.scope_count(), 2);
    }
}
