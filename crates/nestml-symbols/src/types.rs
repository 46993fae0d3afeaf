//! Type symbols and their built-in methods.

use crate::symbol::SymbolKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Physical unit type (`mV`, `nS`, ...).
    Unit,
    /// `real`, `integer`, `boolean`, `string`, `void`.
    Primitive,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Unit => f.write_str("unit"),
            TypeKind::Primitive => f.write_str("primitive"),
        }
    }
}

/// A built-in method a type supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSymbol {
    pub name: String,
    #[serde(default)]
    pub parameter_types: Vec<String>,
    pub return_type: String,
}

impl MethodSymbol {
    pub fn new(
        name: impl Into<String>,
        parameter_types: Vec<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_types,
            return_type: return_type.into(),
        }
    }
}

/// A named type with its own registry of built-in methods.
///
/// Each instance owns its registry: methods added to one type symbol are
/// never visible through another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSymbol {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    builtin_methods: Vec<MethodSymbol>,
}

impl TypeSymbol {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            builtin_methods: Vec::new(),
        }
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Primitive)
    }

    pub fn unit(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Unit)
    }

    pub fn symbol_kind(&self) -> SymbolKind {
        SymbolKind::Type
    }

    pub fn add_builtin_method(&mut self, method: MethodSymbol) {
        self.builtin_methods.push(method);
    }

    /// First built-in method registered under `name`.
    ///
    /// Lookup is by name only; overloads with different parameter types
    /// are not told apart.
    // TODO: match on parameter types once call sites carry argument types.
    pub fn builtin_method(&self, name: &str) -> Option<&MethodSymbol> {
        self.builtin_methods.iter().find(|m| m.name == name)
    }

    pub fn builtin_methods(&self) -> &[MethodSymbol] {
        &self.builtin_methods
    }
}

impl std::fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeSymbol({},{})", self.name, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_methods_are_per_instance() {
        let mut string = TypeSymbol::primitive("string");
        let real = TypeSymbol::primitive("real");

        string.add_builtin_method(MethodSymbol::new("length", vec![], "integer"));

        assert!(string.builtin_method("length").is_some());
        assert!(real.builtin_method("length").is_none());
        assert!(real.builtin_methods().is_empty());
    }

    #[test]
    fn builtin_lookup_returns_first_match_by_name() {
        let mut t = TypeSymbol::unit("mV");
        t.add_builtin_method(MethodSymbol::new("scale", vec!["real".into()], "mV"));
        t.add_builtin_method(MethodSymbol::new("scale", vec!["integer".into()], "mV"));

        let found = t.builtin_method("scale").unwrap();
        assert_eq!(found.parameter_types, vec!["real".to_string()]);
        assert_eq!(t.symbol_kind(), SymbolKind::Type);
    }

    #[test]
    fn display_names_type_and_kind() {
        assert_eq!(TypeSymbol::unit("nS").to_string(), "TypeSymbol(nS,unit)");
    }
}
