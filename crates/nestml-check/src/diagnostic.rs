//! Diagnostics and the sinks that receive them.
//!
//! Codes are stable strings so downstream tooling can match on them. Each
//! diagnostic also carries a deterministic id:
//!
//! 1. Build the canonical key `{code, column, kind, line, subject}`
//! 2. Serialize it as compact JSON (keys sorted)
//! 3. id = "d1_" || hex_lower(SHA256(key)[..12])
//!
//! The same finding at the same place always gets the same id, across runs
//! and across hosts.

use nestml_ast::SourcePosition;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

/// Stable diagnostic codes.
pub mod code {
    /// A use precedes the declaration, or an initializer mentions a name its
    /// own declaration introduces.
    pub const VAR_NOT_DEFINED_BEFORE_USE: &str = "VAR_NOT_DEFINED_BEFORE_USE";
    /// A name has no symbol anywhere in the scope chain.
    pub const VAR_UNRESOLVED: &str = "VAR_UNRESOLVED";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// What went wrong. Fixes the code and severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The use is strictly before the resolved symbol's declaration.
    UseBeforeDefinition,
    /// A declaration's initializer mentions a name the same declaration
    /// introduces (`x real = 2 * x`, or a co-declared sibling).
    SelfReferentialDeclaration,
    /// No symbol for the name in the scope chain.
    UnresolvedVariable,
}

impl DiagnosticKind {
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::UseBeforeDefinition | DiagnosticKind::SelfReferentialDeclaration => {
                code::VAR_NOT_DEFINED_BEFORE_USE
            }
            DiagnosticKind::UnresolvedVariable => code::VAR_UNRESOLVED,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::UseBeforeDefinition | DiagnosticKind::SelfReferentialDeclaration => {
                Severity::Error
            }
            DiagnosticKind::UnresolvedVariable => Severity::Warning,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::UseBeforeDefinition => "use_before_definition",
            DiagnosticKind::SelfReferentialDeclaration => "self_referential_declaration",
            DiagnosticKind::UnresolvedVariable => "unresolved_variable",
        }
    }
}

/// One finding of a context condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Deterministic fingerprint, see the module docs.
    pub id: String,
    pub code: String,
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// The variable name the finding is about.
    pub subject: String,
    pub message: String,
    pub position: SourcePosition,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        subject: impl Into<String>,
        message: impl Into<String>,
        position: SourcePosition,
    ) -> Self {
        let subject = subject.into();
        let code = kind.code();
        Self {
            id: compute_diagnostic_id(code, kind, &subject, position),
            code: code.to_string(),
            severity: kind.severity(),
            kind,
            subject,
            message: message.into(),
            position,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.code, self.position, self.message
        )
    }
}

/// Compute the fingerprint of a diagnostic.
pub fn compute_diagnostic_id(
    code: &str,
    kind: DiagnosticKind,
    subject: &str,
    position: SourcePosition,
) -> String {
    // serde_json's default map is ordered, so the key text is canonical.
    let key: Value = json!({
        "code": code,
        "column": position.column,
        "kind": kind.as_str(),
        "line": position.line,
        "subject": subject,
    });
    let hash = Sha256::digest(key.to_string().as_bytes());
    let mut id = String::from("d1_");
    for byte in &hash[..12] {
        id.push_str(&format!("{byte:02x}"));
    }
    id
}

/// Receiver of diagnostics. Append-only.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Collects the diagnostics of one compilation unit, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.items.iter().filter(move |d| d.code == code)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }

    pub fn report(&self) -> DiagnosticsReport {
        DiagnosticsReport {
            errors: self.error_count(),
            warnings: self.warning_count(),
            diagnostics: self.items.clone(),
        }
    }
}

impl DiagnosticSink for Diagnostics {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Machine-readable summary of a checked unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub errors: usize,
    pub warnings: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Forwards every diagnostic to `tracing` at the matching level.
#[derive(Debug, Default)]
pub struct TracingSink {
    emitted: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.emitted += 1;
        match diagnostic.severity {
            Severity::Error => tracing::error!(
                code = %diagnostic.code,
                position = %diagnostic.position,
                id = %diagnostic.id,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => tracing::warn!(
                code = %diagnostic.code,
                position = %diagnostic.position,
                id = %diagnostic.id,
                "{}",
                diagnostic.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unresolved(name: &str, line: u32, column: u32) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::UnresolvedVariable,
            name,
            format!("Variable '{name}' couldn't be resolved."),
            SourcePosition::new(line, column),
        )
    }

    #[test]
    fn kinds_map_to_stable_codes() {
        assert_eq!(
            DiagnosticKind::UseBeforeDefinition.code(),
            "VAR_NOT_DEFINED_BEFORE_USE"
        );
        assert_eq!(
            DiagnosticKind::SelfReferentialDeclaration.code(),
            "VAR_NOT_DEFINED_BEFORE_USE"
        );
        assert_eq!(DiagnosticKind::UnresolvedVariable.code(), "VAR_UNRESOLVED");
        assert_eq!(
            DiagnosticKind::UnresolvedVariable.severity(),
            Severity::Warning
        );
        assert!(Severity::Error > Severity::Warning);
    }

    #[test]
    fn ids_are_deterministic_and_position_sensitive() {
        let a = unresolved("x", 3, 4);
        let b = unresolved("x", 3, 4);
        let c = unresolved("x", 3, 5);
        let d = unresolved("y", 3, 4);

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_ne!(a.id, d.id);
        assert!(a.id.starts_with("d1_"));
        assert_eq!(a.id.len(), 3 + 24);
    }

    #[test]
    fn collector_counts_by_severity() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.emit(unresolved("a", 1, 1));
        diagnostics.emit(Diagnostic::new(
            DiagnosticKind::UseBeforeDefinition,
            "b",
            "Variable 'b' not defined yet. It is defined at line 9.",
            SourcePosition::new(2, 10),
        ));

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(diagnostics.warning_count(), 1);
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.with_code(code::VAR_UNRESOLVED).count(), 1);

        let report = diagnostics.report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["errors"], 1);
        assert_eq!(json["diagnostics"][1]["kind"], "use_before_definition");
        assert_eq!(json["diagnostics"][0]["position"]["line"], 1);
    }

    #[test]
    fn display_shows_severity_code_and_position() {
        insta::assert_snapshot!(
            unresolved("g_ex", 14, 9).to_string(),
            @"warning[VAR_UNRESOLVED] 14:9: Variable 'g_ex' couldn't be resolved."
        );
    }

    #[test]
    fn tracing_sink_counts_what_it_forwards() {
        let mut sink = TracingSink::new();
        sink.emit(unresolved("a", 1, 1));
        sink.emit(unresolved("b", 2, 1));
        assert_eq!(sink.emitted(), 2);
    }

    #[test]
    fn vec_and_reborrowed_sinks_append() {
        fn emit_into(mut sink: impl DiagnosticSink) {
            sink.emit(unresolved("a", 1, 1));
        }

        let mut vec: Vec<Diagnostic> = Vec::new();
        emit_into(&mut vec);
        vec.emit(unresolved("b", 1, 2));
        assert_eq!(vec.len(), 2);
    }
}
