//! Variables must be defined before they are used.
//!
//! Three statement kinds are checked:
//!
//! - `for i in ...`: the loop variable must be declared at or before the loop.
//! - `x = ...`: the assigned variable must be declared at or before its
//!   occurrence on the left-hand side.
//! - `y real = <expr>`: every variable in the initializer must be declared
//!   at or before its occurrence, and none of them may be one of the names
//!   this declaration introduces.
//!
//! "Before" is the lexicographic (line, column) order of [`SourcePosition`].
//! A use is compared by its start position against the symbol's declaring
//! position. Names the scope chain does not know produce a warning only.

use crate::config::DefinitionOrderConfig;
use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::CheckError;
use nestml_ast::{Assignment, Declaration, ForStmt, ScopeId, SourcePosition, Span, Stmt};
use nestml_symbols::ScopeResolution;

/// The statement kinds this condition applies to.
#[derive(Debug, Clone, Copy)]
pub enum Checkable<'a> {
    Declaration(&'a Declaration),
    Assignment(&'a Assignment),
    For(&'a ForStmt),
}

impl<'a> Checkable<'a> {
    /// `None` for statements the condition does not look at.
    pub fn from_stmt(stmt: &'a Stmt) -> Option<Self> {
        match stmt {
            Stmt::Declaration(s) => Some(Checkable::Declaration(s)),
            Stmt::Assignment(s) => Some(Checkable::Assignment(s)),
            Stmt::For(s) => Some(Checkable::For(s)),
            Stmt::While(_) | Stmt::If(_) | Stmt::Return(_) | Stmt::Call(_) => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Checkable::Declaration(s) => s.span,
            Checkable::Assignment(s) => s.span,
            Checkable::For(s) => s.span,
        }
    }
}

/// The definition-order condition, bound to a frozen symbol table.
pub struct DefinitionOrder<'a, S: ?Sized> {
    scopes: &'a S,
    report_unresolved: bool,
}

impl<'a, S: ScopeResolution + ?Sized> DefinitionOrder<'a, S> {
    pub fn new(scopes: &'a S) -> Self {
        Self::with_config(scopes, &DefinitionOrderConfig::default())
    }

    pub fn with_config(scopes: &'a S, config: &DefinitionOrderConfig) -> Self {
        Self {
            scopes,
            report_unresolved: config.report_unresolved,
        }
    }

    /// Check one node. Violations go to `sink`; only a broken precondition
    /// (no usable enclosing scope) returns `Err`.
    pub fn check(
        &self,
        node: Checkable<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), CheckError> {
        match node {
            Checkable::Declaration(decl) => self.check_declaration(decl, sink),
            Checkable::Assignment(assignment) => self.check_assignment(assignment, sink),
            Checkable::For(stmt) => self.check_for(stmt, sink),
        }
    }

    pub fn check_for(
        &self,
        stmt: &ForStmt,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), CheckError> {
        let scope = self.enclosing_scope(stmt.scope, stmt.span)?;
        self.check_ordering(scope, &stmt.var, stmt.span, sink);
        Ok(())
    }

    pub fn check_assignment(
        &self,
        assignment: &Assignment,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), CheckError> {
        let scope = self.enclosing_scope(assignment.scope, assignment.span)?;
        // Compared where the target occurs, reported at the statement end.
        let use_span = Span::new(assignment.lhs.span.start, assignment.span.end);
        self.check_ordering(scope, &assignment.lhs.name, use_span, sink);
        Ok(())
    }

    pub fn check_declaration(
        &self,
        decl: &Declaration,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), CheckError> {
        let scope = self.enclosing_scope(decl.scope, decl.span)?;
        let Some(expr) = &decl.expr else {
            return Ok(());
        };

        for var in expr.variables() {
            // x real = 2 * x
            if decl.declares(&var.name) {
                tracing::debug!(var = %var.name, line = decl.span.start.line, "self-referential declaration");
                sink.emit(Diagnostic::new(
                    DiagnosticKind::SelfReferentialDeclaration,
                    &var.name,
                    format!(
                        "Cannot use variable '{}' in the initializer of its own declaration.",
                        var.name
                    ),
                    decl.span.start,
                ));
                continue;
            }

            match self.scopes.resolve_variable(scope, &var.name) {
                None => self.report_unresolved(&var.name, var.span.start, sink),
                // y real = 5 * x
                // x integer = 1
                Some(symbol) if var.span.start < symbol.declaring_position => {
                    tracing::debug!(
                        var = %var.name,
                        line = var.span.start.line,
                        column = var.span.start.column,
                        declared = %symbol.declaring_position,
                        "initializer uses variable before its declaration"
                    );
                    sink.emit(Diagnostic::new(
                        DiagnosticKind::UseBeforeDefinition,
                        &var.name,
                        format!(
                            "Cannot use variable '{}' before its declaration at line {}.",
                            var.name, symbol.declaring_position.line
                        ),
                        decl.span.start,
                    ));
                }
                Some(_) => {
                    tracing::trace!(var = %var.name, "initializer reference in order");
                }
            }
        }
        Ok(())
    }

    /// The rule shared by loops and assignments: `name`, used at
    /// `use_span`, must resolve to a symbol declared at or before
    /// `use_span.start`. Violations are reported at `use_span.end`.
    pub fn check_ordering(
        &self,
        scope: ScopeId,
        name: &str,
        use_span: Span,
        sink: &mut dyn DiagnosticSink,
    ) {
        match self.scopes.resolve_variable(scope, name) {
            Some(symbol) if use_span.start < symbol.declaring_position => {
                tracing::debug!(
                    var = %name,
                    line = use_span.start.line,
                    column = use_span.start.column,
                    declared = %symbol.declaring_position,
                    "variable used before its declaration"
                );
                sink.emit(Diagnostic::new(
                    DiagnosticKind::UseBeforeDefinition,
                    name,
                    format!(
                        "Variable '{name}' not defined yet. It is defined at line {}.",
                        symbol.declaring_position.line
                    ),
                    use_span.end,
                ));
            }
            Some(_) => {
                tracing::trace!(var = %name, "use in order");
            }
            None => self.report_unresolved(name, use_span.start, sink),
        }
    }

    fn report_unresolved(
        &self,
        name: &str,
        position: SourcePosition,
        sink: &mut dyn DiagnosticSink,
    ) {
        tracing::debug!(var = %name, %position, "variable could not be resolved");
        if !self.report_unresolved {
            return;
        }
        sink.emit(Diagnostic::new(
            DiagnosticKind::UnresolvedVariable,
            name,
            format!("Variable '{name}' couldn't be resolved."),
            position,
        ));
    }

    fn enclosing_scope(&self, scope: Option<ScopeId>, span: Span) -> Result<ScopeId, CheckError> {
        let scope = scope.ok_or(CheckError::MissingScope {
            position: span.start,
        })?;
        if !self.scopes.contains_scope(scope) {
            return Err(CheckError::UnknownScope {
                scope,
                position: span.start,
            });
        }
        Ok(scope)
    }
}
