//! Driving the checks over a statement tree.

use crate::config::CheckConfig;
use crate::definition_order::{Checkable, DefinitionOrder};
use crate::diagnostic::{DiagnosticSink, Diagnostics};
use crate::error::CheckError;
use nestml_ast::Stmt;
use nestml_symbols::ScopeResolution;

/// Check every statement in `block`, including nested `for`, `while` and
/// `if` bodies, in source order.
///
/// All findings go to `sink`. The walk stops early only on a broken
/// precondition.
#[tracing::instrument(skip_all, fields(statements = block.len()))]
pub fn check_statements<S: ScopeResolution + ?Sized>(
    block: &[Stmt],
    scopes: &S,
    config: &CheckConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), CheckError> {
    if !config.definition_order.enabled {
        tracing::debug!("definition-order check disabled");
        return Ok(());
    }
    let checker = DefinitionOrder::with_config(scopes, &config.definition_order);
    walk_block(&checker, block, sink)
}

/// Check one compilation unit and collect its diagnostics.
pub fn check_unit<S: ScopeResolution + ?Sized>(
    block: &[Stmt],
    scopes: &S,
    config: &CheckConfig,
) -> Result<Diagnostics, CheckError> {
    let mut diagnostics = Diagnostics::new();
    check_statements(block, scopes, config, &mut diagnostics)?;
    tracing::debug!(
        errors = diagnostics.error_count(),
        warnings = diagnostics.warning_count(),
        "unit checked"
    );
    Ok(diagnostics)
}

fn walk_block<S: ScopeResolution + ?Sized>(
    checker: &DefinitionOrder<'_, S>,
    block: &[Stmt],
    sink: &mut dyn DiagnosticSink,
) -> Result<(), CheckError> {
    for stmt in block {
        if let Some(node) = Checkable::from_stmt(stmt) {
            checker.check(node, sink)?;
        }
        for nested in stmt.nested_blocks() {
            walk_block(checker, nested, sink)?;
        }
    }
    Ok(())
}
