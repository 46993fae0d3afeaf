//! # NESTML back-end names
//!
//! Source names may carry differentiation marks (`g_in''` is the second
//! derivative of `g_in`). Generated code needs plain identifiers, so names
//! are mangled:
//!
//! | source    | mangled     | getter          |
//! |-----------|-------------|-----------------|
//! | `g_in`    | `g_in`      | `get_g_in`      |
//! | `g_in'`   | `__D_g_in`  | `get___D_g_in`  |
//! | `g_in''`  | `__DD_g_in` | `get___DD_g_in` |
//!
//! Marks may appear anywhere in the name, not only at the end; all of them
//! count and all of them are removed. Mangling is a one-shot transform, not
//! a codec: the source name cannot be recovered from the result, and
//! `mangle(x) == x` holds only for names without marks.

use nestml_ast::{DIFFERENTIATION_MARK, Derivative, Variable};
use nestml_symbols::VariableSymbol;
use std::borrow::Cow;

/// Sentinel that starts every mangled derivative name.
pub const DERIVATIVE_PREFIX: &str = "__";

/// Map a raw source name to its back-end identifier.
pub fn mangle(raw: &str) -> String {
    let order = raw.chars().filter(|&c| c == DIFFERENTIATION_MARK).count();
    if order == 0 {
        return raw.to_string();
    }
    let base: String = raw.chars().filter(|&c| c != DIFFERENTIATION_MARK).collect();
    format!("{DERIVATIVE_PREFIX}{}_{base}", "D".repeat(order))
}

/// Anything code generation needs a back-end name for.
///
/// Implementations only produce the raw source text; mangling is the same
/// for every kind of input.
pub trait RawName {
    fn raw_name(&self) -> Cow<'_, str>;
}

impl RawName for str {
    fn raw_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl RawName for String {
    fn raw_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl RawName for VariableSymbol {
    fn raw_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_str())
    }
}

impl RawName for Variable {
    fn raw_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_str())
    }
}

impl RawName for Derivative {
    fn raw_name(&self) -> Cow<'_, str> {
        Cow::Owned(Derivative::raw_name(self))
    }
}

/// Back-end identifier of a symbol or node.
pub fn name<N: RawName + ?Sized>(item: &N) -> String {
    mangle(&item.raw_name())
}

/// `get_` accessor for a symbol or node.
pub fn getter_name<N: RawName + ?Sized>(item: &N) -> String {
    format!("get_{}", name(item))
}

/// `set_` accessor for a symbol or node.
pub fn setter_name<N: RawName + ?Sized>(item: &N) -> String {
    format!("set_{}", name(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestml_ast::{SourcePosition, Span};
    use nestml_symbols::BlockType;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(mangle("g_in"), "g_in");
        assert_eq!(mangle(""), "");
    }

    #[test]
    fn marks_become_d_prefix() {
        assert_eq!(mangle("g_in'"), "__D_g_in");
        assert_eq!(mangle("g_in''"), "__DD_g_in");
        assert_eq!(mangle("V_m'''"), "__DDD_V_m");
    }

    #[test]
    fn embedded_marks_count_too() {
        assert_eq!(mangle("g'_in'"), "__DD_g_in");
        assert_eq!(mangle("'"), "__D_");
    }

    #[test]
    fn accessors_wrap_the_mangled_name() {
        assert_eq!(getter_name("g_in''"), "get___DD_g_in");
        assert_eq!(setter_name("g_in''"), "set___DD_g_in");
        assert_eq!(getter_name("V_m"), "get_V_m");
        assert_eq!(setter_name(&"I_syn".to_string()), "set_I_syn");
    }

    #[test]
    fn every_input_kind_mangles_the_same_way() {
        let symbol = VariableSymbol::new("g_ex''", SourcePosition::new(3, 5), BlockType::State);
        let variable = Variable::new("g_ex''", Span::on_line(9, 5, 11));
        let derivative = Derivative::new("g_ex", 2, Span::on_line(12, 5, 11));

        assert_eq!(name(&symbol), "__DD_g_ex");
        assert_eq!(name(&variable), "__DD_g_ex");
        assert_eq!(name(&derivative), "__DD_g_ex");
        assert_eq!(getter_name(&symbol), "get___DD_g_ex");
        assert_eq!(setter_name(&derivative), "set___DD_g_ex");
    }

    #[test]
    fn only_names_with_marks_change() {
        for plain in ["g_in", "V_m", "__DD_g_in"] {
            assert_eq!(mangle(plain), plain);
        }
        let once = mangle("g_in'");
        assert_ne!(once, "g_in'");
        // A mangled name has no marks left.
        assert_eq!(mangle(&once), once);
    }
}
