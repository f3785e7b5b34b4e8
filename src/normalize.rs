//! Rewrites display-form expressions into evaluator syntax.
//!
//! The keypad produces glyphs (`×`, `÷`, `√`) and percent shorthand that the
//! arithmetic backend does not understand; this module rewrites them. The
//! percent-of rewrite must run before the generic `%` substitution.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches `<number> <+|-> <number>%` with optional whitespace around
    /// the operator. Numbers are digit/dot runs.
    static ref PERCENT_OF: Regex = Regex::new(r"([\d.]+)\s*([+\-])\s*([\d.]+)%").unwrap();
}

/// Rewrite a raw display string into the backend's syntax.
///
/// Steps, in order:
/// 1. Glyphs: `×` → `*`, `÷` → `/`, `√` → `sqrt`.
/// 2. Percent-of-addend: `X+Y%` means "X plus Y percent of X", so each match
///    becomes `(X + (X * Y * 0.01))`. Matches are rewritten non-overlapping,
///    left to right. Only `+` and `-` get this treatment; `*` and `/` before
///    a percent fall through to step 3.
/// 3. Any remaining `%` is a raw scale factor: `50%` → `50*0.01`.
///
/// Text that is already in backend syntax passes through unchanged.
pub fn normalize(raw: &str) -> String {
    let glyphless = raw.replace('×', "*").replace('÷', "/").replace('√', "sqrt");

    let rewritten = PERCENT_OF.replace_all(&glyphless, "(${1} ${2} (${1} * ${3} * 0.01))");

    rewritten.replace('%', "*0.01")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_expression_is_identity() {
        assert_eq!(normalize("1+2*3"), "1+2*3");
        assert_eq!(normalize("sqrt(16)/log10(100)"), "sqrt(16)/log10(100)");
    }

    #[test]
    fn test_glyph_substitution() {
        assert_eq!(normalize("6×7"), "6*7");
        assert_eq!(normalize("8÷2"), "8/2");
        assert_eq!(normalize("√(9)"), "sqrt(9)");
    }

    #[test]
    fn test_percent_of_addend() {
        assert_eq!(normalize("100+10%"), "(100 + (100 * 10 * 0.01))");
        assert_eq!(normalize("200-25%"), "(200 - (200 * 25 * 0.01))");
    }

    #[test]
    fn test_percent_of_with_whitespace() {
        assert_eq!(normalize("100 + 10%"), "(100 + (100 * 10 * 0.01))");
    }

    #[test]
    fn test_standalone_percent_scales() {
        assert_eq!(normalize("50%"), "50*0.01");
    }

    #[test]
    fn test_multiplied_percent_is_not_percent_of() {
        // Only +/- carry percent-of semantics; 10*20% is 10*20/100.
        assert_eq!(normalize("10*20%"), "10*20*0.01");
    }

    #[test]
    fn test_rewrites_are_left_to_right() {
        assert_eq!(
            normalize("100+10%+5%"),
            "(100 + (100 * 10 * 0.01))+5*0.01"
        );
    }

    #[test]
    fn test_decimal_operands() {
        assert_eq!(normalize("1.5+0.5%"), "(1.5 + (1.5 * 0.5 * 0.01))");
    }
}
