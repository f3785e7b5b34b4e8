//! Expression evaluation using meval.
//!
//! Wraps the meval backend to classify failures and format results for
//! display. Failures split into two kinds that the user sees identically:
//! the backend rejecting the text, and a parse that evaluates to NaN or
//! infinity (division by zero, sqrt of a negative).

use std::str::FromStr;

use meval::Expr;
use thiserror::Error;

/// Why an expression produced no value.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The backend could not parse or evaluate the text (dangling operator,
    /// unbalanced parentheses, unknown function).
    #[error("invalid expression: {0}")]
    Syntax(#[from] meval::Error),
    /// The expression evaluated to NaN or infinity.
    #[error("result is not a finite number")]
    NonFinite,
}

/// Result of evaluating a normalized expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A finite result, formatted for display.
    Value(String),
    /// Nothing to show: blank input, or a failure in live-preview context.
    Empty,
    /// A failure surfaced by an explicit equals press.
    Error,
}

/// Evaluate a normalized expression.
///
/// Live previews run with `final_eval = false` so that half-typed input
/// stays blank instead of flashing "Error" on every keystroke; only the
/// equals action evaluates with `final_eval = true` and surfaces failures.
pub fn evaluate(normalized: &str, final_eval: bool) -> Outcome {
    if normalized.trim().is_empty() {
        return Outcome::Empty;
    }
    match eval_value(normalized) {
        Ok(value) => Outcome::Value(format_number(value)),
        Err(err) => {
            tracing::debug!(expression = normalized, error = %err, "evaluation failed");
            if final_eval {
                Outcome::Error
            } else {
                Outcome::Empty
            }
        }
    }
}

/// Evaluate to a raw finite f64.
pub fn eval_value(normalized: &str) -> Result<f64, EvalError> {
    let expr = Expr::from_str(normalized)?;
    let value = expr.eval_with_context(context())?;
    if value.is_nan() || value.is_infinite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

/// Evaluation context: meval's built-ins (sqrt among them) plus log10.
fn context() -> meval::Context<'static> {
    let mut ctx = meval::Context::new();
    ctx.func("log10", f64::log10);
    ctx
}

/// Format a value with up to 10 fractional digits, trimming trailing zeros
/// and a dangling decimal point. No separators, no scientific notation,
/// always `.` as the decimal mark.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.10}", value);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
