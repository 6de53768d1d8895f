//! Turns untrusted formula text into a sandboxed, evaluable expression.
//!
//! Pipeline: deny-list check on the raw text, shorthand normalization,
//! PEG parse, name resolution against the fixed tables, constant folding.
//! Nothing in the resulting tree can refer to anything but `x`, `y`, `t`,
//! `A`, `ω`, the math constants and the allow-listed functions.

pub mod normalize;
pub mod parse;
pub mod presets;
pub mod validate;

pub use normalize::normalize;
pub use presets::{PRESETS, Preset, preset};
pub use validate::{find_unsafe_pattern, validate};

use crate::FormulaError;
use crate::evaluator::{evaluate_expr, fold_constants};
use crate::syntax::{Bindings, Expr, Variable};

/// Immutable compiled formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
  source: String,
  normalized: String,
  ast: Expr,
}

impl Expression {
  /// Text as the user typed it
  pub fn source(&self) -> &str {
    &self.source
  }

  /// Text after shorthand rewriting
  pub fn normalized(&self) -> &str {
    &self.normalized
  }

  pub fn ast(&self) -> &Expr {
    &self.ast
  }

  /// Raw evaluation. May return NaN or ±∞.
  pub fn eval(&self, bindings: &Bindings) -> f64 {
    evaluate_expr(&self.ast, bindings)
  }

  /// Positional form of [`Expression::eval`]: (x, y, t, A, ω).
  pub fn call(
    &self,
    x: f64,
    y: f64,
    t: f64,
    amplitude: f64,
    omega: f64,
  ) -> f64 {
    self.eval(&Bindings::new(x, y, t, amplitude, omega))
  }

  /// Variables referenced after constant folding, in canonical order.
  pub fn variables_used(&self) -> Vec<Variable> {
    let mut used = Vec::new();
    self.ast.for_each_variable(&mut |v| used.push(v));
    used.sort_unstable();
    used.dedup();
    used
  }

  /// Whether the surface changes as `t` advances.
  pub fn is_time_dependent(&self) -> bool {
    self.variables_used().contains(&Variable::Time)
  }
}

/// Compile formula text.
///
/// Fails with [`FormulaError::Unsafe`] when the raw text hits the
/// deny-list (nothing is parsed in that case), or with a syntax-kind error
/// when the normalized text is not a well-formed expression over the
/// allowed names.
pub fn compile(text: &str) -> Result<Expression, FormulaError> {
  if let Some(pattern) = find_unsafe_pattern(text) {
    return Err(FormulaError::Unsafe {
      pattern: pattern.to_string(),
    });
  }

  let normalized = normalize(text);
  if normalized.trim().is_empty() {
    return Err(FormulaError::EmptyFormula);
  }

  let ast = parse::parse_formula(&normalized)?;
  Ok(Expression {
    source: text.to_string(),
    normalized,
    ast: fold_constants(ast),
  })
}

/// Compile a catalog preset by key.
pub fn compile_preset(key: &str) -> Result<Expression, FormulaError> {
  let preset =
    preset(key).ok_or_else(|| FormulaError::UnknownPreset(key.to_string()))?;
  compile(preset.formula)
}
