use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;

use crate::capture_warning;
use crate::formula::Expression;
use crate::syntax::Bindings;

/// Snapshot of the animation parameters a field is evaluated under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldParams {
  pub time: f64,
  pub amplitude: f64,
  pub omega: f64,
}

impl Default for FieldParams {
  fn default() -> Self {
    FieldParams {
      time: 0.0,
      amplitude: 1.0,
      omega: 0.5,
    }
  }
}

impl FieldParams {
  pub fn new(time: f64, amplitude: f64, omega: f64) -> Self {
    FieldParams {
      time,
      amplitude,
      omega,
    }
  }

  pub fn with_time(self, time: f64) -> Self {
    FieldParams { time, ..self }
  }

  pub fn bindings(&self, x: f64, y: f64) -> Bindings {
    Bindings::new(x, y, self.time, self.amplitude, self.omega)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
  NotANumber,
  Infinite,
}

/// A point where the formula produced no drawable value and `0` was
/// substituted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationWarning {
  pub x: f64,
  pub y: f64,
  pub kind: WarningKind,
}

impl EvaluationWarning {
  /// The warning `value` raises at (x, y), or `None` when it is drawable.
  pub fn check(x: f64, y: f64, value: f64) -> Option<Self> {
    let kind = if value.is_nan() {
      WarningKind::NotANumber
    } else if value.is_infinite() {
      WarningKind::Infinite
    } else {
      return None;
    };
    Some(EvaluationWarning { x, y, kind })
  }
}

/// Report `warning` and produce the substitute value.
fn fall_back(warning: EvaluationWarning) -> f64 {
  capture_warning(&warning.to_string());
  0.0
}

impl fmt::Display for EvaluationWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let what = match self.kind {
      WarningKind::NotANumber => "NaN",
      WarningKind::Infinite => "an infinite value",
    };
    write!(
      f,
      "Formula evaluation error at ({}, {}): result was {what}, using 0",
      self.x, self.y
    )
  }
}

/// z = f(x, y, t, A, ω) over a compiled expression, with the
/// invalid-result-becomes-zero policy applied.
#[derive(Debug)]
pub struct ScalarField {
  expression: Expression,
  evaluations: Cell<u64>,
  warnings: Cell<u64>,
}

impl ScalarField {
  pub fn new(expression: Expression) -> Self {
    ScalarField {
      expression,
      evaluations: Cell::new(0),
      warnings: Cell::new(0),
    }
  }

  pub fn expression(&self) -> &Expression {
    &self.expression
  }

  /// Evaluate at a point. Always finite: NaN and ±∞ become `0` and are
  /// reported through the captured-warnings buffer.
  pub fn evaluate(
    &self,
    x: f64,
    y: f64,
    t: f64,
    amplitude: f64,
    omega: f64,
  ) -> f64 {
    self.evaluate_with(&Bindings::new(x, y, t, amplitude, omega))
  }

  pub fn evaluate_at(&self, x: f64, y: f64, params: &FieldParams) -> f64 {
    self.evaluate_with(&params.bindings(x, y))
  }

  pub fn evaluate_with(&self, bindings: &Bindings) -> f64 {
    self.evaluations.set(self.evaluations.get() + 1);
    let value = self.expression.eval(bindings);
    match EvaluationWarning::check(bindings.x, bindings.y, value) {
      None => value,
      Some(warning) => {
        self.warnings.set(self.warnings.get() + 1);
        fall_back(warning)
      }
    }
  }

  /// Evaluator invocations since creation or the last reset.
  pub fn evaluation_count(&self) -> u64 {
    self.evaluations.get()
  }

  /// Points that fell back to `0` since creation or the last reset.
  pub fn warning_count(&self) -> u64 {
    self.warnings.get()
  }

  pub fn reset_counters(&self) {
    self.evaluations.set(0);
    self.warnings.set(0);
  }
}

impl From<Expression> for ScalarField {
  fn from(expression: Expression) -> Self {
    ScalarField::new(expression)
  }
}

/// Free-function form: evaluate `expr` once with the zero fallback.
pub fn evaluate(
  expr: &Expression,
  x: f64,
  y: f64,
  t: f64,
  amplitude: f64,
  omega: f64,
) -> f64 {
  let value = expr.call(x, y, t, amplitude, omega);
  match EvaluationWarning::check(x, y, value) {
    None => value,
    Some(warning) => fall_back(warning),
  }
}
