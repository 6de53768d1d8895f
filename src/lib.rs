use pest::Parser;
use pest_derive::Parser;
use std::cell::RefCell;
use thiserror::Error;

pub mod colormap;
pub mod config;
pub mod differential;
pub mod evaluator;
pub mod field;
pub mod formula;
pub mod surface;
pub mod syntax;
pub mod utils;
pub mod visualizer;

pub use config::{ConfigError, ParameterDocument, SurfaceConfig};
pub use differential::{DEFAULT_STEP, DerivativeBundle, compute_derivatives};
pub use field::{EvaluationWarning, FieldParams, ScalarField};
pub use formula::{Expression, compile, normalize, validate};
pub use surface::{Domain, Resolution, SurfaceGrid, SurfaceSampler};
pub use visualizer::Visualizer;

#[derive(Parser)]
#[grammar = "formula.pest"]
pub struct FormulaParser;

#[derive(Error, Debug)]
pub enum FormulaError {
  #[error("Formula contains potentially unsafe expressions: `{pattern}`")]
  Unsafe { pattern: String },
  #[error("Invalid formula syntax: {0}")]
  Syntax(#[from] Box<pest::error::Error<Rule>>),
  #[error("Empty formula")]
  EmptyFormula,
  #[error("Unknown identifier `{0}`")]
  UnknownIdentifier(String),
  #[error("Unknown function `{0}`")]
  UnknownFunction(String),
  #[error("{name} expects {expected} argument(s), got {found}")]
  Arity {
    name: String,
    expected: String,
    found: usize,
  },
  #[error("Formula is nested too deeply (limit {0})")]
  TooDeep(usize),
  #[error("Unknown formula preset `{0}`")]
  UnknownPreset(String),
  #[error("Malformed parse tree: {0}")]
  MalformedTree(&'static str),
}

impl FormulaError {
  /// Rejected by the deny-list before any parsing happened.
  pub fn is_unsafe(&self) -> bool {
    matches!(self, FormulaError::Unsafe { .. })
  }

  /// The normalized text could not be turned into an evaluable expression.
  pub fn is_syntax(&self) -> bool {
    matches!(
      self,
      FormulaError::Syntax(_)
        | FormulaError::EmptyFormula
        | FormulaError::UnknownIdentifier(_)
        | FormulaError::UnknownFunction(_)
        | FormulaError::Arity { .. }
        | FormulaError::TooDeep(_)
        | FormulaError::MalformedTree(_)
    )
  }
}

impl FormulaParser {
  pub fn parse_formula(
    input: &str,
  ) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>>
  {
    Self::parse(Rule::Formula, input).map_err(Box::new)
  }
}

pub fn parse(
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  FormulaParser::parse_formula(input)
}

/// Upper bound on individually stored warnings; later ones are only counted.
pub const MAX_CAPTURED_WARNINGS: usize = 32;

// Captured warnings (evaluation failures absorbed by the scalar field)
thread_local! {
    static CAPTURED_WARNINGS: RefCell<Vec<String>> =
        const { RefCell::new(Vec::new()) };
    static SUPPRESSED_WARNINGS: RefCell<usize> = const { RefCell::new(0) };
}

/// Clears the captured warnings buffer and the suppressed counter
pub fn clear_captured_warnings() {
  CAPTURED_WARNINGS.with(|buffer| {
    buffer.borrow_mut().clear();
  });
  SUPPRESSED_WARNINGS.with(|count| {
    *count.borrow_mut() = 0;
  });
}

/// Appends a warning message, or counts it once the buffer is full
pub fn capture_warning(text: &str) {
  let stored = CAPTURED_WARNINGS.with(|buffer| {
    let mut buffer = buffer.borrow_mut();
    if buffer.len() < MAX_CAPTURED_WARNINGS {
      buffer.push(text.to_string());
      true
    } else {
      false
    }
  });
  if !stored {
    SUPPRESSED_WARNINGS.with(|count| *count.borrow_mut() += 1);
  }
}

/// Gets the captured warnings, consolidating overflow into a single message
pub fn get_captured_warnings() -> Vec<String> {
  let mut warnings = CAPTURED_WARNINGS.with(|buffer| buffer.borrow().clone());

  let suppressed = SUPPRESSED_WARNINGS.with(|count| *count.borrow());
  if suppressed > 0 {
    let noun = if suppressed == 1 { "warning" } else { "warnings" };
    warnings.push(format!("... and {suppressed} more {noun} suppressed."));
  }

  warnings
}
