use super::*;
use mathviz::field::{WarningKind, evaluate};
use mathviz::{clear_captured_warnings, get_captured_warnings};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn division_by_zero_falls_back_to_zero() {
  clear_captured_warnings();
  let f = field("1/x");
  assert_eq!(f.evaluate(0.0, 0.0, 0.0, 1.0, 0.5), 0.0);
  assert_eq!(f.evaluate(2.0, 0.0, 0.0, 1.0, 0.5), 0.5);
  assert_eq!(f.warning_count(), 1);
  assert_eq!(f.evaluation_count(), 2);

  let warnings = get_captured_warnings();
  assert_eq!(warnings.len(), 1);
  assert!(warnings[0].contains("(0, 0)"), "{}", warnings[0]);
}

#[test]
fn nan_falls_back_to_zero() {
  let f = field("sqrt(x)");
  assert_eq!(f.evaluate(-4.0, 0.0, 0.0, 1.0, 0.5), 0.0);
  assert_eq!(f.evaluate(4.0, 0.0, 0.0, 1.0, 0.5), 2.0);
}

#[test]
fn warning_buffer_is_bounded() {
  clear_captured_warnings();
  let f = field("log(x)");
  for _ in 0..40 {
    f.evaluate(0.0, 1.0, 0.0, 1.0, 0.5);
  }
  assert_eq!(f.warning_count(), 40);

  let warnings = get_captured_warnings();
  assert_eq!(warnings.len(), mathviz::MAX_CAPTURED_WARNINGS + 1);
  assert_eq!(
    warnings.last().unwrap(),
    "... and 8 more warnings suppressed."
  );
}

#[test]
fn reset_counters() {
  let f = field("1/y");
  f.evaluate(0.0, 0.0, 0.0, 1.0, 0.5);
  f.reset_counters();
  assert_eq!(f.warning_count(), 0);
  assert_eq!(f.evaluation_count(), 0);
}

#[test]
fn params_snapshot_binds_time_amplitude_omega() {
  let f = field("A * sin(x + ω*t)");
  let params = FieldParams::new(2.0, 3.0, 0.25);
  let expected = 3.0 * (1.0_f64 + 0.5).sin();
  let value = f.evaluate_at(1.0, 0.0, &params);
  assert_abs_diff_eq!(value, expected, epsilon = 1e-12);
  assert_eq!(params.with_time(0.0).time, 0.0);
  assert_eq!(FieldParams::default(), FieldParams::new(0.0, 1.0, 0.5));
}

#[test]
fn free_function_matches_field() {
  let expression = compile("x / y").unwrap();
  assert_eq!(evaluate(&expression, 1.0, 0.0, 0.0, 1.0, 0.5), 0.0);
  assert_eq!(evaluate(&expression, 1.0, 4.0, 0.0, 1.0, 0.5), 0.25);
}

#[test]
fn free_function_reports_like_field() {
  let expression = compile("log(x)").unwrap();
  let f = ScalarField::new(expression.clone());

  clear_captured_warnings();
  assert_eq!(evaluate(&expression, 0.0, 1.0, 0.0, 1.0, 0.5), 0.0);
  assert_eq!(f.evaluate(0.0, 1.0, 0.0, 1.0, 0.5), 0.0);
  let warnings = get_captured_warnings();
  assert_eq!(warnings.len(), 2);
  assert_eq!(warnings[0], warnings[1]);
  assert_eq!(
    warnings[0],
    "Formula evaluation error at (0, 1): result was an infinite value, using 0"
  );
}

#[test]
fn warning_check_classifies_values() {
  use mathviz::EvaluationWarning;
  assert_eq!(EvaluationWarning::check(1.0, 2.0, 3.0), None);
  let nan = EvaluationWarning::check(1.0, 2.0, f64::NAN).unwrap();
  assert_eq!(nan.kind, WarningKind::NotANumber);
  let inf = EvaluationWarning::check(1.0, 2.0, f64::NEG_INFINITY).unwrap();
  assert_eq!(inf.kind, WarningKind::Infinite);
}

#[test]
fn evaluation_is_total_over_random_points() {
  let formulas = [
    "1/x",
    "log(x*y)",
    "sqrt(x - y)",
    "tan(x) / (y - t)",
    "pow(x, y)",
    "exp(x*x*y)",
    "asin(x) + acos(y)",
    "x % y",
  ];
  let mut rng = StdRng::seed_from_u64(42);
  for formula in formulas {
    let f = field(formula);
    for _ in 0..500 {
      let x = rng.gen_range(-1e3..1e3);
      let y = rng.gen_range(-1e3..1e3);
      let t = rng.gen_range(-10.0..10.0);
      let z = f.evaluate(x, y, t, 1.0, 0.5);
      assert!(z.is_finite(), "{formula} at ({x}, {y}, {t})");
    }
    // Exact singular points too
    assert!(f.evaluate(0.0, 0.0, 0.0, 1.0, 0.5).is_finite());
  }
}

#[test]
fn warning_display() {
  let warning = mathviz::EvaluationWarning {
    x: 1.5,
    y: -2.0,
    kind: WarningKind::Infinite,
  };
  assert_eq!(
    warning.to_string(),
    "Formula evaluation error at (1.5, -2): result was an infinite value, using 0"
  );
}
