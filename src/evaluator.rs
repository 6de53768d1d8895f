use crate::syntax::{BinaryOperator, Bindings, Expr, Function, UnaryOperator};

/// Evaluate a resolved formula tree. The result may be NaN or infinite;
/// callers that need a drawable value go through `ScalarField`.
pub fn evaluate_expr(expr: &Expr, bindings: &Bindings) -> f64 {
  match expr {
    Expr::Number(n) => *n,
    Expr::Variable(v) => bindings.get(*v),
    Expr::Constant(c) => c.value(),
    Expr::UnaryOp { op, operand } => {
      apply_unary(*op, evaluate_expr(operand, bindings))
    }
    Expr::BinaryOp { op, left, right } => apply_binary(
      *op,
      evaluate_expr(left, bindings),
      evaluate_expr(right, bindings),
    ),
    Expr::FunctionCall { function, args } => {
      // Most calls are unary; avoid the Vec for them
      if let [arg] = args.as_slice() {
        apply_function(*function, &[evaluate_expr(arg, bindings)])
      } else {
        let values: Vec<f64> =
          args.iter().map(|a| evaluate_expr(a, bindings)).collect();
        apply_function(*function, &values)
      }
    }
  }
}

pub fn apply_unary(op: UnaryOperator, value: f64) -> f64 {
  match op {
    UnaryOperator::Plus => value,
    UnaryOperator::Minus => -value,
  }
}

pub fn apply_binary(op: BinaryOperator, lhs: f64, rhs: f64) -> f64 {
  match op {
    BinaryOperator::Plus => lhs + rhs,
    BinaryOperator::Minus => lhs - rhs,
    BinaryOperator::Times => lhs * rhs,
    BinaryOperator::Divide => lhs / rhs,
    // Truncated remainder: sign follows the dividend
    BinaryOperator::Remainder => lhs % rhs,
    BinaryOperator::Power => lhs.powf(rhs),
  }
}

/// Apply an allow-listed function. Argument counts are checked when the
/// formula is compiled, so a short slice only happens for hand-built trees
/// and yields NaN.
pub fn apply_function(function: Function, args: &[f64]) -> f64 {
  let first = args.first().copied().unwrap_or(f64::NAN);
  match function {
    Function::Sin => first.sin(),
    Function::Cos => first.cos(),
    Function::Tan => first.tan(),
    Function::Asin => first.asin(),
    Function::Acos => first.acos(),
    Function::Atan => first.atan(),
    Function::Sinh => first.sinh(),
    Function::Cosh => first.cosh(),
    Function::Tanh => first.tanh(),
    Function::Exp => first.exp(),
    Function::Log => first.ln(),
    Function::Log10 => first.log10(),
    Function::Sqrt => first.sqrt(),
    Function::Abs => first.abs(),
    Function::Floor => first.floor(),
    Function::Ceil => first.ceil(),
    Function::Round => round_half_up(first),
    Function::Pow => {
      let exponent = args.get(1).copied().unwrap_or(f64::NAN);
      first.powf(exponent)
    }
    Function::Min => extremum(args, f64::INFINITY, |a, b| b < a),
    Function::Max => extremum(args, f64::NEG_INFINITY, |a, b| b > a),
    Function::Sign => sign(first),
  }
}

/// Halves round towards positive infinity: round(-2.5) == -2.
fn round_half_up(value: f64) -> f64 {
  let base = value.floor();
  if value - base >= 0.5 { base + 1.0 } else { base }
}

/// Zero keeps its sign, NaN stays NaN.
fn sign(value: f64) -> f64 {
  if value > 0.0 {
    1.0
  } else if value < 0.0 {
    -1.0
  } else {
    value
  }
}

/// Min/max where any NaN argument poisons the result.
fn extremum(args: &[f64], identity: f64, better: fn(f64, f64) -> bool) -> f64 {
  let mut result = identity;
  for &value in args {
    if value.is_nan() {
      return f64::NAN;
    }
    if better(result, value) {
      result = value;
    }
  }
  result
}

/// Collapse every subtree that does not depend on a variable into a number.
/// Folding uses the same arithmetic as evaluation, so results are identical.
pub fn fold_constants(expr: Expr) -> Expr {
  match expr {
    Expr::Constant(c) => Expr::Number(c.value()),
    Expr::UnaryOp { op, operand } => match fold_constants(*operand) {
      Expr::Number(n) => Expr::Number(apply_unary(op, n)),
      operand => Expr::UnaryOp {
        op,
        operand: Box::new(operand),
      },
    },
    Expr::BinaryOp { op, left, right } => {
      match (fold_constants(*left), fold_constants(*right)) {
        (Expr::Number(a), Expr::Number(b)) => {
          Expr::Number(apply_binary(op, a, b))
        }
        (left, right) => Expr::BinaryOp {
          op,
          left: Box::new(left),
          right: Box::new(right),
        },
      }
    }
    Expr::FunctionCall { function, args } => {
      let args: Vec<Expr> = args.into_iter().map(fold_constants).collect();
      let numbers: Option<Vec<f64>> = args
        .iter()
        .map(|a| match a {
          Expr::Number(n) => Some(*n),
          _ => None,
        })
        .collect();
      match numbers {
        Some(values) if function.arity().accepts(values.len()) => {
          Expr::Number(apply_function(function, &values))
        }
        _ => Expr::FunctionCall { function, args },
      }
    }
    other => other,
  }
}
