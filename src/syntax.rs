use std::f64::consts::{E, PI};
use std::fmt;

/// The five parameters every formula may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
  X,
  Y,
  Time,
  Amplitude,
  Omega,
}

impl Variable {
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "x" => Some(Variable::X),
      "y" => Some(Variable::Y),
      "t" => Some(Variable::Time),
      "A" => Some(Variable::Amplitude),
      "ω" | "omega" => Some(Variable::Omega),
      _ => None,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Variable::X => "x",
      Variable::Y => "y",
      Variable::Time => "t",
      Variable::Amplitude => "A",
      Variable::Omega => "ω",
    }
  }
}

impl fmt::Display for Variable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
  Pi,
  E,
}

impl Constant {
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "π" | "pi" | "PI" => Some(Constant::Pi),
      "e" | "E" => Some(Constant::E),
      _ => None,
    }
  }

  pub fn value(self) -> f64 {
    match self {
      Constant::Pi => PI,
      Constant::E => E,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
  Exactly(usize),
  AtLeast(usize),
}

impl Arity {
  pub fn accepts(self, count: usize) -> bool {
    match self {
      Arity::Exactly(n) => count == n,
      Arity::AtLeast(n) => count >= n,
    }
  }
}

impl fmt::Display for Arity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Arity::Exactly(n) => write!(f, "{n}"),
      Arity::AtLeast(n) => write!(f, "at least {n}"),
    }
  }
}

/// Allow-listed math functions. Nothing outside this table is callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
  Sin,
  Cos,
  Tan,
  Asin,
  Acos,
  Atan,
  Sinh,
  Cosh,
  Tanh,
  Exp,
  Log,
  Log10,
  Sqrt,
  Abs,
  Floor,
  Ceil,
  Round,
  Pow,
  Min,
  Max,
  Sign,
}

impl Function {
  pub fn from_name(name: &str) -> Option<Self> {
    let function = match name {
      "sin" => Function::Sin,
      "cos" => Function::Cos,
      "tan" => Function::Tan,
      "asin" => Function::Asin,
      "acos" => Function::Acos,
      "atan" => Function::Atan,
      "sinh" => Function::Sinh,
      "cosh" => Function::Cosh,
      "tanh" => Function::Tanh,
      "exp" => Function::Exp,
      "log" => Function::Log,
      "log10" => Function::Log10,
      "sqrt" => Function::Sqrt,
      "abs" => Function::Abs,
      "floor" => Function::Floor,
      "ceil" => Function::Ceil,
      "round" => Function::Round,
      "pow" => Function::Pow,
      "min" => Function::Min,
      "max" => Function::Max,
      "sign" => Function::Sign,
      _ => return None,
    };
    Some(function)
  }

  pub fn name(self) -> &'static str {
    match self {
      Function::Sin => "sin",
      Function::Cos => "cos",
      Function::Tan => "tan",
      Function::Asin => "asin",
      Function::Acos => "acos",
      Function::Atan => "atan",
      Function::Sinh => "sinh",
      Function::Cosh => "cosh",
      Function::Tanh => "tanh",
      Function::Exp => "exp",
      Function::Log => "log",
      Function::Log10 => "log10",
      Function::Sqrt => "sqrt",
      Function::Abs => "abs",
      Function::Floor => "floor",
      Function::Ceil => "ceil",
      Function::Round => "round",
      Function::Pow => "pow",
      Function::Min => "min",
      Function::Max => "max",
      Function::Sign => "sign",
    }
  }

  pub fn arity(self) -> Arity {
    match self {
      Function::Pow => Arity::Exactly(2),
      Function::Min | Function::Max => Arity::AtLeast(1),
      _ => Arity::Exactly(1),
    }
  }
}

/// Whether `name` resolves to an allow-listed function.
pub fn is_function_name(name: &str) -> bool {
  Function::from_name(name).is_some()
}

/// Whether `name` resolves to a variable or a constant, i.e. has a value.
pub fn is_value_name(name: &str) -> bool {
  Variable::from_name(name).is_some() || Constant::from_name(name).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
  Plus,
  Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
  Plus,
  Minus,
  Times,
  Divide,
  Remainder,
  Power,
}

impl BinaryOperator {
  pub fn from_symbol(symbol: &str) -> Option<Self> {
    match symbol {
      "+" => Some(BinaryOperator::Plus),
      "-" => Some(BinaryOperator::Minus),
      "*" => Some(BinaryOperator::Times),
      "/" => Some(BinaryOperator::Divide),
      "%" => Some(BinaryOperator::Remainder),
      "^" | "**" => Some(BinaryOperator::Power),
      _ => None,
    }
  }
}

/// Resolved formula tree. Identifiers are already bound to the fixed
/// variable/constant/function tables, so evaluation never looks anything up
/// by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Number(f64),
  Variable(Variable),
  Constant(Constant),
  UnaryOp {
    op: UnaryOperator,
    operand: Box<Expr>,
  },
  BinaryOp {
    op: BinaryOperator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  FunctionCall {
    function: Function,
    args: Vec<Expr>,
  },
}

impl Expr {
  /// Calls `visit` on every variable reference in the tree.
  pub fn for_each_variable(&self, visit: &mut impl FnMut(Variable)) {
    match self {
      Expr::Number(_) | Expr::Constant(_) => {}
      Expr::Variable(v) => visit(*v),
      Expr::UnaryOp { operand, .. } => operand.for_each_variable(visit),
      Expr::BinaryOp { left, right, .. } => {
        left.for_each_variable(visit);
        right.for_each_variable(visit);
      }
      Expr::FunctionCall { args, .. } => {
        for arg in args {
          arg.for_each_variable(visit);
        }
      }
    }
  }

  /// Number of nodes in the tree
  pub fn node_count(&self) -> usize {
    match self {
      Expr::Number(_) | Expr::Variable(_) | Expr::Constant(_) => 1,
      Expr::UnaryOp { operand, .. } => 1 + operand.node_count(),
      Expr::BinaryOp { left, right, .. } => {
        1 + left.node_count() + right.node_count()
      }
      Expr::FunctionCall { args, .. } => {
        1 + args.iter().map(Expr::node_count).sum::<usize>()
      }
    }
  }
}

/// Values for the five formula parameters at one evaluation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bindings {
  pub x: f64,
  pub y: f64,
  pub t: f64,
  pub amplitude: f64,
  pub omega: f64,
}

impl Bindings {
  pub fn new(x: f64, y: f64, t: f64, amplitude: f64, omega: f64) -> Self {
    Bindings {
      x,
      y,
      t,
      amplitude,
      omega,
    }
  }

  pub fn get(&self, variable: Variable) -> f64 {
    match variable {
      Variable::X => self.x,
      Variable::Y => self.y,
      Variable::Time => self.t,
      Variable::Amplitude => self.amplitude,
      Variable::Omega => self.omega,
    }
  }
}
