use pest::iterators::{Pair, Pairs};

use crate::syntax::{
  BinaryOperator, Constant, Expr, Function, UnaryOperator, Variable,
};
use crate::{FormulaError, FormulaParser, Rule};

/// Deepest tree accepted. Every pair nesting level counts, and so does
/// every link of an operator chain or sign run, since those nest in the
/// resulting `Expr`.
pub const MAX_DEPTH: usize = 256;

/// Parse normalized text into a resolved expression tree.
pub fn parse_formula(normalized: &str) -> Result<Expr, FormulaError> {
  let mut pairs = FormulaParser::parse_formula(normalized)?;
  let formula = pairs
    .next()
    .ok_or(FormulaError::MalformedTree("missing Formula"))?;
  let expression = formula
    .into_inner()
    .find(|p| p.as_rule() == Rule::Expression)
    .ok_or(FormulaError::MalformedTree("missing Expression"))?;
  build(expression, 0)
}

fn next_pair<'a>(
  pairs: &mut Pairs<'a, Rule>,
  context: &'static str,
) -> Result<Pair<'a, Rule>, FormulaError> {
  pairs.next().ok_or(FormulaError::MalformedTree(context))
}

/// Depth for the children of a node at `depth` that adds `links` levels
/// of its own.
fn descend(depth: usize, links: usize) -> Result<usize, FormulaError> {
  let next = depth + links + 1;
  if next > MAX_DEPTH {
    Err(FormulaError::TooDeep(MAX_DEPTH))
  } else {
    Ok(next)
  }
}

/// Convert a pest Pair into an `Expr`, binding every identifier to the
/// fixed tables on the way. Unknown names are compile errors.
pub fn pair_to_expr(pair: Pair<Rule>) -> Result<Expr, FormulaError> {
  build(pair, 0)
}

fn build(pair: Pair<Rule>, depth: usize) -> Result<Expr, FormulaError> {
  match pair.as_rule() {
    Rule::Expression | Rule::Term => {
      // Operands and operators alternate
      let operators = pair.clone().into_inner().count() / 2;
      let depth = descend(depth, operators)?;
      let mut inner = pair.into_inner();
      let first = next_pair(&mut inner, "empty operand list")?;
      let mut result = build(first, depth)?;
      // Left-associative: a - b - c == (a - b) - c
      while let Some(op_pair) = inner.next() {
        let op = BinaryOperator::from_symbol(op_pair.as_str())
          .ok_or(FormulaError::MalformedTree("unknown operator"))?;
        let rhs = build(next_pair(&mut inner, "dangling operator")?, depth)?;
        result = Expr::BinaryOp {
          op,
          left: Box::new(result),
          right: Box::new(rhs),
        };
      }
      Ok(result)
    }
    Rule::Factor => {
      let sign_count = pair
        .clone()
        .into_inner()
        .filter(|p| p.as_rule() == Rule::UnaryOperator)
        .count();
      let depth = descend(depth, sign_count)?;
      let mut signs = Vec::new();
      let mut operand = None;
      for inner in pair.into_inner() {
        match inner.as_rule() {
          Rule::UnaryOperator => signs.push(if inner.as_str() == "-" {
            UnaryOperator::Minus
          } else {
            UnaryOperator::Plus
          }),
          _ => operand = Some(build(inner, depth)?),
        }
      }
      let mut result =
        operand.ok_or(FormulaError::MalformedTree("sign without operand"))?;
      // Innermost sign applies first
      for op in signs.into_iter().rev() {
        result = Expr::UnaryOp {
          op,
          operand: Box::new(result),
        };
      }
      Ok(result)
    }
    Rule::Power => {
      let depth = descend(depth, 0)?;
      let mut inner = pair.into_inner();
      let base = build(next_pair(&mut inner, "missing base")?, depth)?;
      match inner.next() {
        None => Ok(base),
        Some(_operator) => {
          let exponent =
            build(next_pair(&mut inner, "missing exponent")?, depth)?;
          Ok(Expr::BinaryOp {
            op: BinaryOperator::Power,
            left: Box::new(base),
            right: Box::new(exponent),
          })
        }
      }
    }
    Rule::FunctionCall => {
      let depth = descend(depth, 0)?;
      let mut inner = pair.into_inner();
      let name = next_pair(&mut inner, "missing function name")?.as_str();
      let function = Function::from_name(name)
        .ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;
      let args = inner
        .map(|arg| build(arg, depth))
        .collect::<Result<Vec<_>, _>>()?;
      let arity = function.arity();
      if !arity.accepts(args.len()) {
        return Err(FormulaError::Arity {
          name: function.name().to_string(),
          expected: arity.to_string(),
          found: args.len(),
        });
      }
      Ok(Expr::FunctionCall { function, args })
    }
    Rule::Number => {
      let n = pair
        .as_str()
        .parse::<f64>()
        .map_err(|_| FormulaError::MalformedTree("invalid number"))?;
      Ok(Expr::Number(n))
    }
    Rule::Identifier => {
      let name = pair.as_str();
      if let Some(variable) = Variable::from_name(name) {
        Ok(Expr::Variable(variable))
      } else if let Some(constant) = Constant::from_name(name) {
        Ok(Expr::Constant(constant))
      } else {
        // Bare function names land here too: they have no value
        Err(FormulaError::UnknownIdentifier(name.to_string()))
      }
    }
    _ => Err(FormulaError::MalformedTree("unexpected rule")),
  }
}
