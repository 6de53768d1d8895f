//! Rewrites common math shorthand into the canonical form the grammar
//! expects. The passes run in a fixed order:
//!
//! 1. `pi` / `PI` become `π`
//! 2. words mixing letters and digits are split (`x2` reads as `x` then
//!    `2`) unless the whole word is a known name such as `log10`
//! 3. implicit products get an explicit `*` (`2x`, `x(`, `)(`, `)x`, `2(`),
//!    never between a function name and its argument list; a factor
//!    followed by spaces and a group counts as well (`x (y)`)
//! 4. `a^b` and `a**b` become `pow(a, b)`, right-associatively
//! 5. products made adjacent by step 4 get their `*` as well
//!
//! The output is a fixed point: normalizing it again changes nothing.

use crate::syntax::{is_function_name, is_value_name};

#[derive(Debug, Clone, PartialEq)]
enum Token {
  Number(String),
  Ident(String),
  Operator(String),
  Open,
  Close,
  Comma,
  Space(String),
  Other(char),
}

impl Token {
  fn push_to(&self, out: &mut String) {
    match self {
      Token::Number(s)
      | Token::Ident(s)
      | Token::Operator(s)
      | Token::Space(s) => out.push_str(s),
      Token::Open => out.push('('),
      Token::Close => out.push(')'),
      Token::Comma => out.push(','),
      Token::Other(c) => out.push(*c),
    }
  }

  fn is_power(&self) -> bool {
    matches!(self, Token::Operator(op) if op == "^" || op == "**")
  }

  fn is_sign(&self) -> bool {
    matches!(self, Token::Operator(op) if op == "-" || op == "+")
  }

  /// Can end a factor on the left of an implicit product.
  fn ends_factor(&self) -> bool {
    match self {
      Token::Number(_) | Token::Close => true,
      Token::Ident(name) => is_value_name(name),
      _ => false,
    }
  }

  /// Can start a factor on the right of an implicit product.
  fn starts_factor(&self) -> bool {
    matches!(self, Token::Number(_) | Token::Ident(_) | Token::Open)
  }
}

pub fn normalize(text: &str) -> String {
  let tokens = tokenize(text);
  let tokens = insert_implicit_products(tokens);
  let tokens = rewrite_powers(tokens);
  let tokens = insert_implicit_products(tokens);

  let mut out = String::with_capacity(text.len() + 8);
  for token in &tokens {
    token.push_to(&mut out);
  }
  out
}

fn tokenize(text: &str) -> Vec<Token> {
  let chars: Vec<char> = text.chars().collect();
  let mut tokens = Vec::new();
  let mut i = 0;

  while i < chars.len() {
    let c = chars[i];
    if c.is_whitespace() {
      let start = i;
      while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
      }
      tokens.push(Token::Space(chars[start..i].iter().collect()));
    } else if c.is_ascii_digit()
      || (c == '.' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit()))
    {
      let start = i;
      while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
      }
      if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
          i += 1;
        }
      }
      tokens.push(Token::Number(chars[start..i].iter().collect()));
    } else if c.is_alphabetic() || c == '_' {
      let start = i;
      while i < chars.len()
        && (chars[i].is_alphanumeric() || chars[i] == '_')
      {
        i += 1;
      }
      let word: String = chars[start..i].iter().collect();
      push_word(&mut tokens, word);
    } else {
      i += 1;
      let token = match c {
        '(' => Token::Open,
        ')' => Token::Close,
        ',' => Token::Comma,
        '*' if chars.get(i) == Some(&'*') => {
          i += 1;
          Token::Operator("**".to_string())
        }
        '+' | '-' | '*' | '/' | '%' | '^' => Token::Operator(c.to_string()),
        other => Token::Other(other),
      };
      tokens.push(token);
    }
  }

  tokens
}

/// Push an identifier, canonicalizing π and splitting `x2`-style words
/// into alternating letter and digit tokens.
fn push_word(tokens: &mut Vec<Token>, word: String) {
  if word == "pi" || word == "PI" {
    tokens.push(Token::Ident("π".to_string()));
    return;
  }
  if is_function_name(&word)
    || is_value_name(&word)
    || !word.chars().any(|c| c.is_ascii_digit())
  {
    tokens.push(Token::Ident(word));
    return;
  }

  let mut run = String::new();
  let mut run_is_digits = false;
  for c in word.chars() {
    let is_digit = c.is_ascii_digit();
    if !run.is_empty() && is_digit != run_is_digits {
      let finished = std::mem::take(&mut run);
      tokens.push(word_piece(finished, run_is_digits));
    }
    run_is_digits = is_digit;
    run.push(c);
  }
  if !run.is_empty() {
    tokens.push(word_piece(run, run_is_digits));
  }
}

fn word_piece(piece: String, is_digits: bool) -> Token {
  if is_digits {
    Token::Number(piece)
  } else if piece == "pi" || piece == "PI" {
    Token::Ident("π".to_string())
  } else {
    Token::Ident(piece)
  }
}

fn insert_implicit_products(tokens: Vec<Token>) -> Vec<Token> {
  let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
  let mut iter = tokens.into_iter().peekable();

  while let Some(token) = iter.next() {
    let left_ends = token.ends_factor();
    let left_is_number = matches!(token, Token::Number(_));
    out.push(token);

    match iter.peek() {
      Some(next) if left_ends && next.starts_factor() => {
        // Two number tokens can only touch via `1.2.3`; leave it for the parser
        if !(left_is_number && matches!(next, Token::Number(_))) {
          out.push(Token::Operator("*".to_string()));
        }
      }
      // `x (y)` and `(x) (y)` read as products too; the gap is dropped
      Some(Token::Space(_)) if left_ends => {
        let mut lookahead = iter.clone();
        lookahead.next();
        if lookahead.peek() == Some(&Token::Open) {
          iter.next();
          out.push(Token::Operator("*".to_string()));
        }
      }
      _ => {}
    }
  }

  out
}

fn rewrite_powers(mut tokens: Vec<Token>) -> Vec<Token> {
  let mut k = tokens.len();
  while k > 0 {
    k -= 1;
    if !tokens[k].is_power() {
      continue;
    }
    let (Some(left_start), Some(right_end)) =
      (left_operand_start(&tokens, k), right_operand_end(&tokens, k))
    else {
      continue;
    };

    let left_end = skip_space_back(&tokens, k);
    let right_start = skip_space_forward(&tokens, k + 1);

    let mut replacement = Vec::with_capacity(right_end - left_start + 7);
    // Keep `pow` from fusing with a preceding word
    if left_start > 0 && matches!(tokens[left_start - 1], Token::Ident(_)) {
      replacement.push(Token::Space(" ".to_string()));
    }
    replacement.push(Token::Ident("pow".to_string()));
    replacement.push(Token::Open);
    replacement.extend_from_slice(&tokens[left_start..left_end]);
    replacement.push(Token::Comma);
    replacement.push(Token::Space(" ".to_string()));
    replacement.extend_from_slice(&tokens[right_start..right_end]);
    replacement.push(Token::Close);

    tokens.splice(left_start..right_end, replacement);
    // Rescan from the end; every rewrite removes one power operator
    k = tokens.len();
  }
  tokens
}

/// Index one past the last non-space token before `end`.
fn skip_space_back(tokens: &[Token], end: usize) -> usize {
  let mut j = end;
  while j > 0 && matches!(tokens[j - 1], Token::Space(_)) {
    j -= 1;
  }
  j
}

/// Index of the first non-space token at or after `start`.
fn skip_space_forward(tokens: &[Token], start: usize) -> usize {
  let mut i = start;
  while i < tokens.len() && matches!(tokens[i], Token::Space(_)) {
    i += 1;
  }
  i
}

/// Start index of the atom that ends right before the operator at `op`.
fn left_operand_start(tokens: &[Token], op: usize) -> Option<usize> {
  let end = skip_space_back(tokens, op);
  if end == 0 {
    return None;
  }
  match &tokens[end - 1] {
    Token::Number(_) | Token::Ident(_) => Some(end - 1),
    Token::Close => {
      let open = matching_open(tokens, end - 1)?;
      let before = skip_space_back(tokens, open);
      // A name right before a group is a call, known or not
      if before > 0 && matches!(tokens[before - 1], Token::Ident(_)) {
        Some(before - 1)
      } else {
        Some(open)
      }
    }
    _ => None,
  }
}

/// End index (exclusive) of the atom that follows the operator at `op`,
/// including an optional leading sign.
fn right_operand_end(tokens: &[Token], op: usize) -> Option<usize> {
  let mut i = skip_space_forward(tokens, op + 1);
  if tokens.get(i).is_some_and(Token::is_sign) {
    i = skip_space_forward(tokens, i + 1);
  }
  match tokens.get(i)? {
    Token::Number(_) => Some(i + 1),
    Token::Ident(_) => {
      let after = skip_space_forward(tokens, i + 1);
      if tokens.get(after) == Some(&Token::Open) {
        Some(matching_close(tokens, after)? + 1)
      } else {
        Some(i + 1)
      }
    }
    Token::Open => Some(matching_close(tokens, i)? + 1),
    _ => None,
  }
}

fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
  let mut depth = 0usize;
  for (offset, token) in tokens[open..].iter().enumerate() {
    match token {
      Token::Open => depth += 1,
      Token::Close => {
        depth -= 1;
        if depth == 0 {
          return Some(open + offset);
        }
      }
      _ => {}
    }
  }
  None
}

fn matching_open(tokens: &[Token], close: usize) -> Option<usize> {
  let mut depth = 0usize;
  for j in (0..=close).rev() {
    match tokens[j] {
      Token::Close => depth += 1,
      Token::Open => {
        depth -= 1;
        if depth == 0 {
          return Some(j);
        }
      }
      _ => {}
    }
  }
  None
}
