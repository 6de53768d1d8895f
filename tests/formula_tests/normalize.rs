use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod implicit_multiplication {
  use super::*;

  #[test]
  fn number_before_variable() {
    assert_eq!(normalize("2x"), "2*x");
  }

  #[test]
  fn function_call_is_left_alone() {
    assert_eq!(normalize("sin(x)"), "sin(x)");
    assert_eq!(normalize("2sin(x)"), "2*sin(x)");
  }

  #[test]
  fn variable_before_group() {
    assert_eq!(normalize("x(y + 1)"), "x*(y + 1)");
    assert_eq!(normalize("x (y)"), "x*(y)");
  }

  #[test]
  fn spaced_groups_after_any_factor() {
    assert_eq!(normalize("x^2 (y)"), "pow(x, 2)*(y)");
    assert_eq!(normalize("(x+1) (x-1)"), "(x+1)*(x-1)");
    assert_eq!(normalize("2 (x)"), "2*(x)");
    assert_eq!(normalize("sin (x)"), "sin (x)");
  }

  #[test]
  fn adjacent_groups() {
    assert_eq!(normalize("(x+1)(x-1)"), "(x+1)*(x-1)");
    assert_eq!(normalize("(x+1)2"), "(x+1)*2");
    assert_eq!(normalize("2(x)"), "2*(x)");
  }

  #[test]
  fn letter_digit_words_are_split() {
    assert_eq!(normalize("x2"), "x*2");
    assert_eq!(normalize("log10(x)"), "log10(x)");
  }

  #[test]
  fn pi_spellings() {
    assert_eq!(normalize("pi*x"), "π*x");
    assert_eq!(normalize("2PI"), "2*π");
  }

  #[test]
  fn whitespace_is_preserved() {
    let formula = "A * sin(x + ω*t) * cos(y - ω*t)";
    assert_eq!(normalize(formula), formula);
  }
}

mod powers {
  use super::*;

  #[test]
  fn caret_and_double_star() {
    assert_eq!(normalize("x^2"), "pow(x, 2)");
    assert_eq!(normalize("x**2"), "pow(x, 2)");
    assert_eq!(normalize("x ^ 2"), "pow(x, 2)");
  }

  #[test]
  fn right_associative() {
    assert_eq!(normalize("x^2^3"), "pow(x, pow(2, 3))");
  }

  #[test]
  fn call_and_group_operands() {
    assert_eq!(normalize("sin(x)^2"), "pow(sin(x), 2)");
    assert_eq!(normalize("(x+1)^2"), "pow((x+1), 2)");
    assert_eq!(normalize("2^(x*y)"), "pow(2, (x*y))");
  }

  #[test]
  fn signed_exponent() {
    assert_eq!(normalize("2^-x"), "pow(2, -x)");
  }

  #[test]
  fn implicit_product_binds_looser_than_power() {
    assert_eq!(normalize("2x^2"), "2*pow(x, 2)");
  }

  #[test]
  fn leading_sign_stays_outside() {
    assert_eq!(normalize("-x^2"), "-pow(x, 2)");
  }
}

mod idempotence {
  use super::*;

  const ATOMS: &[&str] = &[
    "x", "y", "t", "A", "ω", "2", "3.5", "pi", "e", "sin(x)", "(x+1)",
    "cos(y - t)", "sqrt(x*x + y*y)",
  ];
  const JOINERS: &[&str] =
    &["+", "-", "*", "/", "^", "**", "", " ", " * ", " ^ "];

  fn random_formula(rng: &mut StdRng) -> String {
    let terms = rng.gen_range(1..6);
    let mut formula = String::new();
    for i in 0..terms {
      if i > 0 {
        formula.push_str(JOINERS[rng.gen_range(0..JOINERS.len())]);
      }
      formula.push_str(ATOMS[rng.gen_range(0..ATOMS.len())]);
    }
    formula
  }

  #[test]
  fn normalize_is_a_fixed_point() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..2000 {
      let formula = random_formula(&mut rng);
      let once = normalize(&formula);
      assert_eq!(normalize(&once), once, "input: {formula}");
    }
  }

  #[test]
  fn normalized_text_evaluates_like_the_explicit_form() {
    let implicit = compile("2x").unwrap();
    let explicit = compile("2*x").unwrap();
    for x in [-3.0, 0.0, 0.25, 7.0] {
      assert_eq!(
        implicit.call(x, 0.0, 0.0, 1.0, 0.5),
        explicit.call(x, 0.0, 0.0, 1.0, 0.5)
      );
    }
  }
}
