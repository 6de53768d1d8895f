use super::*;
use std::f64::consts::FRAC_PI_4;

mod derivatives {
  use super::*;

  #[test]
  fn paraboloid_at_one_one() {
    let f = field("x*x + y*y");
    let bundle = compute_derivatives(&f, 1.0, 1.0, 0.0, 1.0, 0.5, 0.01);

    assert_abs_diff_eq!(bundle.point.z, 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(bundle.first_order.fx, 2.0, epsilon = 1e-2);
    assert_abs_diff_eq!(bundle.first_order.fy, 2.0, epsilon = 1e-2);
    assert_abs_diff_eq!(bundle.second_order.fxx, 2.0, epsilon = 1e-2);
    assert_abs_diff_eq!(bundle.second_order.fyy, 2.0, epsilon = 1e-2);
    assert_abs_diff_eq!(bundle.second_order.fxy, 0.0, epsilon = 1e-2);
    assert_abs_diff_eq!(bundle.second_order.laplacian, 4.0, epsilon = 1e-2);
  }

  #[test]
  fn derived_scalars() {
    let f = field("x*x + y*y");
    let bundle = compute_derivatives(&f, 1.0, 1.0, 0.0, 1.0, 0.5, 0.01);

    assert_abs_diff_eq!(
      bundle.first_order.magnitude,
      8.0_f64.sqrt(),
      epsilon = 1e-6
    );
    assert_abs_diff_eq!(
      bundle.first_order.direction,
      FRAC_PI_4,
      epsilon = 1e-9
    );
    // (fxx·fyy − fxy²) / (1 + fx² + fy²)²
    assert_abs_diff_eq!(
      bundle.second_order.gaussian_curvature,
      4.0 / 81.0,
      epsilon = 1e-6
    );
    assert_abs_diff_eq!(
      bundle.second_order.mean_curvature,
      10.0 / 27.0,
      epsilon = 1e-6
    );
  }

  #[test]
  fn third_order_of_cubics() {
    let f = field("x^3 + x*x*y + 2*x*y*y + y^3");
    let bundle = compute_derivatives(&f, 0.5, -0.25, 0.0, 1.0, 0.5, 0.01);
    let third = bundle.third_order;
    assert_abs_diff_eq!(third.fxxx, 6.0, epsilon = 1e-4);
    assert_abs_diff_eq!(third.fyyy, 6.0, epsilon = 1e-4);
    assert_abs_diff_eq!(third.fxxy, 2.0, epsilon = 1e-4);
    assert_abs_diff_eq!(third.fxyy, 4.0, epsilon = 1e-4);
  }

  #[test]
  fn costs_thirteen_evaluations() {
    let f = field("sin(x) * cos(y)");
    compute_derivatives(&f, 0.3, 0.4, 0.0, 1.0, 0.5, DEFAULT_STEP);
    assert_eq!(f.evaluation_count(), 13);
  }

  #[test]
  fn deterministic_and_step_fallback() {
    let f = field("A * sin(x + ω*t) * cos(y - ω*t)");
    let a = compute_derivatives(&f, 0.7, -1.2, 2.0, 1.5, 0.5, DEFAULT_STEP);
    let b = compute_derivatives(&f, 0.7, -1.2, 2.0, 1.5, 0.5, DEFAULT_STEP);
    assert_eq!(a, b);
    for bad in [0.0, -0.5, f64::NAN, f64::INFINITY, 1e-9, 1e-300] {
      assert_eq!(compute_derivatives(&f, 0.7, -1.2, 2.0, 1.5, 0.5, bad), a);
    }
  }

  #[test]
  fn tiny_steps_keep_the_bundle_finite() {
    let f = field("x*x*x + y*y");
    let bundle = compute_derivatives(&f, 1.0, 1.0, 0.0, 1.0, 0.5, 1e-300);
    let third = bundle.third_order;
    for value in [third.fxxx, third.fyyy, third.fxxy, third.fxyy] {
      assert!(value.is_finite());
    }
    assert!(bundle.second_order.mean_curvature.is_finite());
  }

  #[test]
  fn singular_stencil_points_read_as_zero() {
    let f = field("1/x");
    let bundle = compute_derivatives(&f, 0.0, 0.0, 0.0, 1.0, 0.5, 0.01);
    assert_eq!(bundle.point.z, 0.0);
    assert!(bundle.first_order.fx.is_finite());
    assert!(f.warning_count() >= 1);
  }

  #[test]
  fn bundle_serializes_in_camel_case() {
    let f = field("x");
    let bundle = compute_derivatives(&f, 0.0, 0.0, 0.0, 1.0, 0.5, 0.01);
    let json = serde_json::to_value(bundle).unwrap();
    assert!(json["firstOrder"]["magnitude"].is_number());
    assert!(json["secondOrder"]["gaussianCurvature"].is_number());
    assert!(json["thirdOrder"]["fxxy"].is_number());
    assert_eq!(json["point"]["x"], 0.0);
  }
}

mod arrows {
  use super::*;

  fn unit_domain() -> Domain {
    Domain::new(-1.0, 1.0, -1.0, 1.0)
  }

  #[test]
  fn sloped_plane_vector_field() {
    let f = field("x");
    let arrows = vector_field(
      &f,
      &unit_domain(),
      Resolution::new(20, 20),
      0.1,
      &FieldParams::default(),
      1.0,
      GradientMode::FirstDerivative,
    );
    // step = 2 / (20 · 0.1) = 1, so three samples per axis
    assert_eq!(arrows.len(), 9);
    for (bundle, arrow) in &arrows {
      assert_abs_diff_eq!(bundle.first_order.fx, 1.0, epsilon = 1e-9);
      assert_abs_diff_eq!(arrow.length, 0.8, epsilon = 1e-9);
      assert_abs_diff_eq!(arrow.direction[0], 1.0, epsilon = 1e-9);
      assert_abs_diff_eq!(arrow.direction[1], 0.0, epsilon = 1e-9);
      assert_eq!(arrow.origin[0], bundle.point.x);
    }
  }

  #[test]
  fn flat_field_has_no_arrows() {
    let f = field("1");
    let arrows = vector_field(
      &f,
      &unit_domain(),
      Resolution::new(20, 20),
      0.3,
      &FieldParams::default(),
      1.0,
      GradientMode::FirstDerivative,
    );
    assert!(arrows.is_empty());
  }

  #[test]
  fn only_first_derivative_mode_draws_a_field() {
    let f = field("x*y");
    let arrows = vector_field(
      &f,
      &unit_domain(),
      Resolution::new(20, 20),
      0.3,
      &FieldParams::default(),
      1.0,
      GradientMode::Laplacian,
    );
    assert!(arrows.is_empty());
  }

  #[test]
  fn mode_names_round_trip() {
    for mode in GradientMode::ALL {
      assert_eq!(mode.to_string().parse::<GradientMode>(), Ok(mode));
    }
    assert_eq!(GradientMode::SecondDerivative.to_string(), "secondDerivative");
    let err = "curl".parse::<GradientMode>().unwrap_err();
    assert_eq!(err.to_string(), "unknown gradient mode `curl`");
  }

  #[test]
  fn field_arrow_length_is_capped() {
    let f = field("10*x");
    let bundle = compute_derivatives(&f, 0.0, 0.0, 0.0, 1.0, 0.5, 0.01);
    let arrow = field_arrow(&bundle, 1.0).unwrap();
    assert_eq!(arrow.length, 1.5);
    // Steep gradients sit at the red end of the palette
    assert!(arrow.color.r > 0.99 && arrow.color.b < 0.01);
  }

  #[test]
  fn hover_arrows_per_mode() {
    let f = field("x*x + y*y");
    let bundle = compute_derivatives(&f, 0.0, 0.0, 0.0, 1.0, 0.5, 0.01);

    // Mean curvature at the bottom of the bowl is 2
    let curvature = hover_arrow(&bundle, 1.0, GradientMode::SecondDerivative)
      .unwrap();
    assert_abs_diff_eq!(curvature.length, 2.0, epsilon = 1e-9);
    assert_eq!(curvature.direction, [0.0, 0.0, 1.0]);
    assert_eq!(curvature.color.r, 1.0);

    let slope = hover_arrow(&bundle, 1.0, GradientMode::FirstDerivative)
      .unwrap();
    assert_abs_diff_eq!(slope.length, 0.0, epsilon = 1e-9);

    assert!(hover_arrow(&bundle, 1.0, GradientMode::ThirdDerivative).is_none());
  }

  #[test]
  fn overlay_clamps_and_hides() {
    let mut overlay = GradientOverlay::new();
    assert_eq!(overlay.density(), 0.3);
    assert_eq!(overlay.scale(), 1.0);
    assert!(!overlay.is_visible());

    overlay.set_density(5.0);
    assert_eq!(overlay.density(), 1.0);
    overlay.set_density(0.0);
    assert_eq!(overlay.density(), 0.1);
    overlay.set_scale(-2.0);
    assert_eq!(overlay.scale(), 1.0);

    let f = field("x");
    let params = FieldParams::default();
    let resolution = Resolution::new(20, 20);
    assert!(overlay.arrows(&f, &unit_domain(), resolution, &params).is_empty());

    overlay.set_visible(true);
    assert_eq!(
      overlay.arrows(&f, &unit_domain(), resolution, &params).len(),
      9
    );

    overlay.set_mode(GradientMode::Directional);
    assert_eq!(overlay.mode(), GradientMode::Directional);
    assert!(overlay.arrows(&f, &unit_domain(), resolution, &params).is_empty());
  }
}
