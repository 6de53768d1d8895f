use super::*;

mod defaults {
  use super::*;

  #[test]
  fn default_surface() {
    let v = visualizer();
    assert_eq!(v.grid().vertex_count(), 121 * 121);
    assert_eq!(v.triangle_indices().len(), 120 * 120 * 6);
    assert_eq!(v.vertex_buffer().len(), 121 * 121 * 3);
    assert_eq!(v.colors().len(), 121 * 121 * 3);
    assert_eq!(v.config().formula.preset, "sin(x) * cos(y)");
    assert_eq!(v.config().rendering.color_map, ColorMapType::RgbSpatial);
    assert_eq!(v.step(), DEFAULT_STEP);
    assert!(!v.overlay().is_visible());
    assert!(v.arrows().is_empty());
  }

  #[test]
  fn default_formula_is_animated() {
    let v = visualizer();
    assert!(v.field().expression().is_time_dependent());
  }
}

mod formulas {
  use super::*;

  #[test]
  fn rejected_formula_keeps_the_previous_one() {
    let mut v = visualizer();
    v.set_formula("x * y").unwrap();
    let before = v.grid().clone();

    let err = v.set_formula("eval(1)").unwrap_err();
    assert!(err.is_unsafe());
    let err = v.set_formula("x +").unwrap_err();
    assert!(err.is_syntax());

    assert_eq!(v.config().formula.text, "x * y");
    assert_eq!(v.field().expression().source(), "x * y");
    assert_eq!(v.grid(), &before);
  }

  #[test]
  fn preset_selection() {
    let mut v = visualizer();
    v.set_preset("sin(x) + cos(y)").unwrap();
    assert_eq!(v.config().formula.preset, "sin(x) + cos(y)");
    assert_eq!(v.config().formula.text, "A * (sin(x + ω*t) + cos(y + ω*t))");

    let err = v.set_preset("tan(x)").unwrap_err();
    assert!(matches!(
      err,
      FormulaError::UnknownPreset(ref key) if key == "tan(x)"
    ));
    assert_eq!(v.config().formula.preset, "sin(x) + cos(y)");
  }
}

mod animation {
  use super::*;

  #[test]
  fn advance_only_while_playing() {
    let mut v = visualizer();
    v.set_formula("t").unwrap();
    assert!(!v.advance(1.0));
    assert_eq!(v.config().animation.time, 0.0);

    v.set_playing(true);
    v.set_time_warp(2.0);
    assert!(v.advance(0.5));
    assert_eq!(v.config().animation.time, 1.0);
    assert_eq!(v.grid().bounds().max_z, 1.0);

    assert!(!v.advance(f64::NAN));
    assert_eq!(v.config().animation.time, 1.0);
  }

  #[test]
  fn amplitude_rescales_heights() {
    let mut v = visualizer();
    v.set_formula("A").unwrap();
    v.set_animation(3.0, 0.5);
    assert_eq!(v.grid().bounds().min_z, 3.0);
    assert_eq!(v.params().amplitude, 3.0);

    v.set_time(4.0);
    assert_eq!(v.params().time, 4.0);
    assert_eq!(v.grid().params().time, 4.0);
  }

  #[test]
  fn non_finite_time_warp_is_ignored() {
    let mut v = visualizer();
    v.set_time_warp(f64::INFINITY);
    assert_eq!(v.config().animation.time_warp, 1.0);
  }
}

mod layout {
  use super::*;

  #[test]
  fn resolution_is_clamped() {
    let mut v = visualizer();
    v.set_resolution(Resolution::new(5, 1000));
    assert_eq!(v.grid().segments_x(), 20);
    assert_eq!(v.grid().segments_y(), 600);
    assert_eq!(v.config().resolution, Resolution::new(20, 600));
  }

  #[test]
  fn domain_is_ordered() {
    let mut v = visualizer();
    v.set_formula("x").unwrap();
    v.set_domain(Domain::new(2.0, -2.0, -1.0, 1.0));
    assert_eq!(v.config().domain.x_min, -2.0);
    assert_eq!(v.grid().bounds().max_z, 2.0);
  }
}

mod derivatives {
  use super::*;

  #[test]
  fn paraboloid_gradient() {
    let mut v = visualizer();
    v.set_formula("x*x + y*y").unwrap();
    let bundle = v.derivatives_at(1.0, 1.0);
    assert_abs_diff_eq!(bundle.first_order.fx, 2.0, epsilon = 1e-6);
    assert_abs_diff_eq!(bundle.first_order.fy, 2.0, epsilon = 1e-6);
    assert_abs_diff_eq!(bundle.second_order.laplacian, 4.0, epsilon = 1e-4);
  }

  #[test]
  fn invalid_step_falls_back() {
    let mut v = visualizer();
    v.set_step(0.001);
    assert_eq!(v.step(), 0.001);
    v.set_step(-1.0);
    assert_eq!(v.step(), DEFAULT_STEP);
    v.set_step(f64::NAN);
    assert_eq!(v.step(), DEFAULT_STEP);
  }

  #[test]
  fn hover_arrow_follows_overlay() {
    let mut v = visualizer();
    v.set_formula("x").unwrap();
    assert!(v.hover_arrow(0.5, 0.5).is_none());

    v.set_overlay_visible(true);
    let arrow = v.hover_arrow(0.5, 0.5).unwrap();
    assert_abs_diff_eq!(arrow.length, 1.0, epsilon = 1e-9);
    assert_eq!(arrow.origin[0], 0.5);

    v.set_overlay_mode(GradientMode::SecondDerivative);
    let arrow = v.hover_arrow(0.5, 0.5).unwrap();
    assert_eq!(arrow.direction, [0.0, 0.0, 1.0]);
  }

  #[test]
  fn overlay_arrows_cover_the_domain() {
    let mut v = visualizer();
    v.set_formula("x").unwrap();
    v.set_domain(Domain::new(-1.0, 1.0, -1.0, 1.0));
    v.set_resolution(Resolution::new(20, 20));
    v.set_overlay_visible(true);
    v.set_overlay_density(0.1);
    v.set_overlay_scale(1.0);
    assert_eq!(v.arrows().len(), 9);
  }
}
