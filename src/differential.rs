//! Finite-difference derivatives and curvature of a scalar field.
//!
//! Every query samples a fixed 13-point stencil around (x, y): the centre,
//! the four axis neighbours at ±h, the four diagonal neighbours and the
//! four axis points at ±2h. First and second order terms use central
//! differences; third order terms use the standard five-point stencils.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::colormap::Color;
use crate::field::{FieldParams, ScalarField};
use crate::surface::{Domain, Resolution, sample_sparse};
use crate::utils::clamp;

/// Finite-difference step used when the caller does not supply a usable one.
pub const DEFAULT_STEP: f64 = 0.01;
/// Smallest accepted step; below it `h³` loses all precision.
pub const MIN_STEP: f64 = 1e-8;

/// Gradient magnitudes below this are not worth an arrow.
const MIN_ARROW_MAGNITUDE: f64 = 0.01;
const FIELD_ARROW_MAX_LENGTH: f64 = 1.5;
const HOVER_ARROW_MAX_LENGTH: f64 = 2.0;
/// Gradient magnitude that maps to the hot end of the arrow palette.
const MAGNITUDE_COLOR_RANGE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfacePoint {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstOrder {
  pub fx: f64,
  pub fy: f64,
  pub magnitude: f64,
  /// Angle of the gradient in radians, `atan2(fy, fx)`
  pub direction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondOrder {
  pub fxx: f64,
  pub fyy: f64,
  pub fxy: f64,
  pub gaussian_curvature: f64,
  pub mean_curvature: f64,
  pub laplacian: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThirdOrder {
  pub fxxx: f64,
  pub fyyy: f64,
  pub fxxy: f64,
  pub fxyy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivativeBundle {
  pub point: SurfacePoint,
  pub first_order: FirstOrder,
  pub second_order: SecondOrder,
  pub third_order: ThirdOrder,
}

/// Resolve the step actually used for a query.
pub fn effective_step(h: f64) -> f64 {
  if h.is_finite() && h >= MIN_STEP {
    h
  } else {
    DEFAULT_STEP
  }
}

/// Compute the full derivative bundle of `field` at (x, y).
///
/// Costs exactly 13 field evaluations. Evaluation failures inside the
/// stencil read as `0` (the field's fallback). Steps that are not finite
/// or fall below [`MIN_STEP`] are replaced by [`DEFAULT_STEP`].
pub fn compute_derivatives(
  field: &ScalarField,
  x: f64,
  y: f64,
  t: f64,
  amplitude: f64,
  omega: f64,
  h: f64,
) -> DerivativeBundle {
  let h = effective_step(h);
  let f = |px: f64, py: f64| field.evaluate(px, py, t, amplitude, omega);

  let center = f(x, y);
  let x_plus = f(x + h, y);
  let x_minus = f(x - h, y);
  let y_plus = f(x, y + h);
  let y_minus = f(x, y - h);

  let pp = f(x + h, y + h);
  let pm = f(x + h, y - h);
  let mp = f(x - h, y + h);
  let mm = f(x - h, y - h);

  let x_plus2 = f(x + 2.0 * h, y);
  let x_minus2 = f(x - 2.0 * h, y);
  let y_plus2 = f(x, y + 2.0 * h);
  let y_minus2 = f(x, y - 2.0 * h);

  let fx = (x_plus - x_minus) / (2.0 * h);
  let fy = (y_plus - y_minus) / (2.0 * h);

  let h2 = h * h;
  let fxx = (x_plus - 2.0 * center + x_minus) / h2;
  let fyy = (y_plus - 2.0 * center + y_minus) / h2;
  let fxy = (pp - pm - mp + mm) / (4.0 * h2);

  let h3 = 2.0 * h2 * h;
  let fxxx = (x_plus2 - 2.0 * x_plus + 2.0 * x_minus - x_minus2) / h3;
  let fyyy = (y_plus2 - 2.0 * y_plus + 2.0 * y_minus - y_minus2) / h3;
  let fxxy = (pp - pm - 2.0 * y_plus + 2.0 * y_minus + mp - mm) / h3;
  let fxyy = (pp - 2.0 * x_plus + pm - mp + 2.0 * x_minus - mm) / h3;

  let metric = 1.0 + fx * fx + fy * fy;
  let gaussian_curvature = (fxx * fyy - fxy * fxy) / (metric * metric);
  let mean_curvature = ((1.0 + fy * fy) * fxx - 2.0 * fx * fy * fxy
    + (1.0 + fx * fx) * fyy)
    / (2.0 * metric.powf(1.5));

  DerivativeBundle {
    point: SurfacePoint { x, y, z: center },
    first_order: FirstOrder {
      fx,
      fy,
      magnitude: (fx * fx + fy * fy).sqrt(),
      direction: fy.atan2(fx),
    },
    second_order: SecondOrder {
      fxx,
      fyy,
      fxy,
      gaussian_curvature,
      mean_curvature,
      laplacian: fxx + fyy,
    },
    third_order: ThirdOrder {
      fxxx,
      fyyy,
      fxxy,
      fxyy,
    },
  }
}

/// [`compute_derivatives`] with the parameters taken from a snapshot.
pub fn derivatives_at(
  field: &ScalarField,
  x: f64,
  y: f64,
  params: &FieldParams,
  h: f64,
) -> DerivativeBundle {
  let FieldParams {
    time,
    amplitude,
    omega,
  } = *params;
  compute_derivatives(field, x, y, time, amplitude, omega, h)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GradientMode {
  #[default]
  FirstDerivative,
  SecondDerivative,
  ThirdDerivative,
  Directional,
  Laplacian,
}

impl GradientMode {
  pub const ALL: [GradientMode; 5] = [
    GradientMode::FirstDerivative,
    GradientMode::SecondDerivative,
    GradientMode::ThirdDerivative,
    GradientMode::Directional,
    GradientMode::Laplacian,
  ];

  pub fn name(self) -> &'static str {
    match self {
      GradientMode::FirstDerivative => "firstDerivative",
      GradientMode::SecondDerivative => "secondDerivative",
      GradientMode::ThirdDerivative => "thirdDerivative",
      GradientMode::Directional => "directional",
      GradientMode::Laplacian => "laplacian",
    }
  }
}

impl fmt::Display for GradientMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown gradient mode `{0}`")]
pub struct UnknownGradientMode(pub String);

impl FromStr for GradientMode {
  type Err = UnknownGradientMode;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    GradientMode::ALL
      .into_iter()
      .find(|mode| mode.name() == s)
      .ok_or_else(|| UnknownGradientMode(s.to_string()))
  }
}

/// Renderer-independent description of one overlay arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientArrow {
  pub origin: [f64; 3],
  /// Unit vector in the (x, y) plane
  pub direction: [f64; 3],
  pub length: f64,
  pub color: Color,
}

fn unit_planar(fx: f64, fy: f64) -> [f64; 3] {
  let magnitude = (fx * fx + fy * fy).sqrt();
  if magnitude > 0.0 {
    [fx / magnitude, fy / magnitude, 0.0]
  } else {
    [1.0, 0.0, 0.0]
  }
}

/// Blue for flat regions through to red at steep ones.
fn magnitude_color(magnitude: f64) -> Color {
  let normalized = clamp(magnitude / MAGNITUDE_COLOR_RANGE, 0.0, 1.0);
  Color::from_hsl(0.7 - normalized * 0.7, 1.0, 0.5)
}

/// Arrow for one vector-field sample, or `None` when the gradient is too
/// flat to draw.
pub fn field_arrow(
  bundle: &DerivativeBundle,
  scale: f64,
) -> Option<GradientArrow> {
  let first = &bundle.first_order;
  if first.magnitude < MIN_ARROW_MAGNITUDE {
    return None;
  }
  Some(GradientArrow {
    origin: [bundle.point.x, bundle.point.y, bundle.point.z],
    direction: unit_planar(first.fx, first.fy),
    length: (first.magnitude * scale * 0.8).min(FIELD_ARROW_MAX_LENGTH),
    color: magnitude_color(first.magnitude),
  })
}

/// Arrow shown under the pointer. Only the first and second derivative
/// modes draw one.
pub fn hover_arrow(
  bundle: &DerivativeBundle,
  scale: f64,
  mode: GradientMode,
) -> Option<GradientArrow> {
  let origin = [bundle.point.x, bundle.point.y, bundle.point.z];
  let first = &bundle.first_order;
  match mode {
    GradientMode::FirstDerivative => Some(GradientArrow {
      origin,
      direction: unit_planar(first.fx, first.fy),
      length: (first.magnitude * scale).min(HOVER_ARROW_MAX_LENGTH),
      color: magnitude_color(first.magnitude),
    }),
    GradientMode::SecondDerivative => {
      let h = bundle.second_order.mean_curvature;
      let color = if h > 0.0 {
        Color::new(1.0, 0.3, 0.3)
      } else {
        Color::new(0.3, 0.3, 1.0)
      };
      Some(GradientArrow {
        origin,
        direction: [0.0, 0.0, 1.0],
        length: (h.abs() * scale * 10.0).min(HOVER_ARROW_MAX_LENGTH),
        color,
      })
    }
    _ => None,
  }
}

/// Sparse grid of derivative bundles paired with their arrows.
///
/// Only the first derivative mode produces field arrows; the other modes
/// return an empty list.
pub fn vector_field(
  field: &ScalarField,
  domain: &Domain,
  resolution: Resolution,
  density: f64,
  params: &FieldParams,
  scale: f64,
  mode: GradientMode,
) -> Vec<(DerivativeBundle, GradientArrow)> {
  if mode != GradientMode::FirstDerivative {
    return Vec::new();
  }
  sample_sparse(field, domain, resolution, density, params)
    .into_iter()
    .filter_map(|sample| {
      let bundle =
        derivatives_at(field, sample.x, sample.y, params, DEFAULT_STEP);
      field_arrow(&bundle, scale).map(|arrow| (bundle, arrow))
    })
    .collect()
}

/// Overlay settings and their clamping rules.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientOverlay {
  mode: GradientMode,
  scale: f64,
  density: f64,
  visible: bool,
}

impl Default for GradientOverlay {
  fn default() -> Self {
    GradientOverlay {
      mode: GradientMode::FirstDerivative,
      scale: 1.0,
      density: 0.3,
      visible: false,
    }
  }
}

impl GradientOverlay {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn mode(&self) -> GradientMode {
    self.mode
  }

  pub fn scale(&self) -> f64 {
    self.scale
  }

  pub fn density(&self) -> f64 {
    self.density
  }

  pub fn is_visible(&self) -> bool {
    self.visible
  }

  pub fn set_mode(&mut self, mode: GradientMode) {
    self.mode = mode;
  }

  pub fn set_scale(&mut self, scale: f64) {
    if scale.is_finite() && scale > 0.0 {
      self.scale = scale;
    }
  }

  pub fn set_density(&mut self, density: f64) {
    if !density.is_nan() {
      self.density = clamp(density, 0.1, 1.0);
    }
  }

  pub fn set_visible(&mut self, visible: bool) {
    self.visible = visible;
  }

  /// Arrows for the whole domain; empty while hidden.
  pub fn arrows(
    &self,
    field: &ScalarField,
    domain: &Domain,
    resolution: Resolution,
    params: &FieldParams,
  ) -> Vec<GradientArrow> {
    if !self.visible {
      return Vec::new();
    }
    vector_field(
      field,
      domain,
      resolution,
      self.density,
      params,
      self.scale,
      self.mode,
    )
    .into_iter()
    .map(|(_, arrow)| arrow)
    .collect()
  }

  pub fn hover_arrow(
    &self,
    bundle: &DerivativeBundle,
  ) -> Option<GradientArrow> {
    if !self.visible {
      return None;
    }
    hover_arrow(bundle, self.scale, self.mode)
  }
}
