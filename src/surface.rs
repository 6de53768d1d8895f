//! Dense and sparse sampling of a scalar field over a rectangular domain.
//!
//! The dense grid is stored row-major with x varying fastest, so vertex
//! `(i, j)` lives at index `i + j * (segments_x + 1)`.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::field::{FieldParams, ScalarField};
use crate::utils::clamp;

/// Smallest segment count a configured surface may use.
pub const MIN_SEGMENTS: u32 = 20;
/// Largest segment count along either axis, for any grid.
pub const MAX_SEGMENTS: u32 = 600;

/// Rectangular (x, y) region, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
  pub x_min: f64,
  pub x_max: f64,
  pub y_min: f64,
  pub y_max: f64,
}

impl Default for Domain {
  fn default() -> Self {
    Domain::square(3.0 * PI)
  }
}

impl Domain {
  /// Build a domain, ordering each axis so min ≤ max. A non-finite bound
  /// falls back to the default domain's bound on that side.
  pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
    let fallback = Domain::default();
    let pick = |value: f64, default: f64| {
      if value.is_finite() { value } else { default }
    };
    let (x_min, x_max) =
      ordered(pick(x_min, fallback.x_min), pick(x_max, fallback.x_max));
    let (y_min, y_max) =
      ordered(pick(y_min, fallback.y_min), pick(y_max, fallback.y_max));
    Domain {
      x_min,
      x_max,
      y_min,
      y_max,
    }
  }

  /// `[-half, half]` on both axes
  pub fn square(half: f64) -> Self {
    Domain {
      x_min: -half,
      x_max: half,
      y_min: -half,
      y_max: half,
    }
  }

  /// Re-run the constructor checks, e.g. after deserializing.
  pub fn normalized(self) -> Self {
    Domain::new(self.x_min, self.x_max, self.y_min, self.y_max)
  }

  pub fn width(&self) -> f64 {
    self.x_max - self.x_min
  }

  pub fn height(&self) -> f64 {
    self.y_max - self.y_min
  }

  pub fn contains(&self, x: f64, y: f64) -> bool {
    x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
  }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
  if a <= b { (a, b) } else { (b, a) }
}

/// Segment counts of the surface mesh, clamped to
/// [`MIN_SEGMENTS`]`..=`[`MAX_SEGMENTS`] per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RequestedResolution")]
pub struct Resolution {
  x: u32,
  y: u32,
}

/// Resolution as it arrives from outside, before clamping.
#[derive(Deserialize)]
struct RequestedResolution {
  x: f64,
  y: f64,
}

impl From<RequestedResolution> for Resolution {
  fn from(requested: RequestedResolution) -> Self {
    Resolution::from_f64(requested.x, requested.y)
  }
}

impl Default for Resolution {
  fn default() -> Self {
    Resolution::square(120)
  }
}

impl Resolution {
  pub fn new(x: u32, y: u32) -> Self {
    Resolution {
      x: x.clamp(MIN_SEGMENTS, MAX_SEGMENTS),
      y: y.clamp(MIN_SEGMENTS, MAX_SEGMENTS),
    }
  }

  pub fn square(segments: u32) -> Self {
    Resolution::new(segments, segments)
  }

  /// Rounds, then clamps. NaN reads as the minimum.
  pub fn from_f64(x: f64, y: f64) -> Self {
    let segments = |value: f64| {
      clamp(value.round(), MIN_SEGMENTS as f64, MAX_SEGMENTS as f64) as u32
    };
    Resolution::new(segments(x), segments(y))
  }

  pub fn x(&self) -> u32 {
    self.x
  }

  pub fn y(&self) -> u32 {
    self.y
  }

  /// Vertices in a grid at this resolution.
  pub fn vertex_count(&self) -> usize {
    (self.x as usize + 1) * (self.y as usize + 1)
  }
}

/// Running min/max over a sampled set, used to normalize colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
  pub min_x: f64,
  pub max_x: f64,
  pub min_y: f64,
  pub max_y: f64,
  pub min_z: f64,
  pub max_z: f64,
}

impl Bounds {
  fn empty() -> Self {
    Bounds {
      min_x: f64::INFINITY,
      max_x: f64::NEG_INFINITY,
      min_y: f64::INFINITY,
      max_y: f64::NEG_INFINITY,
      min_z: f64::INFINITY,
      max_z: f64::NEG_INFINITY,
    }
  }

  fn include(&mut self, x: f64, y: f64, z: f64) {
    self.min_x = self.min_x.min(x);
    self.max_x = self.max_x.max(x);
    self.min_y = self.min_y.min(y);
    self.max_y = self.max_y.max(y);
    self.include_z(z);
  }

  fn include_z(&mut self, z: f64) {
    self.min_z = self.min_z.min(z);
    self.max_z = self.max_z.max(z);
  }

  pub fn z_range(&self) -> f64 {
    self.max_z - self.min_z
  }
}

/// One evaluated (x, y) coordinate and the parameters it was evaluated
/// under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
  pub x: f64,
  pub y: f64,
  pub z: f64,
  pub params: FieldParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
  segments_x: usize,
  segments_y: usize,
  domain: Domain,
  params: FieldParams,
  /// Flat x, y, z triples
  positions: Vec<f64>,
  bounds: Bounds,
}

/// Coordinate of grid line `i` out of `n`; both ends land exactly on the
/// domain edges.
fn axis_coordinate(min: f64, max: f64, i: usize, n: usize) -> f64 {
  if i == n {
    max
  } else {
    min + (i as f64 / n as f64) * (max - min)
  }
}

/// Evaluate `field` on a `(segments_x + 1) × (segments_y + 1)` grid
/// spanning `domain` edge to edge.
///
/// Segment counts are raised to at least 1 and capped at
/// [`MAX_SEGMENTS`]; the configured-surface minimum of [`MIN_SEGMENTS`]
/// is enforced by [`Resolution`], not here.
pub fn sample_grid(
  field: &ScalarField,
  domain: &Domain,
  segments_x: usize,
  segments_y: usize,
  params: &FieldParams,
) -> SurfaceGrid {
  let segments_x = segments_x.clamp(1, MAX_SEGMENTS as usize);
  let segments_y = segments_y.clamp(1, MAX_SEGMENTS as usize);

  let mut positions =
    Vec::with_capacity((segments_x + 1) * (segments_y + 1) * 3);
  let mut bounds = Bounds::empty();
  for j in 0..=segments_y {
    let y = axis_coordinate(domain.y_min, domain.y_max, j, segments_y);
    for i in 0..=segments_x {
      let x = axis_coordinate(domain.x_min, domain.x_max, i, segments_x);
      let z = field.evaluate_at(x, y, params);
      bounds.include(x, y, z);
      positions.extend_from_slice(&[x, y, z]);
    }
  }

  SurfaceGrid {
    segments_x,
    segments_y,
    domain: *domain,
    params: *params,
    positions,
    bounds,
  }
}

impl SurfaceGrid {
  pub fn segments_x(&self) -> usize {
    self.segments_x
  }

  pub fn segments_y(&self) -> usize {
    self.segments_y
  }

  pub fn domain(&self) -> &Domain {
    &self.domain
  }

  /// Parameters the current z values were computed under.
  pub fn params(&self) -> &FieldParams {
    &self.params
  }

  pub fn bounds(&self) -> &Bounds {
    &self.bounds
  }

  pub fn vertex_count(&self) -> usize {
    self.positions.len() / 3
  }

  pub fn positions(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
    self
      .positions
      .chunks_exact(3)
      .map(|chunk| [chunk[0], chunk[1], chunk[2]])
  }

  pub fn points(&self) -> impl Iterator<Item = SamplePoint> + '_ {
    let params = self.params;
    self
      .positions()
      .map(move |[x, y, z]| SamplePoint { x, y, z, params })
  }

  /// Vertex at column `i`, row `j`.
  pub fn point(&self, i: usize, j: usize) -> Option<SamplePoint> {
    if i > self.segments_x || j > self.segments_y {
      return None;
    }
    let offset = (i + j * (self.segments_x + 1)) * 3;
    Some(SamplePoint {
      x: self.positions[offset],
      y: self.positions[offset + 1],
      z: self.positions[offset + 2],
      params: self.params,
    })
  }

  /// Single-precision copy of the positions for a GPU vertex buffer.
  pub fn vertex_buffer(&self) -> Vec<f32> {
    self.positions.iter().map(|&v| v as f32).collect()
  }

  /// Two triangles per quad, `(a, b, c)` and `(b, d, c)`, where `a` is
  /// the quad's lower-left vertex, `b` the one above it, `c` the one to
  /// its right and `d` the diagonal.
  pub fn triangle_indices(&self) -> Vec<u32> {
    let row = self.segments_x + 1;
    let mut indices =
      Vec::with_capacity(self.segments_x * self.segments_y * 6);
    for j in 0..self.segments_y {
      for i in 0..self.segments_x {
        let a = (i + j * row) as u32;
        let b = (i + (j + 1) * row) as u32;
        let c = (i + 1 + j * row) as u32;
        let d = (i + 1 + (j + 1) * row) as u32;
        indices.extend_from_slice(&[a, b, c, b, d, c]);
      }
    }
    indices
  }

  /// Recompute z at every existing (x, y) under new parameters. The x
  /// and y bounds stay as they are.
  pub fn update_z(&mut self, field: &ScalarField, params: &FieldParams) {
    self.params = *params;
    self.bounds.min_z = f64::INFINITY;
    self.bounds.max_z = f64::NEG_INFINITY;
    for vertex in self.positions.chunks_exact_mut(3) {
      let z = field.evaluate_at(vertex[0], vertex[1], params);
      vertex[2] = z;
      self.bounds.include_z(z);
    }
  }
}

/// Number of whole steps of `step` that fit in `span`, tolerating the
/// rounding error of the division.
fn step_count(span: f64, step: f64) -> usize {
  if !(step > 0.0) || !step.is_finite() {
    return 0;
  }
  (span / step + 1e-9).floor() as usize
}

/// Evenly spaced samples for the vector-field overlay.
///
/// The step along each axis is `extent / (segments · density)` with the
/// density clamped to `[0.1, 1]`, starting at the domain minimum and
/// stopping at the last coordinate that does not pass the maximum.
pub fn sample_sparse(
  field: &ScalarField,
  domain: &Domain,
  resolution: Resolution,
  density: f64,
  params: &FieldParams,
) -> Vec<SamplePoint> {
  let density = if density.is_nan() {
    0.1
  } else {
    clamp(density, 0.1, 1.0)
  };
  let step_x = domain.width() / (resolution.x() as f64 * density);
  let step_y = domain.height() / (resolution.y() as f64 * density);
  let count_x = step_count(domain.width(), step_x);
  let count_y = step_count(domain.height(), step_y);

  let mut samples = Vec::with_capacity((count_x + 1) * (count_y + 1));
  for i in 0..=count_x {
    let x = domain.x_min + i as f64 * step_x;
    for j in 0..=count_y {
      let y = domain.y_min + j as f64 * step_y;
      samples.push(SamplePoint {
        x,
        y,
        z: field.evaluate_at(x, y, params),
        params: *params,
      });
    }
  }
  samples
}

/// Owns the surface grid and the inputs it was built from.
///
/// Domain, resolution and field changes rebuild the grid; parameter
/// changes only re-evaluate z in place.
#[derive(Debug, Clone)]
pub struct SurfaceSampler {
  domain: Domain,
  resolution: Resolution,
  grid: SurfaceGrid,
}

impl SurfaceSampler {
  pub fn new(
    field: &ScalarField,
    domain: Domain,
    resolution: Resolution,
    params: &FieldParams,
  ) -> Self {
    let domain = domain.normalized();
    let grid = sample_grid(
      field,
      &domain,
      resolution.x() as usize,
      resolution.y() as usize,
      params,
    );
    SurfaceSampler {
      domain,
      resolution,
      grid,
    }
  }

  pub fn domain(&self) -> &Domain {
    &self.domain
  }

  pub fn resolution(&self) -> Resolution {
    self.resolution
  }

  pub fn grid(&self) -> &SurfaceGrid {
    &self.grid
  }

  pub fn params(&self) -> &FieldParams {
    self.grid.params()
  }

  fn regenerate(&mut self, field: &ScalarField) {
    let params = *self.grid.params();
    self.grid = sample_grid(
      field,
      &self.domain,
      self.resolution.x() as usize,
      self.resolution.y() as usize,
      &params,
    );
  }

  pub fn set_domain(&mut self, field: &ScalarField, domain: Domain) {
    self.domain = domain.normalized();
    self.regenerate(field);
  }

  pub fn set_resolution(
    &mut self,
    field: &ScalarField,
    resolution: Resolution,
  ) {
    self.resolution = resolution;
    self.regenerate(field);
  }

  /// The formula changed: same (x, y) layout, every z recomputed.
  pub fn set_field(&mut self, field: &ScalarField) {
    self.regenerate(field);
  }

  pub fn set_params(&mut self, field: &ScalarField, params: &FieldParams) {
    self.grid.update_z(field, params);
  }

  pub fn set_time(&mut self, field: &ScalarField, time: f64) {
    let params = self.grid.params().with_time(time);
    self.grid.update_z(field, &params);
  }
}
