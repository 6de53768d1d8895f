//! Per-vertex surface coloring.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::surface::SurfaceGrid;
use crate::utils::{clamp, lerp, map_range};

/// Linear RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
  pub r: f32,
  pub g: f32,
  pub b: f32,
}

impl Color {
  pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

  pub const fn new(r: f32, g: f32, b: f32) -> Self {
    Color { r, g, b }
  }

  pub fn gray(intensity: f64) -> Self {
    let v = intensity as f32;
    Color::new(v, v, v)
  }

  /// HSL to RGB. Hue wraps around `[0, 1)`; saturation and lightness are
  /// clamped to `[0, 1]`.
  pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
    let h = h.rem_euclid(1.0);
    let s = clamp(s, 0.0, 1.0);
    let l = clamp(l, 0.0, 1.0);

    if s == 0.0 {
      return Color::gray(l);
    }

    let high = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let low = 2.0 * l - high;
    Color::new(
      hue_to_channel(low, high, h + 1.0 / 3.0) as f32,
      hue_to_channel(low, high, h) as f32,
      hue_to_channel(low, high, h - 1.0 / 3.0) as f32,
    )
  }

  pub fn lerp(self, other: Color, t: f64) -> Color {
    let channel = |a: f32, b: f32| lerp(a as f64, b as f64, t) as f32;
    Color::new(
      channel(self.r, other.r),
      channel(self.g, other.g),
      channel(self.b, other.b),
    )
  }

  pub fn to_array(self) -> [f32; 3] {
    [self.r, self.g, self.b]
  }
}

fn hue_to_channel(low: f64, high: f64, t: f64) -> f64 {
  let t = if t < 0.0 {
    t + 1.0
  } else if t > 1.0 {
    t - 1.0
  } else {
    t
  };
  if t < 1.0 / 6.0 {
    low + (high - low) * 6.0 * t
  } else if t < 0.5 {
    high
  } else if t < 2.0 / 3.0 {
    low + (high - low) * 6.0 * (2.0 / 3.0 - t)
  } else {
    low
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorMapType {
  Viridis,
  Inferno,
  CoolWarm,
  Grayscale,
  #[default]
  RgbSpatial,
  HsvHeight,
  Terrain,
  CoordinateGrid,
}

impl ColorMapType {
  pub const ALL: [ColorMapType; 8] = [
    ColorMapType::Viridis,
    ColorMapType::Inferno,
    ColorMapType::CoolWarm,
    ColorMapType::Grayscale,
    ColorMapType::RgbSpatial,
    ColorMapType::HsvHeight,
    ColorMapType::Terrain,
    ColorMapType::CoordinateGrid,
  ];

  pub fn name(self) -> &'static str {
    match self {
      ColorMapType::Viridis => "viridis",
      ColorMapType::Inferno => "inferno",
      ColorMapType::CoolWarm => "coolWarm",
      ColorMapType::Grayscale => "grayscale",
      ColorMapType::RgbSpatial => "rgbSpatial",
      ColorMapType::HsvHeight => "hsvHeight",
      ColorMapType::Terrain => "terrain",
      ColorMapType::CoordinateGrid => "coordinateGrid",
    }
  }

  /// Color for one vertex. `t`, `nx` and `ny` are the normalized height
  /// and position and get clamped to `[0, 1]`; the raw coordinates are
  /// only used by the coordinate-grid scheme.
  pub fn color_for(
    self,
    t: f64,
    nx: f64,
    ny: f64,
    raw_x: f64,
    raw_y: f64,
    raw_z: f64,
  ) -> Color {
    let t = clamp(t, 0.0, 1.0);
    let nx = clamp(nx, 0.0, 1.0);
    let ny = clamp(ny, 0.0, 1.0);

    match self {
      ColorMapType::Viridis => Color::new(
        clamp(0.267 + 0.004 * t + 0.329 * t * t, 0.0, 1.0) as f32,
        clamp(0.004 + 0.729 * t + 0.267 * t * t, 0.0, 1.0) as f32,
        clamp(0.329 + 0.267 * t + 0.004 * t * t, 0.0, 1.0) as f32,
      ),
      ColorMapType::Inferno => {
        Color::from_hsl(0.05 + 0.1 * t, 1.0, 0.2 + 0.6 * t)
      }
      ColorMapType::CoolWarm => {
        Color::new(0.23, 0.30, 0.75).lerp(Color::new(0.86, 0.20, 0.18), t)
      }
      ColorMapType::Grayscale => Color::gray(t),
      ColorMapType::RgbSpatial => Color::new(nx as f32, ny as f32, t as f32),
      ColorMapType::HsvHeight => {
        Color::from_hsl(((nx + ny) * 0.5) % 1.0, 0.8, 0.3 + 0.6 * t)
      }
      ColorMapType::Terrain => terrain(t),
      ColorMapType::CoordinateGrid => coordinate_grid(t, raw_x, raw_y, raw_z),
    }
  }

  /// One rgb triple per grid vertex, flattened.
  ///
  /// With `gray_below_zero` every vertex under z = 0 is drawn in a gray
  /// that darkens with depth instead of the scheme's color.
  pub fn apply(self, grid: &SurfaceGrid, gray_below_zero: bool) -> Vec<f32> {
    let bounds = grid.bounds();
    let normalize = |value: f64, min: f64, max: f64| {
      if max > min { map_range(value, min, max, 0.0, 1.0) } else { 0.5 }
    };

    let mut colors = Vec::with_capacity(grid.vertex_count() * 3);
    for [x, y, z] in grid.positions() {
      let color = if gray_below_zero && z < 0.0 {
        let depth = z / bounds.min_z.min(-0.1);
        Color::gray(clamp(0.5 + depth * 0.2, 0.3, 0.7))
      } else {
        self.color_for(
          normalize(z, bounds.min_z, bounds.max_z),
          normalize(x, bounds.min_x, bounds.max_x),
          normalize(y, bounds.min_y, bounds.max_y),
          x,
          y,
          z,
        )
      };
      colors.extend_from_slice(&color.to_array());
    }
    colors
  }
}

impl fmt::Display for ColorMapType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown color map `{0}`")]
pub struct UnknownColorMap(pub String);

impl FromStr for ColorMapType {
  type Err = UnknownColorMap;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ColorMapType::ALL
      .into_iter()
      .find(|map| map.name() == s)
      .ok_or_else(|| UnknownColorMap(s.to_string()))
  }
}

fn terrain(t: f64) -> Color {
  const DEEP: Color = Color::new(0.0, 0.1, 0.4);
  const SHALLOW: Color = Color::new(0.0, 0.6, 0.8);
  const LOWLAND: Color = Color::new(0.1, 0.7, 0.2);
  const HILLS: Color = Color::new(0.8, 0.8, 0.1);
  const PEAK: Color = Color::new(0.9, 0.2, 0.1);

  if t < 0.2 {
    DEEP.lerp(SHALLOW, t / 0.2)
  } else if t < 0.4 {
    SHALLOW.lerp(LOWLAND, (t - 0.2) / 0.2)
  } else if t < 0.7 {
    LOWLAND.lerp(HILLS, (t - 0.4) / 0.3)
  } else {
    HILLS.lerp(PEAK, (t - 0.7) / 0.3)
  }
}

fn coordinate_grid(t: f64, raw_x: f64, raw_y: f64, raw_z: f64) -> Color {
  const LINE_TOLERANCE: f64 = 0.3;
  const PI_TOLERANCE: f64 = 0.5;

  let base = Color::from_hsl(0.6, 0.3, 0.3 + 0.4 * t);
  if raw_x.abs() < LINE_TOLERANCE {
    base.lerp(Color::new(0.9, 0.2, 0.2), 0.7)
  } else if raw_y.abs() < LINE_TOLERANCE {
    base.lerp(Color::new(0.2, 0.9, 0.2), 0.7)
  } else if raw_z.abs() < LINE_TOLERANCE {
    base.lerp(Color::new(0.9, 0.9, 0.2), 0.8)
  } else if (raw_x % PI).abs() < PI_TOLERANCE
    || (raw_y % PI).abs() < PI_TOLERANCE
  {
    base.lerp(Color::WHITE, 0.2)
  } else {
    base
  }
}
