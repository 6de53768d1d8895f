use super::*;
use mathviz::colormap::{Color, ColorMapType};

fn line_grid(formula: &str) -> mathviz::surface::SurfaceGrid {
  sample_grid(
    &field(formula),
    &Domain::square(1.0),
    2,
    2,
    &FieldParams::default(),
  )
}

fn vertex(colors: &[f32], index: usize) -> [f32; 3] {
  [colors[index * 3], colors[index * 3 + 1], colors[index * 3 + 2]]
}

#[test]
fn one_triple_per_vertex() {
  let grid = line_grid("x");
  for map in ColorMapType::ALL {
    let colors = map.apply(&grid, true);
    assert_eq!(colors.len(), 27, "{map}");
    assert!(colors.iter().all(|c| (0.0..=1.0).contains(c)), "{map}");
  }
}

#[test]
fn negative_heights_turn_gray() {
  let grid = line_grid("x");
  let colors = ColorMapType::Viridis.apply(&grid, true);
  // z = -1 is the deepest point
  assert_eq!(vertex(&colors, 0), [0.7, 0.7, 0.7]);
  // z = 0 keeps the scheme's color
  let expected = ColorMapType::Viridis
    .color_for(0.5, 0.5, 0.0, 0.0, -1.0, 0.0)
    .to_array();
  assert_eq!(vertex(&colors, 1), expected);
}

#[test]
fn grayscale_follows_height() {
  let grid = line_grid("x");
  let colors = ColorMapType::Grayscale.apply(&grid, false);
  assert_eq!(vertex(&colors, 0), [0.0, 0.0, 0.0]);
  assert_eq!(vertex(&colors, 1), [0.5, 0.5, 0.5]);
  assert_eq!(vertex(&colors, 2), [1.0, 1.0, 1.0]);
}

#[test]
fn rgb_spatial_encodes_position_and_height() {
  let grid = line_grid("x");
  let colors = ColorMapType::RgbSpatial.apply(&grid, true);
  // (x, y, z) = (1, -1, 1)
  assert_eq!(vertex(&colors, 2), [1.0, 0.0, 1.0]);
  // (x, y, z) = (1, 1, 1)
  assert_eq!(vertex(&colors, 8), [1.0, 1.0, 1.0]);
}

#[test]
fn flat_surface_uses_mid_height() {
  let grid = line_grid("0");
  let colors = ColorMapType::Grayscale.apply(&grid, true);
  assert!(colors.iter().all(|&c| c == 0.5));
}

#[test]
fn magnitude_palette_runs_blue_to_red() {
  let blue = Color::from_hsl(0.7, 1.0, 0.5);
  assert!(blue.b > blue.r && blue.b > blue.g);
  let red = Color::from_hsl(0.0, 1.0, 0.5);
  assert_eq!(red.to_array(), [1.0, 0.0, 0.0]);
}

#[test]
fn names_are_camel_case() {
  assert_eq!(ColorMapType::default(), ColorMapType::RgbSpatial);
  assert_eq!(
    serde_json::to_string(&ColorMapType::CoolWarm).unwrap(),
    "\"coolWarm\""
  );
  assert_eq!(
    "coordinateGrid".parse::<ColorMapType>(),
    Ok(ColorMapType::CoordinateGrid)
  );
  let err = "plasma".parse::<ColorMapType>().unwrap_err();
  assert_eq!(err.to_string(), "unknown color map `plasma`");
}
