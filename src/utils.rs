use std::f64::consts::PI;

/// Clamp without panicking on an inverted range; `max` wins then.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
  value.max(min).min(max)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
  a + (b - a) * t
}

/// Map `value` from `[in_min, in_max]` to `[out_min, out_max]` without
/// clamping. A degenerate input range yields NaN or ±∞.
pub fn map_range(
  value: f64,
  in_min: f64,
  in_max: f64,
  out_min: f64,
  out_max: f64,
) -> f64 {
  out_min + (out_max - out_min) * ((value - in_min) / (in_max - in_min))
}

/// Axis-label text: values within 0.01 of a multiple of π print as that
/// multiple (`π`, `-π`, `3π`, `0`), everything else with two decimals.
pub fn format_number(value: f64) -> String {
  let ratio = value / PI;
  let rounded = (ratio + 0.5).floor();
  if (ratio - rounded).abs() < 0.01 {
    return match rounded as i64 {
      0 => "0".to_string(),
      1 => "π".to_string(),
      -1 => "-π".to_string(),
      k => format!("{k}π"),
    };
  }
  format!("{value:.2}")
}
