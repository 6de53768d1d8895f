//! Surface configuration and the JSON parameter document it is exported
//! as.
//!
//! The core never touches the filesystem: documents go in and out as
//! strings.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::FormulaError;
use crate::colormap::{ColorMapType, UnknownColorMap};
use crate::field::FieldParams;
use crate::formula::presets::DEFAULT_PRESET;
use crate::surface::{Domain, Resolution};

pub const DOCUMENT_VERSION: &str = "1.0.0";
pub const APPLICATION_NAME: &str = "MathViz";
pub const DEFAULT_FORMULA: &str = "A * sin(x + ω*t) * cos(y - ω*t)";

/// Sections an imported document has to carry.
const REQUIRED_SECTIONS: [&str; 4] =
  ["domain", "resolution", "animation", "rendering"];

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Invalid parameter document: {0}")]
  Json(#[from] serde_json::Error),
  #[error("Parameter document has no `{0}` section")]
  MissingSection(&'static str),
  #[error("Unsupported color map: {0}")]
  ColorMap(#[from] UnknownColorMap),
  #[error(transparent)]
  Formula(#[from] FormulaError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
  pub time: f64,
  pub amplitude: f64,
  pub omega: f64,
  pub playing: bool,
  pub time_warp: f64,
}

impl Default for AnimationConfig {
  fn default() -> Self {
    let params = FieldParams::default();
    AnimationConfig {
      time: params.time,
      amplitude: params.amplitude,
      omega: params.omega,
      playing: false,
      time_warp: 1.0,
    }
  }
}

impl AnimationConfig {
  pub fn params(&self) -> FieldParams {
    FieldParams::new(self.time, self.amplitude, self.omega)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderingConfig {
  pub color_map: ColorMapType,
  pub wireframe: bool,
  pub wireframe_opacity: f64,
  pub show_surface: bool,
  pub surface_opacity: f64,
  pub gray_below_zero: bool,
}

impl Default for RenderingConfig {
  fn default() -> Self {
    RenderingConfig {
      color_map: ColorMapType::RgbSpatial,
      wireframe: true,
      wireframe_opacity: 0.8,
      show_surface: true,
      surface_opacity: 0.6,
      gray_below_zero: true,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormulaConfig {
  pub text: String,
  pub preset: String,
}

impl Default for FormulaConfig {
  fn default() -> Self {
    FormulaConfig {
      text: DEFAULT_FORMULA.to_string(),
      preset: DEFAULT_PRESET.to_string(),
    }
  }
}

/// Everything the orchestration layer owns and hands out snapshots of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceConfig {
  pub domain: Domain,
  pub resolution: Resolution,
  pub animation: AnimationConfig,
  pub rendering: RenderingConfig,
  pub formula: FormulaConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDocument {
  pub timestamp: String,
  pub version: String,
  pub application: String,
  pub parameters: SurfaceConfig,
}

impl ParameterDocument {
  /// Wrap `config`, stamped with the current UTC time.
  pub fn new(config: SurfaceConfig) -> Self {
    ParameterDocument {
      timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
      version: DOCUMENT_VERSION.to_string(),
      application: APPLICATION_NAME.to_string(),
      parameters: config,
    }
  }

  pub fn to_json(&self) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}

impl SurfaceConfig {
  pub fn export(&self) -> Result<String, ConfigError> {
    ParameterDocument::new(self.clone()).to_json()
  }

  /// Parse a parameter document and lay it over `self`.
  ///
  /// Fields that are missing or `null` in the document keep their
  /// current value. Sections beyond the known ones are ignored.
  pub fn import(&self, json: &str) -> Result<SurfaceConfig, ConfigError> {
    let document: Value = serde_json::from_str(json)?;
    let parameters = document
      .get("parameters")
      .and_then(Value::as_object)
      .ok_or(ConfigError::MissingSection("parameters"))?;

    for section in REQUIRED_SECTIONS {
      if !parameters.get(section).is_some_and(Value::is_object) {
        return Err(ConfigError::MissingSection(section));
      }
    }

    if let Some(name) = parameters
      .get("rendering")
      .and_then(|rendering| rendering.get("colorMap"))
      .and_then(Value::as_str)
    {
      name.parse::<ColorMapType>()?;
    }

    let mut merged = serde_json::to_value(self)?;
    if let Value::Object(current) = &mut merged {
      for (section, incoming) in parameters {
        let Some(incoming) = incoming.as_object() else {
          continue;
        };
        if let Some(Value::Object(existing)) = current.get_mut(section) {
          overlay(existing, incoming);
        }
      }
    }

    let mut config: SurfaceConfig = serde_json::from_value(merged)?;
    config.domain = config.domain.normalized();
    Ok(config)
  }
}

fn overlay(existing: &mut Map<String, Value>, incoming: &Map<String, Value>) {
  for (key, value) in incoming {
    if !value.is_null() && existing.contains_key(key) {
      existing.insert(key.clone(), value.clone());
    }
  }
}
