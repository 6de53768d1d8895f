//! Owns the configuration, the active field and everything derived from
//! it. Every setter recomputes exactly what depends on the value it
//! changed, so nothing has to poll for changes.

use crate::FormulaError;
use crate::colormap::ColorMapType;
use crate::config::{ConfigError, SurfaceConfig};
use crate::differential::{
  DEFAULT_STEP, DerivativeBundle, GradientArrow, GradientMode,
  GradientOverlay, derivatives_at, effective_step,
};
use crate::field::{FieldParams, ScalarField};
use crate::formula::{self, presets};
use crate::surface::{Domain, Resolution, SurfaceGrid, SurfaceSampler};

#[derive(Debug)]
pub struct Visualizer {
  config: SurfaceConfig,
  field: ScalarField,
  sampler: SurfaceSampler,
  overlay: GradientOverlay,
  step: f64,
}

impl Visualizer {
  /// Start from the default configuration.
  pub fn new() -> Result<Self, FormulaError> {
    Self::with_config(SurfaceConfig::default())
  }

  pub fn with_config(mut config: SurfaceConfig) -> Result<Self, FormulaError> {
    config.domain = config.domain.normalized();
    let field = ScalarField::new(formula::compile(&config.formula.text)?);
    let sampler = SurfaceSampler::new(
      &field,
      config.domain,
      config.resolution,
      &config.animation.params(),
    );
    Ok(Visualizer {
      config,
      field,
      sampler,
      overlay: GradientOverlay::default(),
      step: DEFAULT_STEP,
    })
  }

  pub fn config(&self) -> &SurfaceConfig {
    &self.config
  }

  pub fn field(&self) -> &ScalarField {
    &self.field
  }

  pub fn grid(&self) -> &SurfaceGrid {
    self.sampler.grid()
  }

  pub fn overlay(&self) -> &GradientOverlay {
    &self.overlay
  }

  pub fn params(&self) -> FieldParams {
    self.config.animation.params()
  }

  /// Compile and activate a new formula.
  ///
  /// On failure the previous formula stays active and the surface is left
  /// untouched.
  pub fn set_formula(&mut self, text: &str) -> Result<(), FormulaError> {
    let expression = formula::compile(text)?;
    self.field = ScalarField::new(expression);
    self.config.formula.text = text.to_string();
    self.sampler.set_field(&self.field);
    Ok(())
  }

  pub fn set_preset(&mut self, key: &str) -> Result<(), FormulaError> {
    let preset = presets::preset(key)
      .ok_or_else(|| FormulaError::UnknownPreset(key.to_string()))?;
    self.set_formula(preset.formula)?;
    self.config.formula.preset = preset.key.to_string();
    Ok(())
  }

  pub fn set_domain(&mut self, domain: Domain) {
    self.config.domain = domain.normalized();
    self.sampler.set_domain(&self.field, self.config.domain);
  }

  pub fn set_resolution(&mut self, resolution: Resolution) {
    self.config.resolution = resolution;
    self.sampler.set_resolution(&self.field, resolution);
  }

  /// Change amplitude and angular frequency; only z is recomputed.
  pub fn set_animation(&mut self, amplitude: f64, omega: f64) {
    self.config.animation.amplitude = amplitude;
    self.config.animation.omega = omega;
    self.refresh_heights();
  }

  pub fn set_time(&mut self, time: f64) {
    self.config.animation.time = time;
    self.refresh_heights();
  }

  pub fn set_playing(&mut self, playing: bool) {
    self.config.animation.playing = playing;
  }

  pub fn set_time_warp(&mut self, time_warp: f64) {
    if time_warp.is_finite() {
      self.config.animation.time_warp = time_warp;
    }
  }

  pub fn set_color_map(&mut self, color_map: ColorMapType) {
    self.config.rendering.color_map = color_map;
  }

  pub fn set_gray_below_zero(&mut self, enabled: bool) {
    self.config.rendering.gray_below_zero = enabled;
  }

  /// Finite-difference step for derivative queries; invalid values reset
  /// it to [`DEFAULT_STEP`].
  pub fn set_step(&mut self, h: f64) {
    self.step = effective_step(h);
  }

  pub fn step(&self) -> f64 {
    self.step
  }

  pub fn set_overlay_visible(&mut self, visible: bool) {
    self.overlay.set_visible(visible);
  }

  pub fn set_overlay_mode(&mut self, mode: GradientMode) {
    self.overlay.set_mode(mode);
  }

  pub fn set_overlay_density(&mut self, density: f64) {
    self.overlay.set_density(density);
  }

  pub fn set_overlay_scale(&mut self, scale: f64) {
    self.overlay.set_scale(scale);
  }

  /// Frame tick. Moves time forward by `dt · time_warp` while playing and
  /// returns whether the surface changed.
  pub fn advance(&mut self, dt: f64) -> bool {
    if !self.config.animation.playing || !dt.is_finite() {
      return false;
    }
    self.config.animation.time += dt * self.config.animation.time_warp;
    self.refresh_heights();
    true
  }

  fn refresh_heights(&mut self) {
    let params = self.params();
    self.sampler.set_params(&self.field, &params);
  }

  /// Derivatives under the current parameters, for the legend panel.
  pub fn derivatives_at(&self, x: f64, y: f64) -> DerivativeBundle {
    derivatives_at(&self.field, x, y, &self.params(), self.step)
  }

  pub fn hover_arrow(&self, x: f64, y: f64) -> Option<GradientArrow> {
    self.overlay.hover_arrow(&self.derivatives_at(x, y))
  }

  pub fn vertex_buffer(&self) -> Vec<f32> {
    self.grid().vertex_buffer()
  }

  pub fn triangle_indices(&self) -> Vec<u32> {
    self.grid().triangle_indices()
  }

  pub fn colors(&self) -> Vec<f32> {
    let rendering = &self.config.rendering;
    rendering
      .color_map
      .apply(self.grid(), rendering.gray_below_zero)
  }

  pub fn arrows(&self) -> Vec<GradientArrow> {
    self.overlay.arrows(
      &self.field,
      &self.config.domain,
      self.config.resolution,
      &self.params(),
    )
  }

  pub fn export_parameters(&self) -> Result<String, ConfigError> {
    self.config.export()
  }

  /// Apply a parameter document. Nothing changes unless the whole
  /// document, including its formula, is valid.
  pub fn import_parameters(&mut self, json: &str) -> Result<(), ConfigError> {
    let imported = self.config.import(json)?;

    let formula_changed = imported.formula.text != self.config.formula.text;
    if formula_changed {
      self.field = ScalarField::new(formula::compile(&imported.formula.text)?);
    }
    let layout_changed = imported.domain != self.config.domain
      || imported.resolution != self.config.resolution;

    self.config = imported;
    if layout_changed || formula_changed {
      self.sampler = SurfaceSampler::new(
        &self.field,
        self.config.domain,
        self.config.resolution,
        &self.config.animation.params(),
      );
    } else {
      self.refresh_heights();
    }
    Ok(())
  }
}
