use super::*;
use mathviz::field::evaluate;
use mathviz::formula::compile_preset;
use mathviz::formula::presets::{
  DEFAULT_PRESET, LABEL_CATEGORIES, PRESETS, label_category, preset,
  preset_names, presets_with_label,
};

#[test]
fn every_preset_compiles() {
  for preset in PRESETS {
    let expression = compile(preset.formula)
      .unwrap_or_else(|err| panic!("{}: {err}", preset.key));
    assert!(expression.variables_used().contains(&Variable::Amplitude));
    let z = evaluate(&expression, 0.3, -0.7, 1.0, 1.0, 0.5);
    assert!(z.is_finite(), "{}", preset.key);
  }
}

#[test]
fn default_preset_exists() {
  let default = preset(DEFAULT_PRESET).unwrap();
  assert_eq!(default.formula, "A * sin(x + ω*t) * cos(y - ω*t)");
  assert!(compile_preset(DEFAULT_PRESET).is_ok());
}

#[test]
fn unknown_preset() {
  assert!(preset("not a preset").is_none());
  assert!(matches!(
    compile_preset("not a preset"),
    Err(FormulaError::UnknownPreset(_))
  ));
}

#[test]
fn names_follow_catalog_order() {
  let names: Vec<&str> = preset_names().collect();
  assert_eq!(names.len(), PRESETS.len());
  assert_eq!(names[0], DEFAULT_PRESET);
}

#[test]
fn label_filter() {
  let waves = presets_with_label("wave");
  assert!(!waves.is_empty());
  assert!(waves.iter().all(|p| p.labels.contains(&"wave")));
  assert!(presets_with_label("no-such-label").is_empty());
}

#[test]
fn label_categories() {
  assert_eq!(LABEL_CATEGORIES.len(), 15);
  assert_eq!(label_category("radial").map(|c| c.name), Some("Radial"));
  assert!(label_category("unlisted").is_none());
}
