use anyhow::Context;
use clap::{Parser, Subcommand};
use mathviz::config::SurfaceConfig;
use mathviz::differential::{GradientMode, compute_derivatives, hover_arrow};
use mathviz::field::ScalarField;
use mathviz::formula::presets::{PRESETS, label_category, presets_with_label};
use mathviz::surface::{Domain, sample_grid};
use mathviz::utils::format_number;
use mathviz::{FieldParams, clear_captured_warnings, get_captured_warnings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

/// Values bound to `t`, `A` and `ω`
#[derive(clap::Args)]
struct ParamArgs {
  #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
  t: f64,
  #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
  amplitude: f64,
  #[arg(long, default_value_t = 0.5, allow_hyphen_values = true)]
  omega: f64,
}

impl ParamArgs {
  fn params(&self) -> FieldParams {
    FieldParams::new(self.t, self.amplitude, self.omega)
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Print a formula after shorthand rewriting
  Normalize { formula: String },
  /// Evaluate a formula at one point
  Eval {
    formula: String,
    #[arg(long, allow_hyphen_values = true)]
    x: f64,
    #[arg(long, allow_hyphen_values = true)]
    y: f64,
    #[command(flatten)]
    params: ParamArgs,
  },
  /// Print derivatives and curvature at one point as JSON
  Derive {
    formula: String,
    #[arg(long, allow_hyphen_values = true)]
    x: f64,
    #[arg(long, allow_hyphen_values = true)]
    y: f64,
    #[command(flatten)]
    params: ParamArgs,
    /// Finite-difference step
    #[arg(long, default_value_t = mathviz::DEFAULT_STEP)]
    step: f64,
    /// Also describe the hover arrow drawn in this overlay mode
    #[arg(long)]
    mode: Option<GradientMode>,
  },
  /// Sample a formula on a grid and print its size and bounds
  Sample {
    formula: String,
    #[arg(long, default_value_t = 120)]
    segments_x: usize,
    #[arg(long, default_value_t = 120)]
    segments_y: usize,
    #[arg(long, allow_hyphen_values = true)]
    x_min: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    x_max: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    y_min: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    y_max: Option<f64>,
    #[command(flatten)]
    params: ParamArgs,
  },
  /// List the built-in formula presets
  Presets {
    /// Only show presets carrying this label
    #[arg(long)]
    label: Option<String>,
  },
  /// Print a parameter document, optionally merged from a file
  Config {
    #[arg(long)]
    file: Option<PathBuf>,
  },
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  clear_captured_warnings();

  let result = run(cli.command);

  for warning in get_captured_warnings() {
    eprintln!("Warning: {warning}");
  }
  result
}

fn run(command: Commands) -> anyhow::Result<()> {
  match command {
    Commands::Normalize { formula } => {
      println!("{}", mathviz::normalize(&formula));
      if let Ok(expression) = mathviz::compile(&formula) {
        let names: Vec<String> = expression
          .variables_used()
          .iter()
          .map(ToString::to_string)
          .collect();
        println!("variables: {}", names.join(", "));
      }
    }
    Commands::Eval {
      formula,
      x,
      y,
      params,
    } => {
      let field = compile_field(&formula)?;
      println!("{}", field.evaluate_at(x, y, &params.params()));
    }
    Commands::Derive {
      formula,
      x,
      y,
      params,
      step,
      mode,
    } => {
      let field = compile_field(&formula)?;
      let p = params.params();
      let bundle =
        compute_derivatives(&field, x, y, p.time, p.amplitude, p.omega, step);
      println!("{}", serde_json::to_string_pretty(&bundle)?);
      if let Some(mode) = mode {
        match hover_arrow(&bundle, 1.0, mode) {
          Some(arrow) => println!(
            "{mode} arrow: length {:.4}, direction ({:.4}, {:.4}, {:.4})",
            arrow.length,
            arrow.direction[0],
            arrow.direction[1],
            arrow.direction[2]
          ),
          None => println!("{mode} mode draws no hover arrow"),
        }
      }
    }
    Commands::Sample {
      formula,
      segments_x,
      segments_y,
      x_min,
      x_max,
      y_min,
      y_max,
      params,
    } => {
      let field = compile_field(&formula)?;
      let default = Domain::default();
      let domain = Domain::new(
        x_min.unwrap_or(default.x_min),
        x_max.unwrap_or(default.x_max),
        y_min.unwrap_or(default.y_min),
        y_max.unwrap_or(default.y_max),
      );
      let grid =
        sample_grid(&field, &domain, segments_x, segments_y, &params.params());
      let bounds = grid.bounds();
      println!(
        "{} vertices ({}x{} segments)",
        grid.vertex_count(),
        grid.segments_x(),
        grid.segments_y()
      );
      println!(
        "x: [{}, {}]  y: [{}, {}]  z: [{:.4}, {:.4}]",
        format_number(bounds.min_x),
        format_number(bounds.max_x),
        format_number(bounds.min_y),
        format_number(bounds.max_y),
        bounds.min_z,
        bounds.max_z
      );
      if field.warning_count() > 0 {
        println!("{} point(s) fell back to 0", field.warning_count());
      }
    }
    Commands::Presets { label } => {
      let presets = match &label {
        Some(label) => presets_with_label(label),
        None => PRESETS.iter().collect(),
      };
      for preset in presets {
        let labels: Vec<&str> = preset
          .labels
          .iter()
          .map(|key| label_category(key).map_or(*key, |c| c.name))
          .collect();
        println!("{:<28} {}  [{}]", preset.key, preset.name, labels.join(", "));
      }
    }
    Commands::Config { file } => {
      let config = SurfaceConfig::default();
      let config = match file {
        Some(path) => {
          let json = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
          config
            .import(&json)
            .with_context(|| format!("importing {}", path.display()))?
        }
        None => config,
      };
      println!("{}", config.export()?);
    }
  }
  Ok(())
}

fn compile_field(formula: &str) -> anyhow::Result<ScalarField> {
  let expression = mathviz::compile(formula)
    .with_context(|| format!("compiling `{formula}`"))?;
  Ok(ScalarField::new(expression))
}
