//! Built-in formula catalog with category labels.

/// Display metadata for a preset label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelCategory {
  pub key: &'static str,
  pub name: &'static str,
  pub color: &'static str,
}

const fn label(
  key: &'static str,
  name: &'static str,
  color: &'static str,
) -> LabelCategory {
  LabelCategory { key, name, color }
}

pub const LABEL_CATEGORIES: &[LabelCategory] = &[
  label("trigonometric", "Trigonometric", "#ff6b6b"),
  label("harmonic", "Harmonic", "#4ecdc4"),
  label("symmetric", "Symmetric", "#45b7d1"),
  label("radial", "Radial", "#f9ca24"),
  label("polynomial", "Polynomial", "#f0932b"),
  label("exponential", "Exponential", "#eb4d4b"),
  label("logarithmic", "Logarithmic", "#6c5ce7"),
  label("hyperbolic", "Hyperbolic", "#a55eea"),
  label("periodic", "Periodic", "#26de81"),
  label("fractal", "Fractal", "#fd79a8"),
  label("geometric", "Geometric", "#fdcb6e"),
  label("wave", "Wave", "#74b9ff"),
  label("spiral", "Spiral", "#e17055"),
  label("oscillating", "Oscillating", "#81ecec"),
  label("special", "Special Functions", "#fab1a0"),
];

/// Look up a label's display metadata. Some presets carry labels without
/// a category entry (`nonlinear`, `quantum`, ...); those return `None`.
pub fn label_category(key: &str) -> Option<&'static LabelCategory> {
  LABEL_CATEGORIES.iter().find(|c| c.key == key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
  /// Short notation shown in pickers, also the lookup key
  pub key: &'static str,
  pub formula: &'static str,
  pub name: &'static str,
  pub description: &'static str,
  pub labels: &'static [&'static str],
}

/// Preset selected when nothing else is configured.
pub const DEFAULT_PRESET: &str = "sin(x) * cos(y)";

pub const PRESETS: &[Preset] = &[
  Preset {
    key: "sin(x) * cos(y)",
    formula: "A * sin(x + ω*t) * cos(y - ω*t)",
    name: "Sine-Cosine Wave",
    description: "Classic wave interference pattern",
    labels: &["trigonometric", "harmonic", "wave", "symmetric"],
  },
  Preset {
    key: "sin(x) + cos(y)",
    formula: "A * (sin(x + ω*t) + cos(y + ω*t))",
    name: "Additive Waves",
    description: "Sum of perpendicular waves",
    labels: &["trigonometric", "harmonic", "wave"],
  },
  Preset {
    key: "sin(x) * sin(y)",
    formula: "A * sin(x + ω*t) * sin(y + ω*t)",
    name: "Sine Product",
    description: "Product of sine waves",
    labels: &["trigonometric", "harmonic", "symmetric"],
  },
  Preset {
    key: "cos(x) * cos(y)",
    formula: "A * cos(x + ω*t) * cos(y + ω*t)",
    name: "Cosine Product",
    description: "Product of cosine waves",
    labels: &["trigonometric", "harmonic", "symmetric"],
  },
  Preset {
    key: "sin(x + y)",
    formula: "A * sin(x + y + ω*t)",
    name: "Diagonal Sine Wave",
    description: "Sine wave along diagonal",
    labels: &["trigonometric", "harmonic", "wave"],
  },
  Preset {
    key: "cos(x - y)",
    formula: "A * cos(x - y + ω*t)",
    name: "Diagonal Cosine Wave",
    description: "Cosine wave along diagonal",
    labels: &["trigonometric", "harmonic", "wave"],
  },
  Preset {
    key: "sin(2*x) * cos(3*y)",
    formula: "A * sin(2*x + ω*t) * cos(3*y + ω*t)",
    name: "Harmonic Grid",
    description: "Different frequency harmonics",
    labels: &["trigonometric", "harmonic", "periodic"],
  },
  Preset {
    key: "sin(x)*sin(y)*sin(x*y)",
    formula: "A * sin(x + ω*t) * sin(y + ω*t) * sin(x*y)",
    name: "Triple Sine Product",
    description: "Complex trigonometric interaction",
    labels: &["trigonometric", "harmonic"],
  },
  Preset {
    key: "sin(sqrt(x² + y²))",
    formula: "A * sin(sqrt(x*x + y*y) + ω*t)",
    name: "Radial Waves",
    description: "Concentric circular waves",
    labels: &["trigonometric", "radial", "wave", "symmetric"],
  },
  Preset {
    key: "cos(sqrt(x² + y²))",
    formula: "A * cos(sqrt(x*x + y*y) + ω*t)",
    name: "Radial Cosine",
    description: "Concentric cosine ripples",
    labels: &["trigonometric", "radial", "wave", "symmetric"],
  },
  Preset {
    key: "sin(x² + y²)",
    formula: "A * sin(x*x + y*y + ω*t)",
    name: "Quadratic Ripples",
    description: "Circular waves with quadratic frequency",
    labels: &["trigonometric", "radial", "polynomial"],
  },
  Preset {
    key: "r * sin(r)",
    formula: "A * sqrt(x*x + y*y) * sin(sqrt(x*x + y*y) + ω*t)",
    name: "Radial Amplitude",
    description: "Amplitude grows with radius",
    labels: &["trigonometric", "radial", "wave"],
  },
  Preset {
    key: "sin(3*sqrt(x² + y²))",
    formula: "A * sin(3*sqrt(x*x + y*y) + ω*t)",
    name: "High Frequency Radial",
    description: "Dense concentric rings",
    labels: &["trigonometric", "radial", "wave", "periodic"],
  },
  Preset {
    key: "exp(-r²) * cos(r)",
    formula: "A * exp(-(x*x + y*y)/4) * cos(sqrt(x*x + y*y) + ω*t)",
    name: "Gaussian Ripples",
    description: "Damped circular waves",
    labels: &["exponential", "radial", "wave", "symmetric"],
  },
  Preset {
    key: "exp(-x²) * sin(y)",
    formula: "A * exp(-x*x/4) * sin(y + ω*t)",
    name: "Gaussian Curtain",
    description: "Gaussian envelope with sine waves",
    labels: &["exponential", "trigonometric", "wave"],
  },
  Preset {
    key: "exp(-(x²+y²)/8) * sin(5*r)",
    formula: "A * exp(-(x*x + y*y)/8) * sin(5*sqrt(x*x + y*y) + ω*t)",
    name: "Localized Ripples",
    description: "Concentrated high-frequency ripples",
    labels: &["exponential", "trigonometric", "radial"],
  },
  Preset {
    key: "exp(x) * cos(y)",
    formula: "A * exp(x/5) * cos(y + ω*t)",
    name: "Exponential Cosine",
    description: "Growing exponential with cosine modulation",
    labels: &["exponential", "trigonometric"],
  },
  Preset {
    key: "exp(-abs(x)-abs(y))",
    formula: "A * exp(-abs(x) - abs(y))",
    name: "Diamond Exponential",
    description: "Diamond-shaped exponential decay",
    labels: &["exponential", "symmetric", "geometric"],
  },
  Preset {
    key: "x² - y²",
    formula: "A * (x*x - y*y) / 10",
    name: "Hyperbolic Paraboloid",
    description: "Saddle-shaped surface",
    labels: &["polynomial", "symmetric", "geometric"],
  },
  Preset {
    key: "x² + y²",
    formula: "A * (x*x + y*y) / 10",
    name: "Paraboloid",
    description: "Bowl-shaped surface",
    labels: &["polynomial", "symmetric", "radial"],
  },
  Preset {
    key: "x³ - 3*x*y²",
    formula: "A * (x*x*x - 3*x*y*y) / 50",
    name: "Cubic Surface",
    description: "Cubic polynomial surface",
    labels: &["polynomial", "symmetric"],
  },
  Preset {
    key: "x*y",
    formula: "A * x * y / 5",
    name: "Hyperbolic Paraboloid (xy)",
    description: "Product surface",
    labels: &["polynomial", "symmetric", "geometric"],
  },
  Preset {
    key: "x⁴ + y⁴ - 6*x²*y²",
    formula: "A * (x*x*x*x + y*y*y*y - 6*x*x*y*y) / 100",
    name: "Quartic Surface",
    description: "Fourth-degree polynomial",
    labels: &["polynomial", "symmetric"],
  },
  Preset {
    key: "sin(xy)",
    formula: "A * sin(x*y + ω*t)",
    name: "Product Waves",
    description: "Waves based on coordinate product",
    labels: &["trigonometric", "wave"],
  },
  Preset {
    key: "cos(x*y)",
    formula: "A * cos(x*y + ω*t)",
    name: "Product Cosine",
    description: "Cosine of coordinate product",
    labels: &["trigonometric", "wave"],
  },
  Preset {
    key: "sin(x/y)",
    formula: "A * sin(x/(abs(y) + 0.1) + ω*t)",
    name: "Ratio Waves",
    description: "Sine of coordinate ratio",
    labels: &["trigonometric", "wave"],
  },
  Preset {
    key: "xy * sin(x+y)",
    formula: "A * x * y * sin(x + y + ω*t) / 10",
    name: "Modulated Product",
    description: "Product modulated by sine",
    labels: &["trigonometric", "polynomial"],
  },
  Preset {
    key: "Tornado",
    formula: "A * sin(sqrt(x*x + y*y)) * cos(atan(y/x) * 3 + ω*t)",
    name: "Tornado Pattern",
    description: "Spiral wave pattern",
    labels: &["spiral", "trigonometric", "radial"],
  },
  Preset {
    key: "Angular Spiral",
    formula: "A * sin(atan(y/x) * 5 + sqrt(x*x + y*y) + ω*t)",
    name: "Angular Spiral",
    description: "Combined angular and radial waves",
    labels: &["spiral", "trigonometric", "radial"],
  },
  Preset {
    key: "Rose Pattern",
    formula: "A * cos(3 * atan(y/x)) * sin(sqrt(x*x + y*y) + ω*t)",
    name: "Rose Pattern",
    description: "Three-petaled rose with ripples",
    labels: &["spiral", "trigonometric", "radial", "geometric"],
  },
  Preset {
    key: "Fibonacci Spiral",
    formula: "A * sin(1.618 * atan(y/x) + sqrt(x*x + y*y) + ω*t)",
    name: "Fibonacci Spiral",
    description: "Golden ratio spiral pattern",
    labels: &["spiral", "trigonometric", "special"],
  },
  Preset {
    key: "log(r) * sin(θ)",
    formula: "A * log(sqrt(x*x + y*y) + 1) * sin(atan(y/x) + ω*t)",
    name: "Logarithmic Spiral",
    description: "Logarithmic amplitude with angular variation",
    labels: &["logarithmic", "spiral", "trigonometric"],
  },
  Preset {
    key: "log(x²+y²+1)",
    formula: "A * log(x*x + y*y + 1)",
    name: "Logarithmic Cone",
    description: "Logarithmic radial surface",
    labels: &["logarithmic", "radial", "symmetric"],
  },
  Preset {
    key: "sinh(x) * cosh(y)",
    formula: "A * sinh(x/3) * cosh(y/3)",
    name: "Hyperbolic Product",
    description: "Product of hyperbolic functions",
    labels: &["hyperbolic", "symmetric"],
  },
  Preset {
    key: "tanh(x) + tanh(y)",
    formula: "A * (tanh(x) + tanh(y))",
    name: "Hyperbolic Sum",
    description: "Sum of hyperbolic tangents",
    labels: &["hyperbolic"],
  },
  Preset {
    key: "Bessel Function",
    formula: "A * sin(sqrt(x*x + y*y)) / (sqrt(x*x + y*y) + 0.1)",
    name: "Bessel-like Function",
    description: "Approximation of Bessel function",
    labels: &["special", "radial", "trigonometric"],
  },
  Preset {
    key: "Sinc Function",
    formula: "A * sin(sqrt(x*x + y*y)) / (sqrt(x*x + y*y) + 0.001)",
    name: "Sinc Function",
    description: "Cardinal sine function",
    labels: &["special", "radial", "trigonometric"],
  },
  Preset {
    key: "Mexican Hat",
    formula: "A * (2 - (x*x + y*y)) * exp(-(x*x + y*y)/2)",
    name: "Mexican Hat Wavelet",
    description: "Ricker wavelet (Mexican hat)",
    labels: &["special", "exponential", "radial", "symmetric"],
  },
  Preset {
    key: "Gabor Function",
    formula: "A * exp(-(x*x + y*y)/4) * sin(3*x + ω*t)",
    name: "Gabor Function",
    description: "Gaussian modulated sine wave",
    labels: &["special", "exponential", "trigonometric", "wave"],
  },
  Preset {
    key: "Beating Waves",
    formula: "A * sin(x + ω*t) * sin(x/3 + ω*t/3)",
    name: "Beating Waves",
    description: "Interference pattern creating beats",
    labels: &["oscillating", "trigonometric", "wave"],
  },
  Preset {
    key: "Amplitude Modulation",
    formula: "A * (1 + 0.5*sin(x/2)) * sin(2*x + ω*t)",
    name: "Amplitude Modulation",
    description: "AM wave pattern",
    labels: &["oscillating", "trigonometric", "wave"],
  },
  Preset {
    key: "Frequency Modulation",
    formula: "A * sin(x + sin(x/3) + ω*t)",
    name: "Frequency Modulation",
    description: "FM wave pattern",
    labels: &["oscillating", "trigonometric", "wave"],
  },
  Preset {
    key: "Fractal Waves",
    formula: "A * (sin(x) + sin(2*x)/2 + sin(4*x)/4) * (cos(y) + cos(2*y)/2)",
    name: "Fractal Waves",
    description: "Self-similar wave structure",
    labels: &["fractal", "trigonometric", "harmonic"],
  },
  Preset {
    key: "Chaotic Attractor",
    formula: "A * sin(x*y) * cos(x+y) + 0.5*sin(2*x*y)",
    name: "Chaotic Attractor",
    description: "Complex chaotic pattern",
    labels: &["fractal", "trigonometric"],
  },
  Preset {
    key: "Checkerboard",
    formula: "A * sin(π*x) * sin(π*y)",
    name: "Checkerboard",
    description: "Alternating pattern",
    labels: &["geometric", "trigonometric", "periodic", "symmetric"],
  },
  Preset {
    key: "Diamond Lattice",
    formula: "A * cos(x + y) * cos(x - y)",
    name: "Diamond Lattice",
    description: "Diamond grid pattern",
    labels: &["geometric", "trigonometric", "periodic", "symmetric"],
  },
  Preset {
    key: "Hexagonal Pattern",
    formula: "A * (cos(x) + cos(x/2 - y*sqrt(3)/2) + cos(x/2 + y*sqrt(3)/2))",
    name: "Hexagonal Pattern",
    description: "Hexagonal lattice structure",
    labels: &["geometric", "trigonometric", "periodic", "symmetric"],
  },
  Preset {
    key: "Standing Wave",
    formula: "A * sin(x + ω*t) * sin(y) + 0.5*sin(2*x - ω*t) * cos(y)",
    name: "Standing Wave",
    description: "Complex standing wave pattern",
    labels: &["wave", "trigonometric", "harmonic"],
  },
  Preset {
    key: "Interference",
    formula: concat!(
      "A * sin(sqrt((x-2)*(x-2) + y*y) + ω*t)",
      " + sin(sqrt((x+2)*(x+2) + y*y) + ω*t)",
    ),
    name: "Two-Source Interference",
    description: "Interference from two point sources",
    labels: &["wave", "trigonometric", "radial"],
  },
  Preset {
    key: "Doppler Effect",
    formula: "A * sin(sqrt(x*x + y*y) - x*ω*t/5 + ω*t)",
    name: "Doppler Effect",
    description: "Moving source wave pattern",
    labels: &["wave", "trigonometric", "radial", "oscillating"],
  },
  Preset {
    key: "Airy Function Approximation",
    formula: "A * sin((x*x*x + y*y*y)/10 + ω*t) / (sqrt(x*x + y*y) + 0.1)",
    name: "Airy Function Approximation",
    description: "Approximation of Airy function with radial damping",
    labels: &["special", "radial", "trigonometric"],
  },
  Preset {
    key: "Gamma Function Surface",
    formula: "A * log(1 + exp(-sqrt(x*x + y*y))) * sin(ω*t)",
    name: "Gamma-Inspired Surface",
    description: "Logarithmic surface inspired by gamma function behavior",
    labels: &["special", "logarithmic", "radial"],
  },
  Preset {
    key: "Hermite Polynomial Wave",
    formula: "A * (4*x*x - 2) * exp(-(x*x + y*y)/4) * cos(ω*t)",
    name: "Hermite Polynomial Wave",
    description: "Hermite polynomial modulated by Gaussian",
    labels: &["special", "exponential", "polynomial"],
  },
  Preset {
    key: "Legendre Polynomial Surface",
    formula: "A * (3*x*x - 1) * (3*y*y - 1) / 10",
    name: "Legendre Polynomial Surface",
    description: "Surface based on second-order Legendre polynomials",
    labels: &["special", "polynomial", "symmetric"],
  },
  Preset {
    key: "Lorenz Attractor Projection",
    formula: "A * (sin(10*x - y*y) + cos(28*y - x*x)) / 10",
    name: "Lorenz Attractor Projection",
    description: "2D projection inspired by Lorenz system dynamics",
    labels: &["nonlinear", "chaotic", "trigonometric"],
  },
  Preset {
    key: "Duffing Oscillator Pattern",
    formula: "A * sin(x + ω*t) - 0.3*sin(3*x + ω*t) + 0.1*y*y*sin(ω*t)",
    name: "Duffing Oscillator Pattern",
    description: "Pattern inspired by Duffing oscillator nonlinear dynamics",
    labels: &["nonlinear", "oscillating", "trigonometric"],
  },
  Preset {
    key: "Van der Pol Oscillator",
    formula: "A * sin(x + ω*t) + 0.2*(1 - x*x)*sin(y + ω*t)",
    name: "Van der Pol Oscillator",
    description: "Pattern inspired by Van der Pol oscillator",
    labels: &["nonlinear", "oscillating", "trigonometric"],
  },
  Preset {
    key: "Mandelbrot-Inspired Pattern",
    formula: "A * sin((x*x - y*y + x)*cos(2*x*y + y + ω*t))",
    name: "Mandelbrot-Inspired Pattern",
    description: "Pattern inspired by Mandelbrot set iterations",
    labels: &["fractal", "trigonometric", "complex"],
  },
  Preset {
    key: "Julia Set Waves",
    formula: "A * sin(x*x - y*y + 0.5*cos(2*x*y + ω*t))",
    name: "Julia Set Waves",
    description: "Wave pattern inspired by Julia set dynamics",
    labels: &["fractal", "trigonometric", "complex"],
  },
  Preset {
    key: "Voronoi-Like Pattern",
    formula: concat!(
      "A * sin(min(sqrt((x-1)*(x-1) + (y-1)*(y-1)),",
      " sqrt((x+1)*(x+1) + (y+1)*(y+1))) + ω*t)",
    ),
    name: "Voronoi-Like Pattern",
    description: "Pattern resembling Voronoi cell boundaries",
    labels: &["geometric", "trigonometric", "periodic"],
  },
  Preset {
    key: "Penrose Tiling Approximation",
    formula: "A * (cos(x + 2*π/5) + cos(y + 4*π/5) + cos(x - y + 6*π/5))",
    name: "Penrose Tiling Approximation",
    description: "Approximation of Penrose tiling using trigonometric sums",
    labels: &["geometric", "trigonometric", "periodic", "symmetric"],
  },
  Preset {
    key: "Hyperbolic Vortex",
    formula: "A * sinh(sqrt(x*x + y*y)/3) * cos(atan(y/x) + ω*t)",
    name: "Hyperbolic Vortex",
    description: "Hyperbolic function with angular modulation",
    labels: &["hyperbolic", "spiral", "radial"],
  },
  Preset {
    key: "Catenoid Surface",
    formula: "A * cosh(sqrt(x*x + y*y)/3) / 5",
    name: "Catenoid Surface",
    description: "Minimal surface resembling a catenoid",
    labels: &["hyperbolic", "radial", "geometric"],
  },
  Preset {
    key: "Schrödinger Wave",
    formula: "A * exp(-(x*x + y*y)/4) * sin(5*sqrt(x*x + y*y) + ω*t)",
    name: "Schrödinger Wave",
    description: "Wave function inspired by quantum mechanics",
    labels: &["wave", "exponential", "radial", "quantum"],
  },
  Preset {
    key: "Klein-Gordon Pattern",
    formula: "A * sin(sqrt(x*x + y*y + 1) + ω*t) / (sqrt(x*x + y*y) + 0.1)",
    name: "Klein-Gordon Pattern",
    description: "Pattern inspired by Klein-Gordon wave equation",
    labels: &["wave", "special", "radial"],
  },
];

pub fn preset(key: &str) -> Option<&'static Preset> {
  PRESETS.iter().find(|p| p.key == key)
}

pub fn preset_names() -> impl Iterator<Item = &'static str> {
  PRESETS.iter().map(|p| p.key)
}

pub fn presets_with_label(label: &str) -> Vec<&'static Preset> {
  PRESETS
    .iter()
    .filter(|p| p.labels.contains(&label))
    .collect()
}
