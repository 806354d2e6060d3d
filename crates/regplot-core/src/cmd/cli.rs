use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::chart::{OutputFormat, DEFAULT_HEIGHT};
use crate::cmd::config::{
    Action, Config, Fit as FitCfg, Generate as GenerateCfg, Plot as PlotCfg, Sampling,
};
use crate::data::{GeneratorConfig, DEFAULT_NOISE_MEAN, DEFAULT_SAMPLES};
use crate::pipeline::{DEFAULT_STD, DEFAULT_STYLE_PATH};

#[derive(Debug, Parser)]
#[command(
    name = "regplot",
    about = "Fit a line through synthetic noisy data and chart it",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Path to the JSON style overlay
    #[arg(long = "style", value_name = "PATH", default_value = DEFAULT_STYLE_PATH, global = true)]
    pub style_path: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate, fit and write the chart
    Plot(PlotArgs),

    /// Write a generated dataset as CSV
    Generate(GenerateArgs),

    /// Generate and fit, print the fit summary
    Fit(SampleArgs),
}

/* --------------------- sampling --------------------- */

#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Noise scale, the noise standard deviation is std / 10
    #[arg(short = 's', long, default_value_t = DEFAULT_STD, allow_negative_numbers = true)]
    pub std: f64,

    /// Number of samples
    #[arg(short = 'n', long = "samples", default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Mean of the multiplicative noise
    #[arg(long = "noise-mean", default_value_t = DEFAULT_NOISE_MEAN, allow_negative_numbers = true)]
    pub noise_mean: f64,

    /// Seed for reproducible data
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SampleArgs {
    fn into_sampling(self) -> Sampling {
        Sampling {
            std: self.std,
            generator: GeneratorConfig { n_samples: self.samples, noise_mean: self.noise_mean },
            seed: self.seed,
        }
    }
}

/* ----------------------- plot ----------------------- */

#[derive(Debug, Args)]
pub struct PlotArgs {
    #[command(flatten)]
    pub sampling: SampleArgs,

    /// Chart height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Output format (html, json, svg), guessed from --out when missing
    #[arg(short = 'f', long)]
    pub format: Option<OutputFormat>,

    /// Output file
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath, default_value = "regression.html")]
    pub out: PathBuf,

    /// Also write samples and predictions as CSV
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub csv: Option<PathBuf>,
}

/* --------------------- generate --------------------- */

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub sampling: SampleArgs,

    /// Output CSV file
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    pub out: PathBuf,
}

// -------- Map CLI -> Config/Action types --------

impl Cli {
    pub fn into_config(self) -> Config {
        let style_path = PathBuf::from(self.style_path);

        let action = match self.command {
            Commands::Plot(args) => {
                let format = args
                    .format
                    .or_else(|| OutputFormat::from_path(&args.out))
                    .unwrap_or_default();
                Action::Plot(PlotCfg {
                    sampling: args.sampling.into_sampling(),
                    height: args.height,
                    format,
                    out: args.out,
                    csv: args.csv,
                })
            },
            Commands::Generate(args) => Action::Generate(GenerateCfg {
                sampling: args.sampling.into_sampling(),
                out: args.out,
            }),
            Commands::Fit(args) => Action::Fit(FitCfg { sampling: args.into_sampling() }),
        };

        Config { style_path, action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        Cli::try_parse_from(args).expect("arguments should parse").into_config()
    }

    #[test]
    fn test_plot_defaults() {
        let cfg = config(&["regplot", "plot"]);

        assert_eq!(cfg.style_path, PathBuf::from(DEFAULT_STYLE_PATH));
        match cfg.action {
            Action::Plot(p) => {
                assert_eq!(p.sampling.std, DEFAULT_STD);
                assert_eq!(p.sampling.generator, GeneratorConfig::default());
                assert_eq!(p.sampling.seed, None);
                assert_eq!(p.height, DEFAULT_HEIGHT);
                assert_eq!(p.format, OutputFormat::Html);
                assert_eq!(p.out, PathBuf::from("regression.html"));
                assert!(p.csv.is_none());
            },
            other => panic!("expected plot action, got {other:?}"),
        }
    }

    #[test]
    fn test_plot_format_from_out() {
        let cfg = config(&["regplot", "plot", "-o", "chart.svg", "--std", "0.5", "--seed", "3"]);

        match cfg.action {
            Action::Plot(p) => {
                assert_eq!(p.format, OutputFormat::Svg);
                assert_eq!(p.sampling.std, 0.5);
                assert_eq!(p.sampling.seed, Some(3));
            },
            other => panic!("expected plot action, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_format_wins() {
        let cfg = config(&["regplot", "plot", "-o", "chart.svg", "-f", "json"]);

        match cfg.action {
            Action::Plot(p) => assert_eq!(p.format, OutputFormat::Json),
            other => panic!("expected plot action, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_and_global_style() {
        let cfg =
            config(&["regplot", "generate", "-n", "10", "-o", "data.csv", "--style", "s.json"]);

        assert_eq!(cfg.style_path, PathBuf::from("s.json"));
        match cfg.action {
            Action::Generate(g) => {
                assert_eq!(g.sampling.generator.n_samples, 10);
                assert_eq!(g.out, PathBuf::from("data.csv"));
            },
            other => panic!("expected generate action, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_std_reaches_validation() {
        let cfg = config(&["regplot", "fit", "--std", "-1"]);

        match cfg.action {
            Action::Fit(f) => assert_eq!(f.sampling.std, -1.0),
            other => panic!("expected fit action, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_requires_out() {
        assert!(Cli::try_parse_from(["regplot", "generate"]).is_err());
    }
}
