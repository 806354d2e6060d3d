use crate::chart::render::{write_chart, RenderError};
use crate::chart::{ChartConfig, OutputFormat};
use crate::data::{generate, GenerateError, GeneratorConfig};
use crate::fit::{fit, FitError};
use crate::pipeline::{run_pipeline, PipelineConfig, PipelineError};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/* =================== Public configuration types =================== */

#[derive(Debug, Clone)]
pub struct Config {
    pub style_path: PathBuf,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub enum Action {
    Plot(Plot),
    Generate(Generate),
    Fit(Fit),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sampling {
    pub std: f64,
    pub generator: GeneratorConfig,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Plot {
    pub sampling: Sampling,
    pub height: u32,
    pub format: OutputFormat,
    pub out: PathBuf,
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Generate {
    pub sampling: Sampling,
    pub out: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Fit {
    pub sampling: Sampling,
}

/* =================== Error type (no process::exit) =================== */

#[derive(thiserror::Error, Debug)]
pub enum CmdError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("fit failed: {0}")]
    Fit(#[from] FitError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl Sampling {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/* =================== Entry point =================== */

impl Config {
    pub fn run(&self) -> Result<(), CmdError> {
        match &self.action {
            Action::Plot(p) => self.run_plot(p),
            Action::Generate(g) => self.run_generate(g),
            Action::Fit(f) => self.run_fit(f),
        }
    }
}

/* =================== Actions =================== */

impl Config {
    fn run_plot(&self, p: &Plot) -> Result<(), CmdError> {
        let pipeline = PipelineConfig {
            generator: p.sampling.generator,
            chart: ChartConfig { height: p.height, ..ChartConfig::default() },
            style_path: self.style_path.clone(),
        };

        let out = run_pipeline(p.sampling.std, &pipeline, &mut p.sampling.rng())?;
        println!("{}", out.fit);

        write_chart(&out.chart, &p.out, p.format)?;
        println!("Chart written to {}", p.out.display());

        if let Some(csv_path) = &p.csv {
            out.dataset.write_csv(csv_path, Some(out.fit.predictions.as_slice()))?;
            println!("Data written to {}", csv_path.display());
        }
        Ok(())
    }

    fn run_generate(&self, g: &Generate) -> Result<(), CmdError> {
        let data = generate(g.sampling.std, &g.sampling.generator, &mut g.sampling.rng())?;
        data.write_csv(&g.out, None)?;
        println!("{} samples written to {}", data.len(), g.out.display());
        Ok(())
    }

    fn run_fit(&self, f: &Fit) -> Result<(), CmdError> {
        let data = generate(f.sampling.std, &f.sampling.generator, &mut f.sampling.rng())?;
        let res = fit(&data)?;

        println!("{}", res);
        match res.p_value {
            Some(p) => println!("slope p-value: {:.4e}", p),
            None => println!("slope p-value: undefined (perfect fit)"),
        }
        Ok(())
    }
}
