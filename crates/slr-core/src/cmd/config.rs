use crate::data::{seeded_rng, Dataset, SyntheticLine};
use crate::fit::{
    normal_equation, FitError, FitKind, FitModel, GradientDescentConfig, LinearFitEngine,
};
use crate::report::{write_cost_history, FitReport};
use crate::stats::{LinReg, OlsSummary};

use log::{debug, info, warn};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/* =================== Public configuration types =================== */

/// Everything the binary needs to run one subcommand.
#[derive(Debug)]
pub struct Config {
    pub verbose: bool,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Fit one method and report on it
    Fit(Fit),
    /// Gradient descent against the normal equation on the same data
    Compare(Compare),
    /// Fit, then predict at the given x values
    Predict(Predict),
}

/// Where the samples come from.
#[derive(Debug, Clone)]
pub enum DataSource {
    Csv { path: PathBuf, x_col: String, y_col: String },
    Synthetic { line: SyntheticLine },
}

/// Gradient descent hyperparameters as given on the command line. Flags win
/// over the JSON file, the file wins over the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct GdSettings {
    pub config_path: Option<PathBuf>,
    pub learning_rate: Option<f64>,
    pub n_iterations: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Fit {
    pub data: DataSource,
    pub seed: u64,
    pub gd: GdSettings,
    pub method: FitKind,
    pub test_fraction: Option<f64>,
    pub cost_out: Option<PathBuf>,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct Compare {
    pub data: DataSource,
    pub seed: u64,
    pub gd: GdSettings,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct Predict {
    pub data: DataSource,
    pub seed: u64,
    pub gd: GdSettings,
    pub method: FitKind,
    pub at: Vec<f64>,
}

/* =================== Error type (no process::exit) =================== */

#[derive(thiserror::Error, Debug)]
pub enum CmdError {
    #[error("{0}")]
    Fit(#[from] FitError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Msg(String),
}

/* =================== Helpers =================== */

impl DataSource {
    /// Reads or generates the data. `seed` drives the synthetic noise.
    pub fn load(&self, seed: u64) -> Result<Dataset, CmdError> {
        let data = match self {
            DataSource::Csv { path, x_col, y_col } => Dataset::from_csv(path, x_col, y_col)?,
            DataSource::Synthetic { line } => line.generate(&mut seeded_rng(seed))?,
        };
        if data.is_empty() {
            return Err(CmdError::Msg("dataset has no usable rows".to_string()));
        }
        info!("Loaded {} samples", data.len());
        Ok(data)
    }
}

impl GdSettings {
    /// Merges file and flag values and validates the result.
    pub fn resolve(&self) -> Result<GradientDescentConfig, CmdError> {
        let mut cfg = match &self.config_path {
            Some(path) => read_gd_config(path)?,
            None => GradientDescentConfig::default(),
        };
        if let Some(lr) = self.learning_rate {
            cfg.learning_rate = lr;
        }
        if let Some(iterations) = self.n_iterations {
            cfg.n_iterations = iterations;
        }
        cfg.validate()?;
        debug!("gradient descent config: {cfg:?}");
        Ok(cfg)
    }
}

fn read_gd_config(path: &Path) -> Result<GradientDescentConfig, CmdError> {
    let file = File::open(path).map_err(|e| {
        CmdError::Msg(format!("Failed to open config file '{}': {}", path.display(), e))
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn fit_with(
    method: FitKind,
    data: &Dataset,
    gd: &GradientDescentConfig,
) -> Result<Box<dyn FitModel>, CmdError> {
    let model: Box<dyn FitModel> = match method {
        FitKind::GradientDescent => {
            let mut engine = LinearFitEngine::from_config(*gd);
            engine.fit(data.x(), data.y())?;
            let fit = engine.into_fit().ok_or(FitError::NotFitted)?;
            Box::new(fit)
        },
        FitKind::NormalEquation => Box::new(normal_equation(data.x(), data.y())?),
        FitKind::Ols => Box::new(LinReg::train(data.x(), data.y())?),
    };
    Ok(model)
}

/* =================== Entry point =================== */

impl Config {
    /// Runs the selected action, printing its output to stdout.
    pub fn run(&self) -> Result<(), CmdError> {
        match &self.action {
            Action::Fit(f) => self.run_fit(f),
            Action::Compare(c) => self.run_compare(c),
            Action::Predict(p) => self.run_predict(p),
        }
    }
}

/* =================== Actions =================== */

impl Config {
    fn run_fit(&self, f: &Fit) -> Result<(), CmdError> {
        let report = fit_report(f)?;
        if f.json {
            println!("{}", report.to_json()?);
        } else {
            print!("{report}");
        }
        Ok(())
    }

    fn run_compare(&self, c: &Compare) -> Result<(), CmdError> {
        let data = c.data.load(c.seed)?;
        let gd = c.gd.resolve()?;

        let iterative = fit_with(FitKind::GradientDescent, &data, &gd)?;
        let closed = fit_with(FitKind::NormalEquation, &data, &gd)?;
        let gd_report = FitReport::new(iterative.as_ref(), data.x(), data.y())?;
        let ne_report = FitReport::new(closed.as_ref(), data.x(), data.y())?;

        let d_intercept = (iterative.intercept() - closed.intercept()).abs();
        let d_slope = (iterative.slope() - closed.slope()).abs();

        if c.json {
            let out = serde_json::json!({
                "gradient_descent": gd_report,
                "normal_equation": ne_report,
                "abs_diff": { "intercept": d_intercept, "slope": d_slope },
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            print!("{gd_report}");
            print!("{ne_report}");
            println!("|intercept diff|: {d_intercept:.6e}, |slope diff|: {d_slope:.6e}");
        }
        Ok(())
    }

    fn run_predict(&self, p: &Predict) -> Result<(), CmdError> {
        if let Some(bad) = p.at.iter().find(|v| !v.is_finite()) {
            return Err(CmdError::Msg(format!("cannot predict for non-finite input {bad}")));
        }
        let data = p.data.load(p.seed)?;
        let gd = p.gd.resolve()?;
        let model = fit_with(p.method, &data, &gd)?;
        info!("{}", model);

        for (x, y) in p.at.iter().zip(model.predict_all(&p.at)) {
            println!("{x}\t{y}");
        }
        Ok(())
    }
}

/// Loads the data, fits with the requested method and builds the report,
/// writing the cost history on the way if asked to.
pub fn fit_report(f: &Fit) -> Result<FitReport, CmdError> {
    let data = f.data.load(f.seed)?;
    let gd = f.gd.resolve()?;

    let (train, test) = match f.test_fraction {
        Some(frac) => {
            let (train, test) = data.train_test_split(frac, &mut seeded_rng(f.seed))?;
            info!("Split into {} train and {} test samples", train.len(), test.len());
            (train, Some(test))
        },
        None => (data, None),
    };

    let model = fit_with(f.method, &train, &gd)?;
    let mut report = FitReport::new(model.as_ref(), train.x(), train.y())?;
    if let Some(test) = &test {
        report = report.with_test(model.as_ref(), test.x(), test.y())?;
    }
    if f.method == FitKind::Ols {
        match OlsSummary::from_data(train.x(), train.y()) {
            Ok(summary) => report = report.with_inference(summary),
            Err(e) => warn!("No coefficient inference: {e}"),
        }
    }

    if let Some(path) = &f.cost_out {
        match model.cost_history() {
            Some(history) => {
                write_cost_history(path, history)?;
                info!("Wrote {} cost values to {}", history.len(), path.display());
            },
            None => warn!("{} has no cost history, not writing {}", f.method, path.display()),
        }
    }
    Ok(report)
}
