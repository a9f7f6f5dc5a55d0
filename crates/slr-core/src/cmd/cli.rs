use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::cmd::config::{
    Action, Compare as CompareCfg, Config, DataSource, Fit as FitCfg, GdSettings,
    Predict as PredictCfg,
};
use crate::data::SyntheticLine;
use crate::fit::FitKind;

#[derive(Debug, Parser)]
#[command(
    name = "slr",
    about = "Simple linear regression with gradient descent and closed-form solvers",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Log debug output (RUST_LOG still takes precedence)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fit a line and print parameters and metrics
    Fit(FitArgs),

    /// Fit with gradient descent and the normal equation on the same data
    Compare(CompareArgs),

    /// Fit a line, then predict y for the given x values
    Predict(PredictArgs),
}

/* ----------------------- shared ----------------------- */

#[derive(Debug, Args)]
pub struct DataArgs {
    /// CSV file with a header row; synthetic data is generated when omitted
    #[arg(long = "csv", value_hint = ValueHint::FilePath, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Feature column in the CSV file
    #[arg(long = "x-col", default_value = "x")]
    pub x_col: String,

    /// Target column in the CSV file
    #[arg(long = "y-col", default_value = "y")]
    pub y_col: String,

    /// Number of synthetic samples
    #[arg(long = "samples", default_value_t = 100)]
    pub samples: usize,

    /// Slope of the synthetic line
    #[arg(long = "true-slope", default_value_t = 3.0, allow_negative_numbers = true)]
    pub true_slope: f64,

    /// Intercept of the synthetic line
    #[arg(long = "true-intercept", default_value_t = 4.0, allow_negative_numbers = true)]
    pub true_intercept: f64,

    /// Standard deviation of the synthetic gaussian noise
    #[arg(long = "noise", default_value_t = 1.0)]
    pub noise: f64,

    #[arg(long = "x-min", default_value_t = 0.0, allow_negative_numbers = true)]
    pub x_min: f64,

    #[arg(long = "x-max", default_value_t = 2.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Seed for synthetic data and train/test shuffling
    #[arg(long = "seed", default_value_t = 42)]
    pub seed: u64,
}

#[derive(Debug, Args)]
pub struct HyperArgs {
    /// JSON file with `learning_rate` and `n_iterations`
    #[arg(long = "config", value_hint = ValueHint::FilePath, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Gradient descent step size (overrides the config file)
    #[arg(long = "learning-rate")]
    pub learning_rate: Option<f64>,

    /// Gradient descent iteration count (overrides the config file)
    #[arg(long = "iterations")]
    pub iterations: Option<usize>,
}

/* ------------------------- fit ------------------------- */

#[derive(Debug, Args)]
pub struct FitArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub hyper: HyperArgs,

    /// gradient-descent, normal-equation or ols
    #[arg(short = 'm', long = "method", default_value = "gradient-descent")]
    pub method: FitKind,

    /// Hold out this fraction of rows for evaluation
    #[arg(long = "test-fraction")]
    pub test_fraction: Option<f64>,

    /// Write the per-iteration cost to this CSV file
    #[arg(long = "cost-out", value_hint = ValueHint::FilePath, value_name = "PATH")]
    pub cost_out: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long = "json")]
    pub json: bool,
}

/* ----------------------- compare ----------------------- */

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub hyper: HyperArgs,

    /// Print the reports as JSON
    #[arg(long = "json")]
    pub json: bool,
}

/* ----------------------- predict ----------------------- */

#[derive(Debug, Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub hyper: HyperArgs,

    #[arg(short = 'm', long = "method", default_value = "gradient-descent")]
    pub method: FitKind,

    /// Feature values to predict for
    #[arg(long = "at", num_args = 1.., required = true, allow_negative_numbers = true)]
    pub at: Vec<f64>,
}

// -------- Map CLI -> Config/Action types --------

impl DataArgs {
    fn into_source(self) -> DataSource {
        match self.csv {
            Some(path) => DataSource::Csv { path, x_col: self.x_col, y_col: self.y_col },
            None => DataSource::Synthetic {
                line: SyntheticLine {
                    slope: self.true_slope,
                    intercept: self.true_intercept,
                    noise_std: self.noise,
                    x_min: self.x_min,
                    x_max: self.x_max,
                    n: self.samples,
                },
            },
        }
    }
}

impl From<HyperArgs> for GdSettings {
    fn from(h: HyperArgs) -> Self {
        GdSettings {
            config_path: h.config,
            learning_rate: h.learning_rate,
            n_iterations: h.iterations,
        }
    }
}

impl Cli {
    pub fn into_config(self) -> Config {
        let action = match self.command {
            Commands::Fit(args) => Action::Fit(FitCfg {
                seed: args.data.seed,
                data: args.data.into_source(),
                gd: args.hyper.into(),
                method: args.method,
                test_fraction: args.test_fraction,
                cost_out: args.cost_out,
                json: args.json,
            }),
            Commands::Compare(args) => Action::Compare(CompareCfg {
                seed: args.data.seed,
                data: args.data.into_source(),
                gd: args.hyper.into(),
                json: args.json,
            }),
            Commands::Predict(args) => Action::Predict(PredictCfg {
                seed: args.data.seed,
                data: args.data.into_source(),
                gd: args.hyper.into(),
                method: args.method,
                at: args.at,
            }),
        };
        Config { verbose: self.verbose, action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fit_defaults_to_synthetic_gradient_descent() {
        let cli = Cli::try_parse_from(["slr", "fit"]).unwrap();
        match cli.into_config().action {
            Action::Fit(fit) => {
                assert_eq!(fit.method, FitKind::GradientDescent);
                assert_eq!(fit.seed, 42);
                assert!(fit.cost_out.is_none());
                match fit.data {
                    DataSource::Synthetic { line } => {
                        assert_eq!(line, SyntheticLine::default());
                    },
                    other => panic!("expected synthetic data, got {other:?}"),
                }
            },
            other => panic!("expected fit action, got {other:?}"),
        }
    }

    #[test]
    fn test_fit_csv_and_overrides() {
        let cli = Cli::try_parse_from([
            "slr",
            "-v",
            "fit",
            "--csv",
            "housing.csv",
            "--x-col",
            "MedInc",
            "--y-col",
            "MedHouseVal",
            "--method",
            "normal-equation",
            "--learning-rate",
            "0.5",
            "--test-fraction",
            "0.2",
            "--json",
        ])
        .unwrap();
        let cfg = cli.into_config();
        assert!(cfg.verbose);
        let Action::Fit(fit) = cfg.action else { panic!("expected fit action") };
        assert_eq!(fit.method, FitKind::NormalEquation);
        assert_eq!(fit.gd.learning_rate, Some(0.5));
        assert_eq!(fit.gd.n_iterations, None);
        assert_eq!(fit.test_fraction, Some(0.2));
        assert!(fit.json);
        match fit.data {
            DataSource::Csv { path, x_col, y_col } => {
                assert_eq!(path, PathBuf::from("housing.csv"));
                assert_eq!(x_col, "MedInc");
                assert_eq!(y_col, "MedHouseVal");
            },
            other => panic!("expected csv data, got {other:?}"),
        }
    }

    #[test]
    fn test_predict_takes_negative_values() {
        let cli =
            Cli::try_parse_from(["slr", "predict", "--true-slope", "-2", "--at", "-1.5", "3"])
                .unwrap();
        let Action::Predict(predict) = cli.into_config().action else {
            panic!("expected predict action")
        };
        assert_eq!(predict.at, vec![-1.5, 3.0]);
        let DataSource::Synthetic { line } = predict.data else { panic!("expected synthetic") };
        assert_eq!(line.slope, -2.0);
    }

    #[test]
    fn test_synthetic_sample_count() {
        let cli =
            Cli::try_parse_from(["slr", "compare", "--samples", "7", "--noise", "0"]).unwrap();
        let Action::Compare(compare) = cli.into_config().action else {
            panic!("expected compare action")
        };
        let DataSource::Synthetic { line } = compare.data else { panic!("expected synthetic") };
        assert_eq!(line.n, 7);
        assert_eq!(line.noise_std, 0.0);
        assert!(Cli::try_parse_from(["slr", "fit", "--n", "7"]).is_err());
    }

    #[test]
    fn test_predict_requires_values_and_known_method() {
        assert!(Cli::try_parse_from(["slr", "predict"]).is_err());
        assert!(Cli::try_parse_from(["slr", "fit", "--method", "ridge"]).is_err());
    }
}
