use crate::fit::fiterror::FitResult;
use crate::fit::fitkind::FitKind;
use crate::fit::fitmodel::FitModel;
use crate::fit::params::Params;
use crate::stats::metrics::{pearson, Metrics};
use crate::stats::ols::OlsSummary;

use serde::Serialize;

use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    pub method: FitKind,
    pub params: Params,
    pub n_train: usize,
    pub train: Metrics,
    /// Pearson r between x and y of the training data
    pub correlation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<Metrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference: Option<OlsSummary>,
}

impl FitReport {
    /// Evaluates `model` on the data it was trained on.
    pub fn new(model: &dyn FitModel, x: &[f64], y: &[f64]) -> FitResult<Self> {
        let y_hat = model.predict_all(x);
        let train = Metrics::evaluate(y, &y_hat)?;
        let history = model.cost_history();

        Ok(Self {
            method: model.kind(),
            params: model.params(),
            n_train: x.len(),
            train,
            correlation: pearson(x, y),
            test: None,
            iterations: history.map(|h| h.len()),
            initial_cost: history.and_then(|h| h.first().copied()),
            final_cost: history.and_then(|h| h.last().copied()),
            inference: None,
        })
    }

    /// Adds metrics on held-out data.
    pub fn with_test(mut self, model: &dyn FitModel, x: &[f64], y: &[f64]) -> FitResult<Self> {
        let y_hat = model.predict_all(x);
        self.test = Some(Metrics::evaluate(y, &y_hat)?);
        Ok(self)
    }

    pub fn with_inference(mut self, summary: OlsSummary) -> Self {
        self.inference = Some(summary);
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} fit on {} samples", self.method, self.n_train)?;
        writeln!(f, "  {}", self.params)?;
        if let (Some(iterations), Some(first), Some(last)) =
            (self.iterations, self.initial_cost, self.final_cost)
        {
            writeln!(f, "  iterations: {iterations}, cost: {first:.6} -> {last:.6}")?;
        }
        writeln!(f, "  train  {}", self.train)?;
        if let Some(r) = self.correlation {
            writeln!(f, "  pearson r: {r:.6}")?;
        }
        if let Some(test) = &self.test {
            writeln!(f, "  test   {test}")?;
        }
        if let Some(inference) = &self.inference {
            writeln!(f, "  {inference}")?;
        }
        Ok(())
    }
}

/// Writes `iteration,cost` rows, one per gradient descent step.
pub fn write_cost_history<P: AsRef<Path>>(path: P, history: &[f64]) -> FitResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["iteration", "cost"])?;
    for (i, cost) in history.iter().enumerate() {
        wtr.write_record([i.to_string(), cost.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
