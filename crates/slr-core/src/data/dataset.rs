use crate::fit::fiterror::{check_paired, FitError, FitResult};

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use std::fs::File;
use std::path::Path;

/// Paired feature/target observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Dataset {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> FitResult<Self> {
        check_paired(&x, &y)?;
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Reads two named columns from a comma separated file with a header row.
    /// Rows where either value is missing or not a number are skipped.
    pub fn from_csv<P: AsRef<Path>>(path: P, x_col: &str, y_col: &str) -> FitResult<Self> {
        let file = File::open(path.as_ref())?;
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = rdr.headers()?.clone();
        let col_index = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| FitError::MissingColumn(name.to_string()))
        };
        let x_idx = col_index(x_col)?;
        let y_idx = col_index(y_col)?;

        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut skipped = 0usize;
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let parsed = (
                record.get(x_idx).and_then(|v| v.parse::<f64>().ok()),
                record.get(y_idx).and_then(|v| v.parse::<f64>().ok()),
            );
            match parsed {
                (Some(xv), Some(yv)) if xv.is_finite() && yv.is_finite() => {
                    x.push(xv);
                    y.push(yv);
                },
                _ => {
                    // +2: header line and 1-based numbering
                    warn!("Skipping row {} in {}: unusable value", i + 2, path.as_ref().display());
                    skipped += 1;
                },
            }
        }

        debug!(
            "Read {} rows ({} skipped) from {} using columns '{}' and '{}'",
            x.len(),
            skipped,
            path.as_ref().display(),
            x_col,
            y_col
        );
        Self::new(x, y)
    }

    /// Shuffles the rows with `rng` and returns `(train, test)`.
    pub fn train_test_split<R: Rng + ?Sized>(
        &self,
        test_fraction: f64,
        rng: &mut R,
    ) -> FitResult<(Dataset, Dataset)> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(FitError::InvalidConfig(format!(
                "test fraction must be between 0 and 1, got {test_fraction}"
            )));
        }

        let n = self.len();
        let n_test = ((n as f64) * test_fraction).round() as usize;
        if n_test == 0 || n_test >= n {
            return Err(FitError::InvalidConfig(format!(
                "test fraction {test_fraction} of {n} rows leaves an empty split"
            )));
        }

        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(rng);
        let (test_idx, train_idx) = indices.split_at(n_test);

        Ok((self.select(train_idx), self.select(test_idx)))
    }

    fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: indices.iter().map(|&i| self.x[i]).collect(),
            y: indices.iter().map(|&i| self.y[i]).collect(),
        }
    }
}
