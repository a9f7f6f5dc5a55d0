use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitKind {
    GradientDescent,
    NormalEquation,
    Ols,
}

impl std::fmt::Display for FitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitKind::GradientDescent => write!(f, "Gradient descent"),
            FitKind::NormalEquation => write!(f, "Normal equation"),
            FitKind::Ols => write!(f, "Ordinary least squares"),
        }
    }
}

impl FromStr for FitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gradient-descent" | "gd" => Ok(FitKind::GradientDescent),
            "normal-equation" | "normal" => Ok(FitKind::NormalEquation),
            "ols" => Ok(FitKind::Ols),
            other => Err(format!(
                "unknown method '{other}', expected one of: gradient-descent, normal-equation, ols"
            )),
        }
    }
}

impl FitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitKind::GradientDescent => "gradient-descent",
            FitKind::NormalEquation => "normal-equation",
            FitKind::Ols => "ols",
        }
    }
    pub fn all() -> &'static [FitKind] {
        use FitKind::*;
        &[GradientDescent, NormalEquation, Ols]
    }
}
