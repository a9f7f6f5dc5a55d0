pub mod linreg;
pub mod metrics;
pub mod ols;

pub use linreg::LinReg;
pub use metrics::{adjusted_r2, mae, mse, pearson, r2, residuals, rmse, rss, Metrics};
pub use ols::OlsSummary;
