pub mod linreg;
pub mod stats;

pub use linreg::LinReg;
pub use stats::{adjusted_r2, mean, r2_from_predictions, rmse};
