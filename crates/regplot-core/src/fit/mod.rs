pub mod fiterror;
pub mod linfit;

pub use fiterror::FitError;
pub use linfit::{fit, FitResult, MIN_FIT_POINTS};
