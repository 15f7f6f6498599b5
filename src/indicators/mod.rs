pub mod error;
pub mod registry;

pub mod momentum;
pub mod structure;
pub mod volatility;

pub use error::IndicatorError;
pub use registry::*;
