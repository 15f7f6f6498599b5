use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IndicatorError {
    #[error("{name} period must be at least {min}, got {period}")]
    InvalidPeriod {
        name: &'static str,
        period: usize,
        min: usize,
    },

    #[error("invalid {name} parameter: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}
