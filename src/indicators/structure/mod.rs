//! Market structure: local extrema, support/resistance, trend lines

pub mod extrema;
pub mod support_resistance;
pub mod trend_lines;

pub use extrema::*;
pub use support_resistance::*;
pub use trend_lines::*;
