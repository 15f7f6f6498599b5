use serde::Serialize;

use crate::indicators::IndicatorKind;
use crate::models::{Candle, IndicatorPoint, PatternMatch};

/// Data point surfaced to the detail panel after a tap
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Selection {
    Candle {
        index: usize,
        candle: Candle,
    },
    Indicator {
        indicator: IndicatorKind,
        point: IndicatorPoint,
    },
    Pattern {
        #[serde(rename = "match")]
        pattern: PatternMatch,
    },
}

impl Selection {
    /// Candle index the selection is anchored on
    pub fn index(&self) -> usize {
        match self {
            Selection::Candle { index, .. } => *index,
            Selection::Indicator { point, .. } => point.index,
            Selection::Pattern { pattern } => pattern.end_index,
        }
    }
}
