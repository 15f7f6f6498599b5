//! Pattern kinds and detected pattern matches

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Hammer,
    InvertedHammer,
    Doji,
    BullishEngulfing,
    BearishEngulfing,
    MorningStar,
    EveningStar,
    InsideBar,
    OutsideBar,
    DoubleTop,
    DoubleBottom,
    HeadAndShoulders,
    Flag,
    Pennant,
    Triangle,
    Butterfly,
    Bat,
    Crab,
    Shark,
    FiveZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternCategory {
    Candlestick,
    Chart,
    Harmonic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternBias {
    Bullish,
    Bearish,
    Neutral,
}

impl PatternKind {
    pub fn all() -> &'static [PatternKind] {
        &[
            PatternKind::Hammer,
            PatternKind::InvertedHammer,
            PatternKind::Doji,
            PatternKind::BullishEngulfing,
            PatternKind::BearishEngulfing,
            PatternKind::MorningStar,
            PatternKind::EveningStar,
            PatternKind::InsideBar,
            PatternKind::OutsideBar,
            PatternKind::DoubleTop,
            PatternKind::DoubleBottom,
            PatternKind::HeadAndShoulders,
            PatternKind::Flag,
            PatternKind::Pennant,
            PatternKind::Triangle,
            PatternKind::Butterfly,
            PatternKind::Bat,
            PatternKind::Crab,
            PatternKind::Shark,
            PatternKind::FiveZero,
        ]
    }

    pub fn category(&self) -> PatternCategory {
        match self {
            PatternKind::Hammer
            | PatternKind::InvertedHammer
            | PatternKind::Doji
            | PatternKind::BullishEngulfing
            | PatternKind::BearishEngulfing
            | PatternKind::MorningStar
            | PatternKind::EveningStar
            | PatternKind::InsideBar
            | PatternKind::OutsideBar => PatternCategory::Candlestick,
            PatternKind::DoubleTop
            | PatternKind::DoubleBottom
            | PatternKind::HeadAndShoulders
            | PatternKind::Flag
            | PatternKind::Pennant
            | PatternKind::Triangle => PatternCategory::Chart,
            PatternKind::Butterfly
            | PatternKind::Bat
            | PatternKind::Crab
            | PatternKind::Shark
            | PatternKind::FiveZero => PatternCategory::Harmonic,
        }
    }

    pub fn is_harmonic(&self) -> bool {
        self.category() == PatternCategory::Harmonic
    }

    pub fn label(&self) -> &'static str {
        match self {
            PatternKind::Hammer => "Hammer",
            PatternKind::InvertedHammer => "Inverted Hammer",
            PatternKind::Doji => "Doji",
            PatternKind::BullishEngulfing => "Bullish Engulfing",
            PatternKind::BearishEngulfing => "Bearish Engulfing",
            PatternKind::MorningStar => "Morning Star",
            PatternKind::EveningStar => "Evening Star",
            PatternKind::InsideBar => "Inside Bar",
            PatternKind::OutsideBar => "Outside Bar",
            PatternKind::DoubleTop => "Double Top",
            PatternKind::DoubleBottom => "Double Bottom",
            PatternKind::HeadAndShoulders => "Head and Shoulders",
            PatternKind::Flag => "Flag",
            PatternKind::Pennant => "Pennant",
            PatternKind::Triangle => "Triangle",
            PatternKind::Butterfly => "Butterfly",
            PatternKind::Bat => "Bat",
            PatternKind::Crab => "Crab",
            PatternKind::Shark => "Shark",
            PatternKind::FiveZero => "5-0",
        }
    }

    /// Typical bias of the pattern; harmonic and continuation patterns take
    /// their direction from the match itself
    pub fn bias(&self) -> PatternBias {
        match self {
            PatternKind::Hammer
            | PatternKind::InvertedHammer
            | PatternKind::BullishEngulfing
            | PatternKind::MorningStar
            | PatternKind::DoubleBottom => PatternBias::Bullish,
            PatternKind::BearishEngulfing
            | PatternKind::EveningStar
            | PatternKind::DoubleTop
            | PatternKind::HeadAndShoulders => PatternBias::Bearish,
            _ => PatternBias::Neutral,
        }
    }
}

/// The five pivots of a harmonic pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicPoints {
    pub x: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub indices: [usize; 5],
}

/// Leg ratios of a harmonic match.
///
/// These are reported for display only; recognizers never check them against
/// the canonical Fibonacci proportions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicRatios {
    pub xb_xa: f64,
    pub ac_ab: f64,
    pub bd_bc: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatch {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub start_index: usize,
    pub end_index: usize,
    pub bias: PatternBias,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harmonic: Option<HarmonicPoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratios: Option<HarmonicRatios>,
}

impl PatternMatch {
    pub fn span(&self) -> (usize, usize) {
        (self.start_index, self.end_index)
    }

    pub fn overlaps(&self, other: &PatternMatch) -> bool {
        self.start_index <= other.end_index && other.start_index <= self.end_index
    }
}
