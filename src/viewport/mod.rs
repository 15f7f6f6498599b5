//! Price/pixel and index/pixel transforms and the visible candle window.
//!
//! Horizontal layout: candle `i` is centred at `i * cw + cw / 2` in content
//! space and drawn at that position plus the (non-positive) pan offset.
//! Zoom decides how many candles fit in the window; the price scale is
//! recomputed from the visible slice.

pub mod scene;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::common::math;
use crate::models::Candle;

pub use scene::ChartScene;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.2;
pub const MIN_CANDLE_WIDTH: f64 = 3.0;
pub const MAX_CANDLE_WIDTH: f64 = 10.0;
/// Share of the per-candle slot used by the candle itself
const CANDLE_FILL: f64 = 0.8;
/// Padding added around the price range, applied twice
const PRICE_PADDING: f64 = 0.1;

/// Pan/zoom/selection state, mutated only by the gesture controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    pub zoom: f64,
    pub pan_offset: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_index: Option<usize>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_offset: 0.0,
            selected_index: None,
        }
    }
}

impl ViewportState {
    pub fn reset(&mut self) {
        trace!("viewport reset");
        *self = Self::default();
    }

    /// Set zoom (clamped to `[MIN_ZOOM, MAX_ZOOM]`) and re-clamp the pan
    pub fn set_zoom(&mut self, zoom: f64, layout: &ChartLayout) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = math::clamp(zoom, MIN_ZOOM, MAX_ZOOM);
        self.set_pan(self.pan_offset, layout);
    }

    pub fn zoom_by(&mut self, delta: f64, layout: &ChartLayout) {
        self.set_zoom(self.zoom + delta, layout);
    }

    pub fn zoom_in(&mut self, layout: &ChartLayout) {
        self.zoom_by(ZOOM_STEP, layout);
    }

    pub fn zoom_out(&mut self, layout: &ChartLayout) {
        self.zoom_by(-ZOOM_STEP, layout);
    }

    /// Set pan, clamped to `[-max_pan, 0]`
    pub fn set_pan(&mut self, pan: f64, layout: &ChartLayout) {
        if !pan.is_finite() {
            return;
        }
        self.pan_offset = math::clamp(pan, -layout.max_pan(self.zoom), 0.0);
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected_index = index;
    }
}

/// Pixel size of the chart and the number of candles it shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub candle_count: usize,
}

/// Half-open candle index range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub start: usize,
    pub end: usize,
}

impl VisibleWindow {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn slice<'a>(&self, candles: &'a [Candle]) -> &'a [Candle] {
        let end = self.end.min(candles.len());
        let start = self.start.min(end);
        &candles[start..end]
    }
}

impl ChartLayout {
    pub fn new(width: f64, height: f64, candle_count: usize) -> Self {
        Self {
            width,
            height,
            candle_count,
        }
    }

    /// `clamp(W / N * 0.8, 3, 10)`
    pub fn candle_width(&self) -> f64 {
        if self.candle_count == 0 || self.width <= 0.0 {
            return MAX_CANDLE_WIDTH;
        }
        math::clamp(
            self.width / self.candle_count as f64 * CANDLE_FILL,
            MIN_CANDLE_WIDTH,
            MAX_CANDLE_WIDTH,
        )
    }

    /// `floor(W * zoom / cw)`
    pub fn visible_count(&self, zoom: f64) -> usize {
        let count = (self.width.max(0.0) * zoom / self.candle_width()).floor();
        if count.is_finite() && count > 0.0 {
            count as usize
        } else {
            0
        }
    }

    /// `max(0, (N - visibleCount) * cw)`
    pub fn max_pan(&self, zoom: f64) -> f64 {
        let hidden = self.candle_count.saturating_sub(self.visible_count(zoom));
        hidden as f64 * self.candle_width()
    }

    pub fn visible_window(&self, viewport: &ViewportState) -> VisibleWindow {
        let cw = self.candle_width();
        let visible = self.visible_count(viewport.zoom).min(self.candle_count);
        let max_start = self.candle_count - visible;
        let offset = (-viewport.pan_offset / cw).floor();
        let start = if offset.is_finite() && offset > 0.0 {
            (offset as usize).min(max_start)
        } else {
            0
        };
        VisibleWindow {
            start,
            end: start + visible,
        }
    }

    /// Content-space x of the candle centre
    pub fn index_to_x(&self, index: usize) -> f64 {
        let cw = self.candle_width();
        index as f64 * cw + cw / 2.0
    }

    /// Screen x of the candle centre under the given pan
    pub fn index_to_screen_x(&self, index: usize, pan: f64) -> f64 {
        self.index_to_x(index) + pan
    }

    /// Candle under a screen x, if any
    pub fn screen_x_to_index(&self, x: f64, pan: f64) -> Option<usize> {
        let slot = ((x - pan) / self.candle_width()).floor();
        if !slot.is_finite() || slot < 0.0 {
            return None;
        }
        let index = slot as usize;
        (index < self.candle_count).then_some(index)
    }
}

/// Vertical price mapping over a padded `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    pub min: f64,
    pub max: f64,
    pub height: f64,
}

impl PriceScale {
    /// Pad `[low, high]` by 10% of its span, then by 10% of the padded span.
    /// `None` for an empty, inverted or zero-height range.
    pub fn new(low: f64, high: f64, height: f64) -> Option<Self> {
        let span = high - low;
        if !span.is_finite() || span <= 0.0 || height.is_nan() || height <= 0.0 {
            return None;
        }
        let (min, max) = (low - span * PRICE_PADDING, high + span * PRICE_PADDING);
        let padded = max - min;
        Some(Self {
            min: min - padded * PRICE_PADDING,
            max: max + padded * PRICE_PADDING,
            height,
        })
    }

    pub fn from_candles(candles: &[Candle], height: f64) -> Option<Self> {
        let low = math::min_of(candles.iter().map(|c| c.low))?;
        let high = math::max_of(candles.iter().map(|c| c.high))?;
        Self::new(low, high, height)
    }

    /// `H - (p - min) / (max - min) * H`
    pub fn price_to_y(&self, price: f64) -> f64 {
        self.height - (price - self.min) / (self.max - self.min) * self.height
    }

    pub fn y_to_price(&self, y: f64) -> f64 {
        self.min + (self.height - y) / self.height * (self.max - self.min)
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}
