//! Screen-space primitives for one frame, and hit testing over them.

use serde::Serialize;
use tracing::debug;

use super::{ChartLayout, PriceScale, ViewportState, VisibleWindow};
use crate::analysis::ChartAnalysis;
use crate::common::math;
use crate::config::DisplayConfig;
use crate::indicators::IndicatorKind;
use crate::interaction::Selection;
use crate::models::{
    CandleSeries, LevelType, PatternBias, PatternKind, PatternMatch, TrendDirection,
};

/// Share of the chart height given to volume bars when shown
pub const VOLUME_RATIO: f64 = 0.2;
pub const PANEL_HEIGHT: f64 = 80.0;
pub const HIT_RADIUS: f64 = 10.0;
/// Vertical gap between a candle extreme and its pattern marker
const MARKER_OFFSET: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleShape {
    pub index: usize,
    pub x: f64,
    pub width: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub bullish: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeBar {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub bullish: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelLine {
    pub price: f64,
    pub y: f64,
    pub level_type: LevelType,
    pub strength: usize,
    pub is_psychological: bool,
    /// `(top, bottom)` in pixels
    pub zone: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternMarker {
    pub kind: PatternKind,
    pub x: f64,
    pub y: f64,
    pub label: &'static str,
    pub glyph: &'static str,
    pub color: &'static str,
    /// Position in `ChartAnalysis::patterns`
    pub source: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BounceMarker {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub strength: f64,
    pub level_type: LevelType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelPoint {
    pub x: f64,
    pub y: f64,
    /// Position in the indicator's point list
    pub source: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorPanel {
    pub kind: IndicatorKind,
    pub top: f64,
    pub height: f64,
    pub points: Vec<PanelPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BandLines {
    pub upper: Vec<(f64, f64)>,
    pub middle: Vec<(f64, f64)>,
    pub lower: Vec<(f64, f64)>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartScene {
    pub layout: ChartLayout,
    pub pan: f64,
    pub window: VisibleWindow,
    pub scale: Option<PriceScale>,
    /// No drawable data; the presentation layer shows a placeholder
    pub placeholder: bool,
    pub candles: Vec<CandleShape>,
    pub volume: Vec<VolumeBar>,
    pub levels: Vec<LevelLine>,
    pub trend_lines: Vec<Segment>,
    pub patterns: Vec<PatternMarker>,
    pub bounces: Vec<BounceMarker>,
    pub bands: Option<BandLines>,
    pub panels: Vec<IndicatorPanel>,
}

/// Marker glyph and color for each pattern kind
pub fn pattern_style(kind: PatternKind) -> (&'static str, &'static str) {
    match kind {
        PatternKind::Hammer => ("🔨", "#22c55e"),
        PatternKind::InvertedHammer => ("⚒", "#22c55e"),
        PatternKind::Doji => ("✚", "#eab308"),
        PatternKind::BullishEngulfing => ("▲", "#16a34a"),
        PatternKind::BearishEngulfing => ("▼", "#dc2626"),
        PatternKind::MorningStar => ("☀", "#16a34a"),
        PatternKind::EveningStar => ("☾", "#dc2626"),
        PatternKind::InsideBar => ("▣", "#64748b"),
        PatternKind::OutsideBar => ("□", "#64748b"),
        PatternKind::DoubleTop => ("M", "#dc2626"),
        PatternKind::DoubleBottom => ("W", "#16a34a"),
        PatternKind::HeadAndShoulders => ("⩘", "#dc2626"),
        PatternKind::Flag => ("⚑", "#3b82f6"),
        PatternKind::Pennant => ("◮", "#3b82f6"),
        PatternKind::Triangle => ("△", "#8b5cf6"),
        PatternKind::Butterfly => ("🦋", "#ec4899"),
        PatternKind::Bat => ("🦇", "#ec4899"),
        PatternKind::Crab => ("🦀", "#ec4899"),
        PatternKind::Shark => ("🦈", "#ec4899"),
        PatternKind::FiveZero => ("5-0", "#ec4899"),
    }
}

impl ChartScene {
    fn empty(layout: ChartLayout, pan: f64, window: VisibleWindow) -> Self {
        Self {
            layout,
            pan,
            window,
            scale: None,
            placeholder: true,
            candles: Vec::new(),
            volume: Vec::new(),
            levels: Vec::new(),
            trend_lines: Vec::new(),
            patterns: Vec::new(),
            bounces: Vec::new(),
            bands: None,
            panels: Vec::new(),
        }
    }

    pub fn build(
        series: &CandleSeries,
        analysis: &ChartAnalysis,
        viewport: &ViewportState,
        layout: &ChartLayout,
        display: &DisplayConfig,
    ) -> Self {
        let candles = series.candles();
        let pan = viewport.pan_offset;
        // A stale layout may claim more candles than the series holds
        let window = layout.visible_window(viewport);
        let end = window.end.min(candles.len());
        let window = VisibleWindow {
            start: window.start.min(end),
            end,
        };
        let visible = window.slice(candles);

        let price_height = if display.show_volume {
            layout.height * (1.0 - VOLUME_RATIO)
        } else {
            layout.height
        };
        let Some(scale) = PriceScale::from_candles(visible, price_height) else {
            debug!(
                candles = candles.len(),
                visible = visible.len(),
                "degenerate price range, rendering placeholder"
            );
            return Self::empty(*layout, pan, window);
        };

        let mut scene = Self::empty(*layout, pan, window);
        scene.scale = Some(scale);
        scene.placeholder = false;

        let cw = layout.candle_width();
        let x_of = |index: usize| layout.index_to_screen_x(index, pan);

        for (index, candle) in (window.start..).zip(visible) {
            scene.candles.push(CandleShape {
                index,
                x: x_of(index),
                width: cw,
                wick_top: scale.price_to_y(candle.high),
                wick_bottom: scale.price_to_y(candle.low),
                body_top: scale.price_to_y(candle.body_top()),
                body_bottom: scale.price_to_y(candle.body_bottom()),
                bullish: candle.close >= candle.open,
                selected: viewport.selected_index == Some(index),
            });
        }

        if display.show_volume {
            let volume_height = layout.height * VOLUME_RATIO;
            let max_volume = math::max_of(visible.iter().filter_map(|c| c.volume)).unwrap_or(0.0);
            if max_volume > 0.0 {
                for (index, candle) in (window.start..).zip(visible) {
                    let Some(volume) = candle.volume else {
                        continue;
                    };
                    let height = volume / max_volume * volume_height;
                    scene.volume.push(VolumeBar {
                        index,
                        x: x_of(index),
                        y: layout.height - height,
                        height,
                        bullish: candle.close >= candle.open,
                    });
                }
            }
        }

        if display.show_levels {
            for level in &analysis.levels {
                if !scale.contains(level.price) {
                    continue;
                }
                scene.levels.push(LevelLine {
                    price: level.price,
                    y: scale.price_to_y(level.price),
                    level_type: level.level_type,
                    strength: level.strength,
                    is_psychological: level.is_psychological,
                    zone: level
                        .zone
                        .map(|z| (scale.price_to_y(z.upper), scale.price_to_y(z.lower))),
                });
            }

            for line in &analysis.trend_lines {
                scene.trend_lines.push(Segment {
                    x1: x_of(line.start_index),
                    y1: scale.price_to_y(line.start_price),
                    x2: x_of(line.end_index),
                    y2: scale.price_to_y(line.end_price),
                    direction: line.direction,
                });
            }

            for bounce in &analysis.bounces {
                if !window.contains(bounce.index) {
                    continue;
                }
                scene.bounces.push(BounceMarker {
                    index: bounce.index,
                    x: x_of(bounce.index),
                    y: scale.price_to_y(bounce.level_price),
                    strength: bounce.strength,
                    level_type: bounce.level_type,
                });
            }
        }

        if display.show_patterns {
            for (source, pattern) in analysis.patterns.iter().enumerate() {
                if let Some(marker) = pattern_marker(pattern, source, series, &scale, window, &x_of) {
                    scene.patterns.push(marker);
                }
            }
        }

        scene.bands = band_lines(analysis, window, &scale, &x_of);
        scene.panels = indicator_panels(analysis, window, layout, &x_of);
        scene
    }

    /// Resolve a tap into the data under it: pattern markers first, then
    /// indicator panels, then candles
    pub fn hit_test(&self, x: f64, y: f64, series: &CandleSeries, analysis: &ChartAnalysis) -> Option<Selection> {
        if self.placeholder {
            return None;
        }

        let marker = self
            .patterns
            .iter()
            .filter(|m| (m.x - x).hypot(m.y - y) <= HIT_RADIUS)
            .min_by(|a, b| {
                let da = (a.x - x).hypot(a.y - y);
                let db = (b.x - x).hypot(b.y - y);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });
        if let Some(pattern) = marker.and_then(|m| analysis.patterns.get(m.source)) {
            return Some(Selection::Pattern {
                pattern: pattern.clone(),
            });
        }

        let cw = self.layout.candle_width();
        if let Some(panel) = self
            .panels
            .iter()
            .find(|p| y >= p.top && y < p.top + p.height)
        {
            let nearest = panel
                .points
                .iter()
                .filter(|p| (p.x - x).abs() <= cw)
                .min_by(|a, b| {
                    (a.x - x)
                        .abs()
                        .partial_cmp(&(b.x - x).abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })?;
            let point = *analysis.indicator(panel.kind).get(nearest.source)?;
            return Some(Selection::Indicator {
                indicator: panel.kind,
                point,
            });
        }

        if y < 0.0 || y >= self.layout.height {
            return None;
        }
        let index = self.layout.screen_x_to_index(x, self.pan)?;
        if !self.window.contains(index) {
            return None;
        }
        let candle = *series.get(index)?;
        Some(Selection::Candle { index, candle })
    }
}

fn pattern_marker(
    pattern: &PatternMatch,
    source: usize,
    series: &CandleSeries,
    scale: &PriceScale,
    window: VisibleWindow,
    x_of: &impl Fn(usize) -> f64,
) -> Option<PatternMarker> {
    if !window.contains(pattern.end_index) {
        return None;
    }
    let candle = series.get(pattern.end_index)?;
    let y = match pattern.bias {
        PatternBias::Bearish => scale.price_to_y(candle.high) - MARKER_OFFSET,
        PatternBias::Bullish | PatternBias::Neutral => {
            scale.price_to_y(candle.low) + MARKER_OFFSET
        }
    };
    let (glyph, color) = pattern_style(pattern.kind);
    Some(PatternMarker {
        kind: pattern.kind,
        x: x_of(pattern.end_index),
        y,
        label: pattern.kind.label(),
        glyph,
        color,
        source,
    })
}

fn band_lines(
    analysis: &ChartAnalysis,
    window: VisibleWindow,
    scale: &PriceScale,
    x_of: &impl Fn(usize) -> f64,
) -> Option<BandLines> {
    let mut bands = BandLines::default();
    for point in analysis.bollinger.iter().filter(|p| window.contains(p.index)) {
        let x = x_of(point.index);
        bands.upper.push((x, scale.price_to_y(point.upper)));
        bands.middle.push((x, scale.price_to_y(point.middle)));
        bands.lower.push((x, scale.price_to_y(point.lower)));
    }
    (!bands.middle.is_empty()).then_some(bands)
}

fn indicator_panels(
    analysis: &ChartAnalysis,
    window: VisibleWindow,
    layout: &ChartLayout,
    x_of: &impl Fn(usize) -> f64,
) -> Vec<IndicatorPanel> {
    let mut panels = Vec::new();
    for (&kind, points) in &analysis.indicators {
        if kind == IndicatorKind::Bollinger {
            continue;
        }
        let visible: Vec<(usize, f64, usize)> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| window.contains(p.index))
            .map(|(source, p)| (source, p.value, p.index))
            .collect();

        let (min, max) = if kind.is_oscillator() {
            (0.0, 100.0)
        } else {
            let min = math::min_of(visible.iter().map(|v| v.1));
            let max = math::max_of(visible.iter().map(|v| v.1));
            match (min, max) {
                (Some(min), Some(max)) if max > min => (min, max),
                _ => continue,
            }
        };

        let top = layout.height + panels.len() as f64 * PANEL_HEIGHT;
        let points = visible
            .into_iter()
            .map(|(source, value, index)| PanelPoint {
                x: x_of(index),
                y: top + PANEL_HEIGHT - (value - min) / (max - min) * PANEL_HEIGHT,
                source,
            })
            .collect();
        panels.push(IndicatorPanel {
            kind,
            top,
            height: PANEL_HEIGHT,
            points,
        });
    }
    panels
}
