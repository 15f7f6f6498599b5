use std::sync::Arc;
use tracing::debug;

use super::{GestureController, GestureOutput, PointerEvent, Selection};
use crate::analysis::{AnalysisCache, ChartAnalysis};
use crate::config::{AnalysisConfig, DisplayConfig};
use crate::models::CandleSeries;
use crate::viewport::{ChartLayout, ChartScene, ViewportState};

/// One interactive chart: its series, cached analysis and view state
pub struct ChartSession {
    series: CandleSeries,
    config: AnalysisConfig,
    display: DisplayConfig,
    layout: ChartLayout,
    viewport: ViewportState,
    gestures: GestureController,
    cache: AnalysisCache,
}

impl ChartSession {
    pub fn new(series: CandleSeries, config: AnalysisConfig, display: DisplayConfig, width: f64) -> Self {
        let layout = ChartLayout::new(width, display.height, series.len());
        Self {
            series,
            config,
            display,
            layout,
            viewport: ViewportState::default(),
            gestures: GestureController::new(),
            cache: AnalysisCache::new(),
        }
    }

    pub fn series(&self) -> &CandleSeries {
        &self.series
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    /// Replace the series. The viewport resets only when the content differs.
    pub fn set_series(&mut self, series: CandleSeries) {
        if series.id() != self.series.id() {
            debug!(
                from = self.series.id().0,
                to = series.id().0,
                candles = series.len(),
                "series changed, resetting viewport"
            );
            self.gestures.cancel();
            self.viewport.reset();
        }
        self.layout.candle_count = series.len();
        self.series = series;
    }

    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
    }

    pub fn set_display(&mut self, display: DisplayConfig) {
        self.layout.height = display.height;
        self.display = display;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.layout.width = width;
        self.layout.height = height;
        // Re-clamp pan against the new geometry
        let pan = self.viewport.pan_offset;
        self.viewport.set_pan(pan, &self.layout);
    }

    pub fn analysis(&mut self) -> Arc<ChartAnalysis> {
        self.cache.get_or_compute(&self.series, &self.config)
    }

    pub fn scene(&mut self) -> ChartScene {
        let analysis = self.analysis();
        ChartScene::build(&self.series, &analysis, &self.viewport, &self.layout, &self.display)
    }

    /// Feed a pointer event. Returns the selection when the event completes a
    /// tap on something selectable.
    pub fn pointer(&mut self, event: PointerEvent) -> Option<Selection> {
        if !self.display.interactive {
            return None;
        }
        match self.gestures.handle(&mut self.viewport, &self.layout, event) {
            GestureOutput::Tap { x, y } => self.tap(x, y),
            GestureOutput::None | GestureOutput::ViewportChanged => None,
        }
    }

    pub fn wheel(&mut self, delta_y: f64) -> GestureOutput {
        if !self.display.interactive {
            return GestureOutput::None;
        }
        self.gestures.wheel(&mut self.viewport, &self.layout, delta_y)
    }

    pub fn zoom_in(&mut self) -> GestureOutput {
        self.gestures.zoom_in(&mut self.viewport, &self.layout)
    }

    pub fn zoom_out(&mut self) -> GestureOutput {
        self.gestures.zoom_out(&mut self.viewport, &self.layout)
    }

    pub fn reset_view(&mut self) -> GestureOutput {
        self.gestures.reset(&mut self.viewport)
    }

    fn tap(&mut self, x: f64, y: f64) -> Option<Selection> {
        let analysis = self.analysis();
        let scene = ChartScene::build(&self.series, &analysis, &self.viewport, &self.layout, &self.display);
        let selection = scene.hit_test(x, y, &self.series, &analysis);
        self.viewport.select(selection.as_ref().map(Selection::index));
        if let Some(selection) = &selection {
            debug!(index = selection.index(), x, y, "chart selection");
        }
        selection
    }
}
