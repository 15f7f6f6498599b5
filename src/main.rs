use std::time::Duration;

use chartschool::config::{AnalysisConfig, DisplayOverrides};
use chartschool::generator::SyntheticParams;
use chartschool::interaction::{ChartSession, PointerEvent};
use chartschool::logging::init_logging;
use chartschool::reveal::RevealAnimation;
use chartschool::services::{resolve_chart, ConsumerKind, InMemoryLessonSource, LessonDataSource};

const DEMO_LESSONS: &str = r#"{
    "support-basics": {
        "config": {
            "display": { "showVolume": true, "timeframe": "4h" },
            "synthetic": { "count": 80, "volatility": 0.0015 },
            "points": [1.10, 1.12, 1.095, 1.13, 1.105]
        }
    }
}"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let source = InMemoryLessonSource::from_json(DEMO_LESSONS)?;
    let config = AnalysisConfig::from_env();
    config.validate()?;

    let resolved = resolve_chart(
        Some(&source as &dyn LessonDataSource),
        Some("support-basics"),
        ConsumerKind::Lesson,
        None,
        &DisplayOverrides::default(),
        &SyntheticParams::default(),
    );
    tracing::info!(
        candles = resolved.series.len(),
        origin = ?resolved.origin,
        timeframe = %resolved.display.timeframe,
        "chart resolved"
    );

    let mut session = ChartSession::new(resolved.series, config, resolved.display, 800.0);
    let analysis = session.analysis();

    println!("Candles:      {}", session.series().len());
    for (kind, points) in &analysis.indicators {
        let last = points.last().map(|p| format!("{:.4}", p.value)).unwrap_or_else(|| "-".into());
        println!("{:<13} {} (last {})", format!("{}:", kind.name()), points.len(), last);
    }
    println!("Patterns:     {}", analysis.patterns.len());
    for pattern in &analysis.patterns {
        println!("  - {}", pattern.description);
    }
    println!("Levels:       {}", analysis.levels.len());
    for level in &analysis.levels {
        println!("  - {}", level.summary());
    }
    println!("Bounces:      {}", analysis.bounces.len());
    println!("Trend lines:  {}", analysis.trend_lines.len());

    // Simulated tap on the middle of the chart
    let layout = *session.layout();
    let (x, y) = (layout.width / 2.0, layout.height / 2.0);
    session.pointer(PointerEvent::down(1, x, y));
    match session.pointer(PointerEvent::up(1, x, y)) {
        Some(selection) => println!("Selection:\n{}", serde_json::to_string_pretty(&selection)?),
        None => println!("Selection:    none"),
    }

    let mut reveal = RevealAnimation::start(session.series().len(), session.series().len().saturating_sub(5), Duration::from_millis(20));
    while !reveal.is_finished() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    reveal.stop();
    println!("Revealed:     {}/{}", reveal.visible(), reveal.total());

    Ok(())
}
