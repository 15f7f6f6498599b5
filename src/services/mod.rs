pub mod lesson_data;

pub use lesson_data::{
    resolve_chart, ConsumerKind, InMemoryLessonSource, LessonChartConfig, LessonDataSource, LessonEntry,
    ResolvedChart, SeriesOrigin,
};
