//! Daily leaderboard: aggregation, rendering and the day window.

mod aggregator;
mod render;
mod window;

pub use aggregator::{DailyAggregator, ReportRun};
pub use render::{render_report, split_into_chunks};
pub use window::{day_window, next_daily_run, report_window, resolve_local};
