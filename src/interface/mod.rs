pub mod render;

pub use render::{display_goals, display_report, format_goals, format_report, Report, ReportItem};
