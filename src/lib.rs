/// Chart model: series, scales, bounds and labels
pub mod chart;

/// Agents to plot and plot options
pub mod config;

/// Runs the load, chart and show steps for every configured agent
pub mod driver;

/// Training log loading
pub mod record;

/// Moving average smoothing
pub mod smooth;

/// Terminal chart viewer
#[cfg(feature = "viz")]
pub mod viz;

pub use chart::ScoreChart;
pub use config::{AgentSource, Config, PlotOptions};
pub use record::TrainingRecord;
