use std::{num::NonZeroUsize, path::PathBuf};

/// Smoothing window used when none is configured
pub const DEFAULT_WINDOW: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(window) => window,
    None => unreachable!(),
};

/// A training log to plot and the name shown in its chart title
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSource {
    pub label: String,
    pub path: PathBuf,
}

impl AgentSource {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Options applied to every chart of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotOptions {
    /// Number of episodes averaged by the rolling mean
    pub window: NonZeroUsize,
    /// Shift all series by +1 and draw the y axis on a log scale
    pub logy: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            logy: false,
        }
    }
}

/// Everything a run needs: which logs to load, in order, and how to plot them
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub agents: Vec<AgentSource>,
    pub plot: PlotOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agents: vec![
                AgentSource::new("Validation Resume", "data/validation_resume.json"),
                AgentSource::new(
                    "Training Values Epsilon",
                    "data/training_values_epsilon.json",
                ),
                AgentSource::new("Training Values", "data/training_values.json"),
            ],
            plot: PlotOptions::default(),
        }
    }
}
