use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use crate::{
    chart::{ChartError, ScoreChart},
    config::Config,
    record::{LoadError, TrainingRecord},
};

/// Something that can display a finished chart
///
/// Implementations block until the chart has been dismissed.
pub trait Renderer {
    fn show(&mut self, chart: &ScoreChart) -> io::Result<()>;
}

/// Errors that end a run early
///
/// Parse errors and missing keys are not among them; those are reported per file and skipped.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("could not load '{label}': {source}")]
    Load {
        label: String,
        #[source]
        source: LoadError,
    },

    #[error("could not chart '{label}': {source}")]
    Chart {
        label: String,
        #[source]
        source: ChartError,
    },

    #[error("rendering failed: {0}")]
    Render(#[source] io::Error),

    #[error("could not write diagnostics: {0}")]
    Diagnostics(#[source] io::Error),
}

/// A log that was skipped because it could not be loaded
#[derive(Debug)]
pub struct Failure {
    pub label: String,
    pub path: PathBuf,
    pub error: LoadError,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error loading or plotting {}: {}",
            self.path.display(),
            self.error
        )
    }
}

/// Outcome of a completed run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Labels of the agents whose charts were shown, in order
    pub plotted: Vec<String>,
    pub failures: Vec<Failure>,
}

/// Load, chart and show every configured agent in order
///
/// A log that is not valid JSON or lacks a required key gets one line on `diagnostics` and
/// the run moves on to the next agent. Any other load error, chart error or rendering error
/// stops the run.
pub fn run<R, W>(
    config: &Config,
    renderer: &mut R,
    diagnostics: &mut W,
) -> Result<RunReport, RunError>
where
    R: Renderer + ?Sized,
    W: io::Write + ?Sized,
{
    let mut report = RunReport::default();

    for agent in &config.agents {
        log::debug!("loading '{}' from {}", agent.label, agent.path.display());

        let record = match TrainingRecord::load(&agent.path) {
            Ok(record) => record,
            Err(source) if !source.is_skippable() => {
                return Err(RunError::Load {
                    label: agent.label.clone(),
                    source,
                });
            }
            Err(error) => {
                let failure = Failure {
                    label: agent.label.clone(),
                    path: agent.path.clone(),
                    error,
                };
                log::error!("{failure}");
                writeln!(diagnostics, "{failure}").map_err(RunError::Diagnostics)?;
                report.failures.push(failure);
                continue;
            }
        };

        let chart = ScoreChart::new(&agent.label, &record, &config.plot).map_err(|source| {
            RunError::Chart {
                label: agent.label.clone(),
                source,
            }
        })?;

        log::info!(
            "plotting '{}': {} episodes, window {}",
            agent.label,
            record.len(),
            config.plot.window
        );
        renderer.show(&chart).map_err(RunError::Render)?;
        report.plotted.push(agent.label.clone());
    }

    Ok(report)
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_paths(&self) -> impl Iterator<Item = &Path> {
        self.failures.iter().map(|f| f.path.as_path())
    }
}
