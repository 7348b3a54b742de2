use std::num::NonZeroUsize;

use crate::{config::PlotOptions, record::TrainingRecord, smooth::moving_average};

pub const X_TITLE: &str = "Episode";

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("shape mismatch: {episodes} episodes but {scores} scores")]
    ShapeMismatch { episodes: usize, scores: usize },
}

/// How values are placed along the y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YScale {
    #[default]
    Linear,
    Log,
}

impl YScale {
    /// Offset added to every plotted value so that zero scores survive the log transform
    pub fn shift(self) -> f64 {
        match self {
            Self::Linear => 0.0,
            Self::Log => 1.0,
        }
    }

    /// Map a plotted value to its position on the axis
    pub fn project(self, y: f64) -> f64 {
        match self {
            Self::Linear => y,
            Self::Log => y.log10(),
        }
    }

    /// Inverse of [`YScale::project`], used for tick labels
    pub fn unproject(self, pos: f64) -> f64 {
        match self {
            Self::Linear => pos,
            Self::Log => 10f64.powf(pos),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Linear => "Score",
            Self::Log => "log(Score)",
        }
    }
}

/// The three series drawn on every chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesRole {
    Scores,
    MaxScores,
    RollingMean,
}

impl SeriesRole {
    pub fn name(self) -> &'static str {
        match self {
            Self::Scores => "Scores",
            Self::MaxScores => "Max Scores",
            Self::RollingMean => "Rolling Mean",
        }
    }
}

/// Raw statistics of a run, before any log shift
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub episodes: usize,
    /// Highest score actually recorded, unlike the zero-floored running max
    pub best: Option<f64>,
    pub final_mean: Option<f64>,
}

/// Everything needed to draw the performance chart of one agent
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreChart {
    pub title: String,
    pub scale: YScale,
    pub window: NonZeroUsize,
    pub episodes: Vec<f64>,
    /// Plotted values, shifted by [`YScale::shift`]
    pub scores: Vec<f64>,
    pub max_scores: Vec<f64>,
    pub smoothed: Vec<f64>,
    pub summary: Summary,
}

impl ScoreChart {
    pub fn new(
        label: &str,
        record: &TrainingRecord,
        options: &PlotOptions,
    ) -> Result<Self, ChartError> {
        let n = record.episodes.len();
        if record.scores.len() != n || record.max_scores.len() != n {
            return Err(ChartError::ShapeMismatch {
                episodes: n,
                scores: record.scores.len(),
            });
        }

        let mut smoothed = moving_average(&record.scores, options.window);
        smoothed.truncate(n);

        let summary = Summary {
            episodes: n,
            best: record.scores.iter().copied().reduce(f64::max),
            final_mean: smoothed.last().copied(),
        };

        let scale = if options.logy {
            YScale::Log
        } else {
            YScale::Linear
        };
        let shift = scale.shift();
        let shifted = |values: &[f64]| values.iter().map(|v| v + shift).collect::<Vec<_>>();

        let chart = Self {
            title: format!("Performance: {label}"),
            scale,
            window: options.window,
            episodes: record.episodes.iter().map(|&e| e as f64).collect(),
            scores: shifted(&record.scores),
            max_scores: shifted(&record.max_scores),
            smoothed: shifted(&smoothed),
            summary,
        };

        let dropped = chart
            .series()
            .iter()
            .map(|(_, values)| values.len() - chart.points(values).len())
            .sum::<usize>();
        if dropped > 0 {
            log::warn!(
                "{}: {dropped} points cannot be drawn on a {:?} axis",
                chart.title,
                chart.scale
            );
        }

        Ok(chart)
    }

    pub fn y_title(&self) -> &'static str {
        self.scale.title()
    }

    /// The plotted series in drawing order
    pub fn series(&self) -> [(SeriesRole, &[f64]); 3] {
        [
            (SeriesRole::Scores, self.scores.as_slice()),
            (SeriesRole::MaxScores, self.max_scores.as_slice()),
            (SeriesRole::RollingMean, self.smoothed.as_slice()),
        ]
    }

    /// Pair `values` with episodes and project them onto the y axis
    ///
    /// Points with no finite position (log of a non-positive value) are left out.
    pub fn points(&self, values: &[f64]) -> Vec<(f64, f64)> {
        self.episodes
            .iter()
            .zip(values)
            .map(|(&x, &y)| (x, self.scale.project(y)))
            .filter(|(_, y)| y.is_finite())
            .collect()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        bounds(self.episodes.iter().copied())
    }

    /// Bounds of all series in axis coordinates
    pub fn y_bounds(&self) -> [f64; 2] {
        let scale = self.scale;
        bounds(
            self.series()
                .into_iter()
                .flat_map(|(_, values)| values.iter())
                .map(|&y| scale.project(y)),
        )
    }

    /// Tick positions in axis coordinates: both ends and the middle
    ///
    /// Episodes are whole numbers, so the middle x tick is snapped to one.
    pub fn x_ticks(&self) -> [f64; 3] {
        let [lo, mid, hi] = ticks(self.x_bounds());
        [lo, mid.round(), hi]
    }

    pub fn y_ticks(&self) -> [f64; 3] {
        ticks(self.y_bounds())
    }

    pub fn x_labels(&self) -> Vec<String> {
        self.x_ticks().iter().map(|x| format!("{x:.0}")).collect()
    }

    /// Tick labels in data units, so a log axis still reads as scores
    pub fn y_labels(&self) -> Vec<String> {
        self.y_ticks()
            .iter()
            .map(|&pos| format!("{:.2}", self.scale.unproject(pos)))
            .collect()
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let [lo, hi] = values
        .filter(|v| v.is_finite())
        .fold([f64::MAX, f64::MIN], |[lo, hi], v| [lo.min(v), hi.max(v)]);

    if lo > hi {
        [0.0, 1.0]
    } else if lo == hi {
        [lo - 1.0, hi + 1.0]
    } else {
        [lo, hi]
    }
}

fn ticks([lo, hi]: [f64; 2]) -> [f64; 3] {
    [lo, (lo + hi) / 2.0, hi]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(window: usize, logy: bool) -> PlotOptions {
        PlotOptions {
            window: NonZeroUsize::new(window).unwrap(),
            logy,
        }
    }

    fn record() -> TrainingRecord {
        TrainingRecord::new(vec![0, 1, 2, 3], vec![1.0, 3.0, 2.0, 5.0])
    }

    #[test]
    fn linear_chart() {
        let chart = ScoreChart::new("Agent", &record(), &options(3, false)).unwrap();
        assert_eq!(chart.title, "Performance: Agent");
        assert_eq!(chart.y_title(), "Score");
        assert_eq!(chart.episodes, [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(chart.scores, [1.0, 3.0, 2.0, 5.0]);
        assert_eq!(chart.max_scores, [1.0, 3.0, 3.0, 5.0]);
        assert_eq!(chart.smoothed.len(), 4);
        assert_eq!(chart.summary.best, Some(5.0));
        assert_eq!(chart.x_bounds(), [0.0, 3.0]);
        assert_eq!(chart.y_bounds(), [1.0, 5.0]);
        assert_eq!(chart.x_ticks(), [0.0, 2.0, 3.0]);
        assert_eq!(chart.x_labels(), ["0", "2", "3"]);
        assert_eq!(chart.y_labels(), ["1.00", "3.00", "5.00"]);
    }

    #[test]
    fn smoothed_is_truncated_to_episodes() {
        // window larger than the run makes the raw average longer than the input
        let chart = ScoreChart::new("Agent", &record(), &options(50, false)).unwrap();
        assert_eq!(chart.smoothed.len(), chart.episodes.len());

        let default = ScoreChart::new("Agent", &record(), &PlotOptions::default()).unwrap();
        assert_eq!(default.smoothed.len(), 4);
        assert_eq!(default.window.get(), 50);
    }

    #[test]
    fn log_mode_shifts_every_series() {
        let record = TrainingRecord::new(vec![0, 1, 2, 3, 4], vec![0.0, 4.0, 0.0, 9.0, 99.0]);
        let linear = ScoreChart::new("Agent", &record, &options(2, false)).unwrap();
        let log = ScoreChart::new("Agent", &record, &options(2, true)).unwrap();

        assert_eq!(log.scale, YScale::Log);
        assert_eq!(log.y_title(), "log(Score)");
        for ((_, raw), (_, plotted)) in linear.series().iter().zip(log.series().iter()) {
            assert_eq!(raw.len(), plotted.len());
            for (r, p) in raw.iter().zip(plotted.iter()) {
                assert_eq!(*p, r + 1.0);
                assert!(*p > 0.0);
            }
        }
        // raw statistics are not shifted
        assert_eq!(log.summary, linear.summary);
    }

    #[test]
    fn log_mode_projects_points() {
        let record = TrainingRecord::new(vec![0, 1, 2], vec![0.0, 9.0, 99.0]);
        let chart = ScoreChart::new("Agent", &record, &options(1, true)).unwrap();
        let points = chart.points(&chart.scores);
        assert_eq!(points.len(), 3);
        assert!((points[1].1 - 1.0).abs() < 1e-12);
        assert!((points[2].1 - 2.0).abs() < 1e-12);
        assert_eq!(chart.y_labels(), ["1.00", "10.00", "100.00"]);
    }

    #[test]
    fn log_mode_drops_unplottable_points() {
        let record = TrainingRecord::new(vec![0, 1, 2], vec![-5.0, 1.0, 3.0]);
        let chart = ScoreChart::new("Agent", &record, &options(1, true)).unwrap();
        assert_eq!(chart.scores, [-4.0, 2.0, 4.0]);
        assert_eq!(chart.points(&chart.scores).len(), 2);
        assert_eq!(chart.points(&chart.max_scores).len(), 3);
    }

    #[test]
    fn middle_x_tick_sits_on_its_label() {
        let record = TrainingRecord::new(vec![0, 1, 2, 3, 4, 5, 6], vec![0.0; 7]);
        let chart = ScoreChart::new("Agent", &record, &options(2, false)).unwrap();
        assert_eq!(chart.x_ticks(), [0.0, 3.0, 6.0]);

        let record = TrainingRecord::new(vec![10, 11], vec![0.0; 2]);
        let chart = ScoreChart::new("Agent", &record, &options(2, false)).unwrap();
        for (tick, label) in chart.x_ticks().iter().zip(chart.x_labels()) {
            assert_eq!(tick.fract(), 0.0);
            assert_eq!(format!("{tick}"), label);
        }
    }

    #[test]
    fn best_is_a_recorded_score() {
        let record = TrainingRecord::new(vec![0, 1, 2], vec![-7.0, -3.0, -4.0]);
        let chart = ScoreChart::new("Agent", &record, &options(2, false)).unwrap();
        assert_eq!(chart.max_scores, [0.0, 0.0, 0.0]);
        assert_eq!(chart.summary.best, Some(-3.0));
    }

    #[test]
    fn shape_mismatch() {
        let record = TrainingRecord::new(vec![0, 1, 2], vec![1.0, 2.0]);
        let err = ScoreChart::new("Agent", &record, &options(2, false)).unwrap_err();
        assert!(matches!(
            err,
            ChartError::ShapeMismatch {
                episodes: 3,
                scores: 2
            }
        ));
    }

    #[test]
    fn degenerate_bounds_are_widened() {
        assert_eq!(bounds([].into_iter()), [0.0, 1.0]);
        assert_eq!(bounds([2.0, 2.0].into_iter()), [1.0, 3.0]);
        assert_eq!(bounds([f64::NEG_INFINITY, 4.0].into_iter()), [3.0, 5.0]);

        let chart =
            ScoreChart::new("Empty", &TrainingRecord::default(), &options(50, false)).unwrap();
        assert_eq!(chart.x_bounds(), [0.0, 1.0]);
        assert_eq!(chart.summary.best, None);
    }
}
