use ratatui::{prelude::*, symbols::Marker, widgets::*};

use crate::chart::{ScoreChart, SeriesRole, X_TITLE};

const ORANGE: Color = Color::Rgb(255, 165, 0);
const GRID: Color = Color::Rgb(60, 60, 60);

/// Marker, graph type and color of each series
fn series_style(role: SeriesRole) -> (Marker, GraphType, Color) {
    match role {
        SeriesRole::Scores => (Marker::Dot, GraphType::Scatter, Color::Blue),
        SeriesRole::MaxScores => (Marker::Braille, GraphType::Line, Color::Green),
        SeriesRole::RollingMean => (Marker::Braille, GraphType::Line, ORANGE),
    }
}

fn axis_labels(labels: Vec<String>) -> Vec<Span<'static>> {
    labels.into_iter().map(|l| l.bold()).collect()
}

impl Widget for &ScoreChart {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let x_bounds = self.x_bounds();
        let y_bounds = self.y_bounds();

        // one segment per tick, drawn first so the series paint over it
        let grid: Vec<[(f64, f64); 2]> = self
            .x_ticks()
            .into_iter()
            .map(|x| [(x, y_bounds[0]), (x, y_bounds[1])])
            .chain(
                self.y_ticks()
                    .into_iter()
                    .map(|y| [(x_bounds[0], y), (x_bounds[1], y)]),
            )
            .collect();

        let series: Vec<(SeriesRole, Vec<(f64, f64)>)> = self
            .series()
            .into_iter()
            .map(|(role, values)| (role, self.points(values)))
            .collect();

        let mut datasets: Vec<Dataset<'_>> = grid
            .iter()
            .map(|segment| {
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(GRID))
                    .data(segment)
            })
            .collect();

        datasets.extend(series.iter().map(|(role, points)| {
            let (marker, graph_type, color) = series_style(*role);
            Dataset::default()
                .name(role.name())
                .marker(marker)
                .graph_type(graph_type)
                .style(Style::default().fg(color))
                .data(points)
        }));

        let x_axis = Axis::default()
            .title(X_TITLE)
            .dark_gray()
            .labels(axis_labels(self.x_labels()))
            .bounds(x_bounds);

        let y_axis = Axis::default()
            .title(self.y_title())
            .dark_gray()
            .labels(axis_labels(self.y_labels()))
            .bounds(y_bounds);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.title.as_str())
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));

        Chart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
            .render(area, buf);
    }
}
