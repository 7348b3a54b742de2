use ratatui::{prelude::*, widgets::*};

use super::log::LOG_KEYS;

const APP_KEYS: &[(&str, &str)] = &[
    ("  q  ", "Close this chart and continue with the next log"),
    ("  h  ", "Toggle help popup"),
    (" Tab ", "Switch tabs"),
];

fn binding_line<'a>((key, action): &(&'a str, &'a str)) -> Line<'a> {
    Line::from(vec![
        Span::from(*key).light_cyan().bold(),
        Span::raw(" : "),
        Span::raw(*action),
    ])
}

/// Draw the key binding popup centered over `area`
///
/// The log viewer bindings are only listed while the `Logs` tab is selected.
pub fn render_help(area: Rect, buf: &mut Buffer, logs_selected: bool) {
    let extra: &[(&str, &str)] = if logs_selected { LOG_KEYS } else { &[] };
    let lines: Vec<Line<'_>> = APP_KEYS.iter().chain(extra).map(binding_line).collect();

    let [_, center_vert, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines.len() as u16 + 4),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(64),
        Constraint::Fill(1),
    ])
    .areas(center_vert);

    Clear.render(center, buf);

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::proportional(1))
                .title("Help"),
        )
        .wrap(Wrap { trim: false })
        .render(center, buf);
}
