use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::*};
use tui_logger::{TuiLoggerSmartWidget, TuiWidgetEvent, TuiWidgetState};

use crate::viz::util::event_keycode;

use super::Component;

/// Key bindings of the log viewer, shown in the help popup
pub const LOG_KEYS: &[(&str, &str)] = &[
    ("  s  ", "Show or hide the target selector"),
    ("  f  ", "Focus on the selected target only"),
    ("⬆ / ⬇", "Switch log target"),
    ("⬅ / ➡", "Show one level less/more for the target"),
    ("- / +", "Capture one level less/more for the target"),
    ("PgUp ", "Page mode, scroll up in the history"),
    ("PgDn ", "Scroll down while in page mode"),
    (" Esc ", "Leave page mode"),
    ("Space", "Hide targets whose filter is off"),
];

/// Records captured by `tui_logger` during the whole run
///
/// Load failures of earlier files show up here too.
pub struct Logs {
    state: TuiWidgetState,
}

impl Logs {
    pub fn new() -> Self {
        Self {
            state: TuiWidgetState::new().set_default_display_level(log::LevelFilter::Debug),
        }
    }
}

impl Default for Logs {
    fn default() -> Self {
        Self::new()
    }
}

fn widget_event(key: KeyCode) -> Option<TuiWidgetEvent> {
    let event = match key {
        KeyCode::Char(' ') => TuiWidgetEvent::SpaceKey,
        KeyCode::Esc => TuiWidgetEvent::EscapeKey,
        KeyCode::PageUp => TuiWidgetEvent::PrevPageKey,
        KeyCode::PageDown => TuiWidgetEvent::NextPageKey,
        KeyCode::Up => TuiWidgetEvent::UpKey,
        KeyCode::Down => TuiWidgetEvent::DownKey,
        KeyCode::Left => TuiWidgetEvent::LeftKey,
        KeyCode::Right => TuiWidgetEvent::RightKey,
        KeyCode::Char('=' | '+') => TuiWidgetEvent::PlusKey,
        KeyCode::Char('-' | '_') => TuiWidgetEvent::MinusKey,
        KeyCode::Char('s') => TuiWidgetEvent::HideKey,
        KeyCode::Char('f') => TuiWidgetEvent::FocusKey,
        _ => return None,
    };
    Some(event)
}

impl WidgetRef for Logs {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Logs");
        let inner = block.inner(area);
        block.render(area, buf);

        TuiLoggerSmartWidget::default()
            .style(Style::default().white())
            .style_error(Style::default().light_red())
            .style_warn(Style::default().light_yellow())
            .style_info(Style::default().cyan())
            .style_debug(Style::default().dark_gray())
            .output_separator(' ')
            .state(&self.state)
            .render(inner, buf);
    }
}

impl Component for Logs {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        let Some(event) = event_keycode(event).and_then(widget_event) else {
            return false;
        };
        self.state.transition(event);
        true
    }
}
