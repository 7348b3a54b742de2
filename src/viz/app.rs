use std::{io, time::Duration};

use crossterm::event::{self, Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use super::{
    components::{help::render_help, Component, Logs},
    tui::{self, Tui},
    util::event_keycode,
};
use crate::chart::ScoreChart;

const TABS: [&str; 2] = ["Plots", "Logs"];
const LOGS_TAB: usize = 1;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum State {
    #[default]
    View,
    Quit,
}

/// The root TUI component: one chart window, open until the user quits
pub struct App<'a> {
    state: State,
    chart: &'a ScoreChart,
    selected_tab: usize,
    show_help: bool,
    logs: Logs,
}

impl<'a> App<'a> {
    pub fn new(chart: &'a ScoreChart) -> Self {
        Self {
            state: State::default(),
            chart,
            selected_tab: 0,
            show_help: false,
            logs: Logs::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Initialize the terminal and run the main loop
    ///
    /// Restores the terminal on exit, including when drawing fails.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = tui::init()?;
        let result = self.event_loop(&mut terminal);
        finish(result, tui::restore())
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> io::Result<()> {
        while self.state != State::Quit {
            terminal.draw(|frame| frame.render_widget(&*self, frame.size()))?;

            if event::poll(POLL_INTERVAL)? {
                let event = event::read()?;
                self.handle_event(&event);
            }
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: &Event) {
        if self.selected_tab == LOGS_TAB && !self.show_help && self.logs.handle_ui_event(event) {
            return;
        }

        let Some(key) = event_keycode(event) else {
            return;
        };

        match key {
            KeyCode::Char('q') => self.state = State::Quit,
            KeyCode::Char('h') => self.show_help = !self.show_help,
            KeyCode::Esc => self.show_help = false,
            KeyCode::Tab => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            _ => {}
        }
    }

    fn summary_line(&self) -> Line<'_> {
        let summary = &self.chart.summary;
        let fmt = |v: Option<f64>| v.map_or_else(|| String::from("-"), |v| format!("{v:.2}"));

        Line::from(vec![
            Span::raw(" Episodes: "),
            Span::from(summary.episodes.to_string()).bold(),
            Span::raw("   Best: "),
            Span::from(fmt(summary.best)).green().bold(),
            Span::raw(format!("   Rolling mean ({}): ", self.chart.window)),
            Span::from(fmt(summary.final_mean)).bold(),
            Span::raw("   h: help  q: next").dark_gray(),
        ])
    }
}

/// Combine the outcome of the main loop with that of restoring the terminal
///
/// A loop error wins; a restore failure on top of it is logged rather than dropped.
fn finish(result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    match (result, restored) {
        (Err(err), Err(restore_err)) => {
            log::error!("could not restore terminal: {restore_err}");
            Err(err)
        }
        (result, restored) => result.and(restored),
    }
}

impl Widget for &App<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [menu_area, main_area, summary_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        match self.selected_tab {
            0 => self.chart.render(main_area, buf),
            LOGS_TAB => self.logs.render_ref(main_area, buf),
            _ => {}
        }

        Paragraph::new(self.summary_line())
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Summary"),
            )
            .render(summary_area, buf);

        if self.show_help {
            render_help(area, buf, self.selected_tab == LOGS_TAB);
        }
    }
}
