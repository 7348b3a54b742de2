//! Full-screen terminal viewer for score charts

use std::io;

use crate::{chart::ScoreChart, driver::Renderer};

mod app;
mod components;
mod tui;
mod util;

pub use app::{App, State};

/// Shows each chart in its own terminal window and waits for the user to close it
#[derive(Debug, Default, Clone, Copy)]
pub struct TuiRenderer;

impl Renderer for TuiRenderer {
    fn show(&mut self, chart: &ScoreChart) -> io::Result<()> {
        App::new(chart).run()
    }
}
