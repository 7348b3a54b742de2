pub mod help;
pub mod log;
pub mod plot;

use crossterm::event::Event;
pub use self::log::Logs;
use ratatui::widgets::WidgetRef;

/// A widget that consumes some of the key events sent to the app
pub trait Component: WidgetRef {
    /// Returns `true` if the event was handled
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}
