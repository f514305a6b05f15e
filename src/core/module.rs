//! Module trait for self-contained tab panels

use crossterm::event::KeyEvent;

use super::Action;

/// Trait for UI modules that can handle input
pub trait Module {
    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent) -> Action;

    /// While true, every key goes to the module, including global shortcuts
    fn captures_input(&self) -> bool {
        false
    }
}
