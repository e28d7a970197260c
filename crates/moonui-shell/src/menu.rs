//! Full-screen top-bar menu for small screens.
//!
//! Unlike the side panel this overlay has no viewport coupling (CSS hides the
//! trigger above the header breakpoint) and is dismissed only by its own
//! close control or by following one of its links.

use tracing::debug;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TopBarMenu {
    open: bool,
}

impl TopBarMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.set(true);
    }

    pub fn close(&mut self) {
        self.set(false);
    }

    /// The top-bar trigger flips the menu.
    pub fn toggle(&mut self) {
        self.set(!self.open);
    }

    pub fn on_link_activated(&mut self) {
        self.close();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn set(&mut self, open: bool) {
        if self.open != open {
            debug!(open, "top-bar menu");
        }
        self.open = open;
    }
}
