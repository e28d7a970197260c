//! Viewport classification against fixed breakpoints.

use serde::{Deserialize, Serialize};

/// Layout class derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    /// Below the breakpoint; the panel is a dismissible overlay
    Narrow,
    /// At or above the breakpoint; the panel is a persistent column
    Wide,
}

impl ViewportClass {
    /// Whether this is the narrow (overlay) layout.
    pub fn is_narrow(self) -> bool {
        self == Self::Narrow
    }

    /// CSS class applied to the layout root for this viewport class.
    pub fn layout_class(self) -> &'static str {
        match self {
            Self::Narrow => "layout-narrow",
            Self::Wide => "layout-wide",
        }
    }
}

/// A width threshold in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakpoint(f64);

impl Breakpoint {
    /// Side panel breakpoint (Tailwind `lg`).
    pub const PANEL: Breakpoint = Breakpoint(1024.0);

    /// Top-bar menu breakpoint (Tailwind `md`).
    pub const MENU: Breakpoint = Breakpoint(768.0);

    pub const fn new(px: f64) -> Self {
        Self(px)
    }

    pub fn px(self) -> f64 {
        self.0
    }

    /// Classify a measured width. An unavailable measurement is treated as
    /// wide so the shell never opens an overlay it cannot justify.
    pub fn classify(self, width: Option<f64>) -> ViewportClass {
        match width {
            Some(w) if w.is_finite() && w < self.0 => ViewportClass::Narrow,
            _ => ViewportClass::Wide,
        }
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::PANEL
    }
}
