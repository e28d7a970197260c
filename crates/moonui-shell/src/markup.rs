//! Element ids and attributes shared by the page templates and the browser
//! bindings.

use serde::Serialize;

pub const LAYOUT_ID: &str = "moonui-layout";
pub const PANEL_ID: &str = "moonui-panel";
pub const PANEL_TOGGLE_ID: &str = "moonui-panel-toggle";
pub const BACKDROP_ID: &str = "moonui-backdrop";
pub const MENU_ID: &str = "moonui-menu";
pub const MENU_OPEN_ID: &str = "moonui-menu-open";
pub const MENU_CLOSE_ID: &str = "moonui-menu-close";
pub const CONFIG_ID: &str = "moonui-shell-config";

/// Set to "true"/"false" on the panel, backdrop and toggle button.
pub const SHOWN_ATTR: &str = "data-shown";

/// Carries the snippet text on copy buttons.
pub const COPY_ATTR: &str = "data-copy";

/// All ids, for handing to templates.
#[derive(Debug, Clone, Serialize)]
pub struct MarkupIds {
    pub layout: &'static str,
    pub panel: &'static str,
    pub panel_toggle: &'static str,
    pub backdrop: &'static str,
    pub menu: &'static str,
    pub menu_open: &'static str,
    pub menu_close: &'static str,
    pub config: &'static str,
    pub shown_attr: &'static str,
    pub copy_attr: &'static str,
}

impl Default for MarkupIds {
    fn default() -> Self {
        Self {
            layout: LAYOUT_ID,
            panel: PANEL_ID,
            panel_toggle: PANEL_TOGGLE_ID,
            backdrop: BACKDROP_ID,
            menu: MENU_ID,
            menu_open: MENU_OPEN_ID,
            menu_close: MENU_CLOSE_ID,
            config: CONFIG_ID,
            shown_attr: SHOWN_ATTR,
            copy_attr: COPY_ATTR,
        }
    }
}
