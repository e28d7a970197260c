//! What the DOM should look like for a given shell state.
//!
//! Kept free of browser types so it can be checked on any target.

use moonui_shell::{ShellSnapshot, TopBarMenu};

/// Attribute values for the panel, backdrop and toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellView {
    /// `data-shown` on the panel
    pub panel_shown: bool,
    /// `data-shown` on the backdrop
    pub backdrop_shown: bool,
    /// `data-shown` and `aria-expanded` on the toggle button
    pub toggle_expanded: bool,
    /// Hides the toggle button outside narrow layouts
    pub toggle_hidden: bool,
    pub layout_class: &'static str,
    pub toggle_label: &'static str,
}

impl From<ShellSnapshot> for ShellView {
    fn from(snapshot: ShellSnapshot) -> Self {
        Self {
            panel_shown: snapshot.panel_rendered(),
            backdrop_shown: snapshot.overlay_open(),
            toggle_expanded: snapshot.overlay_open(),
            toggle_hidden: !snapshot.toggle_rendered(),
            layout_class: snapshot.viewport.layout_class(),
            toggle_label: if snapshot.overlay_open() {
                "Close navigation"
            } else {
                "Open navigation"
            },
        }
    }
}

/// Attribute values for the top-bar menu overlay and its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView {
    pub hidden: bool,
    pub expanded: bool,
}

impl From<&TopBarMenu> for MenuView {
    fn from(menu: &TopBarMenu) -> Self {
        Self {
            hidden: !menu.is_open(),
            expanded: menu.is_open(),
        }
    }
}

pub fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moonui_shell::ViewportClass;

    fn snapshot(viewport: ViewportClass, shown: bool) -> ShellSnapshot {
        ShellSnapshot { viewport, shown }
    }

    #[test]
    fn wide_always_renders_panel_without_overlay() {
        let view = ShellView::from(snapshot(ViewportClass::Wide, false));

        assert!(view.panel_shown);
        assert!(!view.backdrop_shown);
        assert!(view.toggle_hidden);
        assert_eq!(view.layout_class, "layout-wide");
    }

    #[test]
    fn narrow_open_shows_overlay() {
        let view = ShellView::from(snapshot(ViewportClass::Narrow, true));

        assert!(view.panel_shown);
        assert!(view.backdrop_shown);
        assert!(view.toggle_expanded);
        assert!(!view.toggle_hidden);
        assert_eq!(view.toggle_label, "Close navigation");
    }

    #[test]
    fn narrow_closed_hides_panel() {
        let view = ShellView::from(snapshot(ViewportClass::Narrow, false));

        assert!(!view.panel_shown);
        assert!(!view.backdrop_shown);
        assert_eq!(view.toggle_label, "Open navigation");
        assert_eq!(view.layout_class, "layout-narrow");
    }

    #[test]
    fn menu_view_follows_menu() {
        let mut menu = TopBarMenu::new();
        assert!(MenuView::from(&menu).hidden);

        menu.open();
        let view = MenuView::from(&menu);
        assert!(!view.hidden);
        assert!(view.expanded);
    }
}
