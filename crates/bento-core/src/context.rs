// File: crates/bento-core/src/context.rs
// Summary: Explicit dashboard context (theme + sidebar state) handed down to pages.

use crate::theme::{self, Theme};

/// Sidebar width when expanded / collapsed, in pixels.
pub const SIDEBAR_EXPANDED: f32 = 256.0;
pub const SIDEBAR_COLLAPSED: f32 = 72.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

/// UI state shared by every page of one dashboard session.
///
/// Created once at mount, changed only through `toggle_*`, and read by pages
/// while they build their scenes.
#[derive(Clone, Debug)]
pub struct DashboardContext {
    mode: ThemeMode,
    sidebar_collapsed: bool,
    /// Overrides the mode-derived theme (e.g. `high-contrast-dark`).
    custom_theme: Option<Theme>,
}

impl DashboardContext {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode, sidebar_collapsed: false, custom_theme: None }
    }

    /// Build from a theme preset name; "light" selects light mode, any other
    /// non-dark preset is kept as a custom theme.
    pub fn from_theme_name(name: &str) -> Self {
        let t = theme::find(name);
        match t.name {
            "light" => Self::new(ThemeMode::Light),
            "dark" => Self::new(ThemeMode::Dark),
            _ => Self { mode: ThemeMode::Dark, sidebar_collapsed: false, custom_theme: Some(t) },
        }
    }

    pub fn mode(&self) -> ThemeMode { self.mode }

    pub fn theme(&self) -> Theme {
        if let Some(t) = self.custom_theme { return t; }
        match self.mode {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
        }
    }

    pub fn toggle_theme(&mut self) {
        self.custom_theme = None;
        self.mode = self.mode.toggled();
    }

    pub fn sidebar_collapsed(&self) -> bool { self.sidebar_collapsed }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn sidebar_width(&self) -> f32 {
        if self.sidebar_collapsed { SIDEBAR_COLLAPSED } else { SIDEBAR_EXPANDED }
    }

    /// Width left for page content in a viewport of `viewport_width`.
    pub fn content_width(&self, viewport_width: f32) -> f32 {
        (viewport_width - self.sidebar_width()).max(crate::types::MIN_WIDTH)
    }
}

impl Default for DashboardContext {
    fn default() -> Self { Self::new(ThemeMode::Dark) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_flip_state() {
        let mut ctx = DashboardContext::default();
        assert_eq!(ctx.theme().name, "dark");
        ctx.toggle_theme();
        assert_eq!(ctx.mode(), ThemeMode::Light);
        assert_eq!(ctx.theme().name, "light");

        let wide = ctx.content_width(1280.0);
        ctx.toggle_sidebar();
        assert!(ctx.sidebar_collapsed());
        assert_eq!(ctx.content_width(1280.0) - wide, SIDEBAR_EXPANDED - SIDEBAR_COLLAPSED);
    }

    #[test]
    fn custom_theme_from_name() {
        let ctx = DashboardContext::from_theme_name("high-contrast-dark");
        assert_eq!(ctx.theme().name, "high-contrast-dark");
        assert_eq!(DashboardContext::from_theme_name("light").mode(), ThemeMode::Light);
    }
}
