//! Palettes and the structural-class → style mapping for both themes.
//!
//! The view layer tags nodes with `ViewClass`; everything visual happens
//! here. Swapping the palette restyles the whole tree without touching it.

use ratatui::style::{Color, Modifier, Style};

use dash_core::prefs::Theme;
use dash_core::view::ViewClass;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub primary: Color,
    pub secondary: Color,
    pub muted: Color,
    pub accent: Color,
    pub warning: Color,
    pub link: Color,
    pub badge: Color,
    pub heading: Color,
    pub selection_bg: Color,
    pub separator: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 18),
            primary: Color::Rgb(210, 210, 225),
            secondary: Color::Rgb(140, 140, 160),
            muted: Color::Rgb(95, 95, 115),
            accent: Color::Rgb(255, 95, 95),
            warning: Color::Rgb(255, 184, 80),
            link: Color::Rgb(80, 140, 200),
            badge: Color::Rgb(100, 160, 130),
            heading: Color::Rgb(235, 235, 245),
            selection_bg: Color::Rgb(34, 34, 48),
            separator: Color::Rgb(40, 40, 52),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(246, 246, 243),
            primary: Color::Rgb(40, 40, 48),
            secondary: Color::Rgb(100, 100, 112),
            muted: Color::Rgb(150, 150, 158),
            accent: Color::Rgb(190, 40, 40),
            warning: Color::Rgb(176, 108, 0),
            link: Color::Rgb(30, 90, 170),
            badge: Color::Rgb(40, 120, 80),
            heading: Color::Rgb(20, 20, 26),
            selection_bg: Color::Rgb(222, 226, 236),
            separator: Color::Rgb(210, 210, 205),
        }
    }

    /// Style for one structural class.
    pub fn class_style(&self, class: ViewClass) -> Style {
        match class {
            ViewClass::DaySection | ViewClass::ChannelGroup | ViewClass::VideoContent => {
                Style::default().fg(self.primary)
            }
            ViewClass::DayHeading => Style::default()
                .fg(self.heading)
                .add_modifier(Modifier::BOLD),
            ViewClass::DailyDigest => Style::default()
                .fg(self.secondary)
                .add_modifier(Modifier::ITALIC),
            ViewClass::ChannelName => Style::default().fg(self.link).add_modifier(Modifier::BOLD),
            ViewClass::VideoCard => Style::default().fg(self.primary),
            ViewClass::ThumbnailWrap => Style::default().fg(self.muted),
            ViewClass::DurationBadge => Style::default().fg(self.badge),
            ViewClass::VideoTitle => Style::default()
                .fg(self.primary)
                .add_modifier(Modifier::BOLD),
            ViewClass::VideoSummary => Style::default().fg(self.secondary),
            ViewClass::FallbackText => Style::default()
                .fg(self.muted)
                .add_modifier(Modifier::ITALIC),
            ViewClass::WarningText => Style::default()
                .fg(self.warning)
                .add_modifier(Modifier::ITALIC),
            ViewClass::BtnWatch => Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            ViewClass::FallbackMessage => Style::default()
                .fg(self.muted)
                .add_modifier(Modifier::ITALIC),
            ViewClass::PlayerContainer => Style::default().fg(self.accent),
        }
    }

    /// Fold a class list left to right; later classes override the fg and
    /// add their modifiers, mirroring how the modifier classes stack.
    pub fn style_for(&self, classes: &[ViewClass]) -> Style {
        classes
            .iter()
            .fold(Style::default(), |acc, &c| acc.patch(self.class_style(c)))
    }

    pub fn style_selected(&self) -> Style {
        Style::default().bg(self.selection_bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_differ() {
        assert_ne!(Palette::dark().bg, Palette::light().bg);
        assert_ne!(Palette::dark().primary, Palette::light().primary);
    }

    #[test]
    fn warning_class_overrides_fallback_color() {
        let p = Palette::dark();
        let failed = p.style_for(&[
            ViewClass::VideoSummary,
            ViewClass::FallbackText,
            ViewClass::WarningText,
        ]);
        assert_eq!(failed.fg, Some(p.warning));

        let missing = p.style_for(&[ViewClass::VideoSummary, ViewClass::FallbackText]);
        assert_eq!(missing.fg, Some(p.muted));
    }
}
