//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{Direction, Tone};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for favorable movement (rising index, falling rate).
    pub favorable: Color,
    /// Color for unfavorable movement.
    pub unfavorable: Color,
    /// Color for unchanged values.
    pub neutral: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for headline card values.
    pub value: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            favorable: Color::Green,
            unfavorable: Color::Red,
            neutral: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            value: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            favorable: Color::Green,
            unfavorable: Color::Red,
            neutral: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            value: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Chart color for a card's tone.
    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Favorable => self.favorable,
            Tone::Unfavorable => self.unfavorable,
        }
    }

    /// Style for a raw price movement, where up is always green.
    pub fn direction_style(&self, direction: Direction) -> Style {
        match direction {
            Direction::Up => Style::default().fg(self.favorable),
            Direction::Down => Style::default().fg(self.unfavorable),
            Direction::Flat => Style::default().fg(self.neutral),
        }
    }

    /// Style for a card's change indicator.
    ///
    /// A zero change is neutral regardless of tone.
    pub fn change_style(&self, direction: Direction, tone: Tone) -> Style {
        match direction {
            Direction::Flat => Style::default().fg(self.neutral),
            _ => Style::default().fg(self.tone_color(tone)),
        }
    }
}
