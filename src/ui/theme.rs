//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{Scenario, Severity};
use crate::view::HopState;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for success entries, running nodes and the live indicator.
    pub success: Color,
    /// Color for in-progress states.
    pub warning: Color,
    /// Color for errors and the offline indicator.
    pub error: Color,
    /// Color for informational log entries.
    pub info: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for panel titles and metric labels.
    pub header: Style,
    /// Style for large metric values.
    pub value: Style,
    /// Style for inactive elements.
    pub muted: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
    /// Bar colors per scenario, in chart order.
    pub bars: [Color; 4],
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::LightBlue,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            value: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
            bars: [
                Color::Rgb(39, 174, 96),
                Color::Rgb(52, 152, 219),
                Color::Rgb(243, 156, 18),
                Color::Rgb(231, 76, 60),
            ],
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            value: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
            bars: [Color::Green, Color::Blue, Color::Yellow, Color::Red],
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a log severity tag
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Info => Style::default().fg(self.info),
            Severity::Success => Style::default().fg(self.success),
            Severity::Error => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
        }
    }

    /// Style for a hop of the circuit diagram
    pub fn hop_style(&self, state: HopState) -> Style {
        match state {
            HopState::Pending => self.muted,
            HopState::Building => Style::default()
                .fg(self.warning)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            HopState::Active => Style::default().fg(self.success).add_modifier(Modifier::BOLD),
        }
    }

    /// Style for a node slot
    pub fn node_style(&self, active: bool) -> Style {
        if active {
            Style::default().fg(self.success).add_modifier(Modifier::BOLD)
        } else {
            self.muted
        }
    }

    /// Bar color for a scenario
    pub fn bar_color(&self, scenario: Scenario) -> Color {
        let index = Scenario::ALL.iter().position(|s| *s == scenario).unwrap_or(0);
        self.bars[index]
    }
}
