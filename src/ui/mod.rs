//! Terminal UI rendering using ratatui.
//!
//! Every panel reads from [`crate::view::DashboardState`] through the
//! [`App`]; nothing here mutates state.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Nodes, circuit progress, performance metrics and the comparison chart
//! - [`logs`]: Scrolling log panel
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├────────────┬────────────┬────────────┤
//! │ Nodes      │ Circuit    │ Metrics    │
//! ├────────────┴────────────┴────────────┤
//! │ Comparison chart (dashboard)         │
//! ├──────────────────────────────────────┤
//! │ Log (logs::render)                   │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Help overlay rendered on top (common::render_help)
//! ```
//!
//! Fullscreen drops the header and status bar.

pub mod common;
pub mod dashboard;
pub mod logs;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal size for usable display
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

/// Draw one frame.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Check for minimum terminal size
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chrome = if app.fullscreen { 0 } else { 1 };
    let chunks = Layout::vertical([
        Constraint::Length(chrome), // Header bar
        Constraint::Min(15),        // Dashboard panels
        Constraint::Length(10),     // Log
        Constraint::Length(chrome), // Status bar
    ])
    .split(area);

    if !app.fullscreen {
        common::render_header(frame, app, chunks[0]);
    }
    dashboard::render(frame, app, chunks[1]);
    logs::render(frame, app, chunks[2]);
    if !app.fullscreen {
        common::render_status_bar(frame, app, chunks[3]);
    }

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
