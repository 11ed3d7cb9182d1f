//! Common UI components shared across panels.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_duration;

/// Render the header bar.
///
/// Displays: liveness indicator, title, current network, demo badge, clock.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (live_label, live_style) = if app.state.live {
        ("● LIVE", Style::default().fg(app.theme.success).add_modifier(Modifier::BOLD))
    } else {
        ("○ OFFLINE", Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD))
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", live_label), live_style),
        Span::styled("PQ-TOR SAGIN MONITOR ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ Network: "),
        Span::styled(app.state.network.clone(), app.theme.value),
    ];

    if app.demo_running() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "DEMO",
            Style::default().fg(app.theme.warning).add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(app.clock.clone(), app.theme.header));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows the polled API, the poll interval and the available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let scroll_info = match app.state.logs.scroll() {
        0 => String::new(),
        n => format!(" | Log -{}", n),
    };

    let status = format!(
        " {} every {}{} | r:refresh ^L:clear ^D:demo F11:fullscreen ?:help q:quit",
        app.api_description(),
        format_duration(app.poll_interval()),
        scroll_info,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Refresh now"),
        Line::from("  Ctrl+D      Toggle demo mode"),
        Line::from("  F11 / f     Toggle fullscreen"),
        Line::from("  e           Export to JSON"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Log",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  PgUp/PgDn   Scroll log"),
        Line::from("  Home/End    Oldest/newest entry"),
        Line::from("  Ctrl+L      Clear log"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ?           Toggle help"),
        Line::from("  q / Esc     Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
