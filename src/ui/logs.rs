//! Log panel rendering.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::MAX_LOG_ENTRIES;

/// Render the log panel, newest entry at the bottom.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let logs = &app.state.logs;

    let title = if logs.scroll() > 0 {
        format!(" Log ({}/{}) [scrolled -{}] ", logs.len(), MAX_LOG_ENTRIES, logs.scroll())
    } else {
        format!(" Log ({}/{}) ", logs.len(), MAX_LOG_ENTRIES)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let height = block.inner(area).height as usize;
    let lines: Vec<Line> = logs
        .visible(height)
        .map(|entry| {
            let style = app.theme.severity_style(entry.severity);
            Line::from(vec![
                Span::styled(format!(" [{}] ", entry.timestamp), app.theme.muted),
                Span::styled(format!("{} ", entry.severity.tag()), style),
                Span::styled(entry.message.clone(), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
