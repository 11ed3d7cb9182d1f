//! Main dashboard panels: nodes, circuit, metrics and comparison chart.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::view::{Hop, HopState, Metric, NodeSlot};

/// Render the dashboard body into `area`.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(7), // Nodes / circuit / metrics
        Constraint::Min(8),    // Comparison chart
    ])
    .split(area);

    let top = Layout::horizontal([
        Constraint::Fill(2), // Nodes
        Constraint::Fill(3), // Circuit
        Constraint::Fill(2), // Metrics
    ])
    .split(rows[0]);

    render_nodes(frame, app, top[0]);
    render_circuit(frame, app, top[1]);
    render_metrics(frame, app, top[2]);
    render_chart(frame, app, rows[1]);
}

fn panel<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_nodes(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = NodeSlot::ALL
        .iter()
        .map(|slot| {
            let active = app.state.node_active(*slot);
            let (icon, state) = if active { ("●", "running") } else { ("○", "down") };
            Line::from(vec![
                Span::styled(format!(" {} ", icon), app.theme.node_style(active)),
                Span::raw(format!("{:<20}", slot.label())),
                Span::styled(state, app.theme.node_style(active)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(panel(app, " Nodes ")), area);
}

fn render_circuit(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel(app, " Circuit ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1), // Hop chain
        Constraint::Length(1), // Spacer
        Constraint::Length(1), // Progress
        Constraint::Min(0),
    ])
    .split(inner);

    let mut spans = vec![Span::raw(" ")];
    for (i, hop) in Hop::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ─▶ ", app.theme.muted));
        }
        let state = app.state.hop_state(*hop);
        let marker = match state {
            HopState::Pending => "·",
            HopState::Building => "◌",
            HopState::Active => "✓",
        };
        spans.push(Span::styled(
            format!("{} {}", marker, hop.name()),
            app.theme.hop_style(state),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    let percent = app.state.progress.round().clamp(0.0, 100.0) as u16;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.highlight))
        .percent(percent)
        .label(format!("{}%", percent));
    frame.render_widget(gauge, rows[2]);
}

fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = Metric::ALL
        .iter()
        .map(|metric| {
            Line::from(vec![
                Span::styled(format!(" {:<16}", metric.label()), app.theme.muted),
                Span::styled(app.state.metric(*metric).to_string(), app.theme.value),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(panel(app, " Performance ")), area);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let bars: Vec<Bar> = app
        .state
        .chart
        .bars()
        .map(|(scenario, seconds)| {
            let color = app.theme.bar_color(scenario);
            Bar::default()
                .label(Line::from(scenario.label()))
                .value((seconds * 1_000.0).round().max(0.0) as u64)
                .text_value(format!("{:.2}s", seconds))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(color).add_modifier(Modifier::REVERSED))
        })
        .collect();

    // Spread the four bars over the available width
    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width / 4).saturating_sub(2).clamp(3, 20);

    let chart = BarChart::default()
        .block(panel(app, " Circuit Construction Time (s) "))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2);

    frame.render_widget(chart, area);
}
