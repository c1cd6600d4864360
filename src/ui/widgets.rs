use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::status::Severity;

/// Status log under the trees, newest entry last.
pub fn draw_status_log(f: &mut Frame, app: &App, area: Rect) {
    let running = app.jobs.len();
    let title = if running > 0 {
        format!("Status ({running} running)")
    } else {
        "Status".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Yellow));

    let capacity = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .status
        .tail(capacity)
        .map(|entry| {
            let color = match entry.severity {
                Severity::Info => Color::Gray,
                Severity::Success => Color::Green,
                Severity::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(color)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
