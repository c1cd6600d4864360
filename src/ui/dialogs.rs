use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::helpers::centered_rect;
use crate::app::App;
use crate::operations::jobs::PendingAction;

pub fn draw_confirmation(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 30, f.area());
    let destructive = matches!(
        app.confirm.pending,
        Some(PendingAction::DeleteLocal { .. } | PendingAction::DeleteRemote { .. })
    );

    let block = Block::default()
        .title(if destructive {
            "Delete Confirmation"
        } else {
            "Confirmation"
        })
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if destructive {
            Color::Red
        } else {
            Color::Yellow
        }));

    f.render_widget(Clear, area);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let question = Paragraph::new(app.confirm.prompt.as_str())
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(question, chunks[0]);

    let buttons = if app.confirm.yes_selected {
        Paragraph::new("[ YES ]  No").style(
            Style::default()
                .fg(if destructive { Color::Red } else { Color::Green })
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Paragraph::new("Yes  [ NO ]").style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    };
    f.render_widget(buttons.alignment(Alignment::Center), chunks[1]);

    let help = Paragraph::new("←: Yes | →: No | Tab: Toggle | Enter: Confirm | y/n | Esc: Cancel")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}

pub fn draw_bucket_select(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 60, f.area());

    let block = Block::default()
        .title("Select Bucket (Enter: open | Esc: close)")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    f.render_widget(Clear, area);

    if app.bucket_select.buckets.is_empty() {
        let empty = Paragraph::new("No buckets available")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    let selected = app.bucket_select.selected;
    let offset = selected.saturating_sub(visible_height.saturating_sub(1));

    let items: Vec<ListItem> = app
        .bucket_select
        .buckets
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_height)
        .map(|(i, name)| {
            let style = if i == selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("🪣 {name}")).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

pub fn draw_help(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 80, f.area());

    let help_text = [
        "Navigation:",
        "  ↑/↓, PgUp/PgDn   - Move in the focused tree",
        "  Home/End         - Jump to first/last row",
        "  Enter/Space      - Expand or collapse folder",
        "  →/←              - Expand / collapse (or go to parent)",
        "  Tab              - Switch between local and S3 tree",
        "",
        "Actions:",
        "  u                - Upload selected local path to selected S3 folder",
        "  d                - Download selected S3 object to selected local folder",
        "  D                - Delete selected node in the focused tree",
        "  r                - Reload selected folder",
        "  b                - Select bucket",
        "",
        "General:",
        "  ?                - Show this help",
        "  q/Esc/Ctrl+C     - Quit application / Close dialog",
    ];

    let help = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} - Help", app.app_title))
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
