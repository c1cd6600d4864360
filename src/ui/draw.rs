use super::dialogs::{draw_bucket_select, draw_confirmation, draw_help};
use super::panels::{draw_local_panel, draw_remote_panel};
use super::widgets::draw_status_log;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::menu::get_menu_items;

const STATUS_HEIGHT: u16 = 7;

pub fn draw(f: &mut Frame, app: &mut App) {
    // The trees stay visible behind every dialog
    draw_browser(f, app);

    match app.screen {
        Screen::Browser => {}
        Screen::Confirm => draw_confirmation(f, app),
        Screen::BucketSelect => draw_bucket_select(f, app),
        Screen::Help => draw_help(f, app),
    }
}

fn draw_browser(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new(app.app_title.as_str())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let panel_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    draw_local_panel(f, panel_chunks[0], app);
    draw_remote_panel(f, panel_chunks[1], app);
    draw_status_log(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let menu_items = get_menu_items(app);
    let item_width = (area.width as usize) / menu_items.len().max(1);

    let mut spans = Vec::new();
    for item in &menu_items {
        let key = format!("{} ", item.key);
        // Key: white text on black background
        spans.push(Span::styled(
            key.clone(),
            Style::default().fg(Color::White).bg(Color::Black),
        ));
        // Label: black text on cyan background, padded to equal width
        spans.push(Span::styled(
            item.label,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        let remaining = item_width.saturating_sub(key.len() + item.label.len());
        if remaining > 0 {
            spans.push(Span::styled(
                " ".repeat(remaining),
                Style::default().bg(Color::Cyan),
            ));
        }
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    f.render_widget(footer, area);
}
