use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::helpers::{format_modified, format_size, truncate_string};
use crate::app::handlers::update_scroll_offset;
use crate::app::{App, Focus};
use crate::models::tree::{TreeModel, TreeNode};

const NAME_WIDTH: usize = 40;

fn folder_icon<T>(node: &TreeNode<T>) -> &'static str {
    if node.expanded {
        "📂"
    } else {
        "📁"
    }
}

/// Columns a row can show after the name
struct RowInfo {
    icon: &'static str,
    size: String,
    modified: String,
    is_dir: bool,
}

impl RowInfo {
    fn folder<T>(node: &TreeNode<T>) -> Self {
        Self {
            icon: folder_icon(node),
            size: "<DIR>".to_string(),
            modified: String::new(),
            is_dir: true,
        }
    }
}

fn row_text(depth: usize, label: &str, info: &RowInfo) -> String {
    let name = format!("{}{} {label}", "  ".repeat(depth), info.icon);
    format!(
        "{:<width$} {:>10} {}",
        truncate_string(&name, NAME_WIDTH),
        info.size,
        info.modified,
        width = NAME_WIDTH
    )
}

/// Renders the visible rows of `tree` and records the height for paging.
fn draw_tree<T>(
    f: &mut Frame,
    area: Rect,
    tree: &mut TreeModel<T>,
    title: String,
    is_active: bool,
    describe: impl Fn(&TreeNode<T>, bool) -> RowInfo,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let visible_height = area.height.saturating_sub(2) as usize;
    tree.visible_height = visible_height.max(1);
    update_scroll_offset(tree);

    let items: Vec<ListItem> = tree
        .rows()
        .iter()
        .enumerate()
        .skip(tree.scroll_offset)
        .take(visible_height)
        .filter_map(|(i, row)| {
            let node = tree.node(&row.path)?;
            let info = describe(node, row.path.is_empty());
            let style = if i == tree.cursor() && is_active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if i == tree.cursor() {
                Style::default().add_modifier(Modifier::REVERSED)
            } else if info.is_dir {
                Style::default().fg(Color::Blue)
            } else {
                Style::default()
            };
            Some(ListItem::new(row_text(row.depth, &node.label, &info)).style(style))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
    f.render_widget(list, area);
}

pub fn draw_local_panel(f: &mut Frame, area: Rect, app: &mut App) {
    let is_active = app.focus == Focus::Local;
    let title = format!("Local: {}", app.local_root().display());

    draw_tree(f, area, &mut app.local_tree, title, is_active, |node, _| {
        if node.data.is_dir() {
            RowInfo::folder(node)
        } else {
            RowInfo {
                icon: "📄",
                size: format_size(node.data.size),
                modified: String::new(),
                is_dir: false,
            }
        }
    });
}

pub fn draw_remote_panel(f: &mut Frame, area: Rect, app: &mut App) {
    let is_active = app.focus == Focus::Remote;

    let Some(tree) = app.remote_tree.as_mut() else {
        let hint = Paragraph::new("No bucket selected. Press b to choose one.")
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("S3")
                    .border_style(Style::default().fg(Color::Gray)),
            );
        f.render_widget(hint, area);
        return;
    };

    let title = format!("S3: {}", app.bucket.as_deref().unwrap_or_default());
    draw_tree(f, area, tree, title, is_active, |node, is_root| {
        if is_root {
            RowInfo {
                icon: "🪣",
                size: String::new(),
                modified: String::new(),
                is_dir: true,
            }
        } else if node.data.is_dir() {
            RowInfo::folder(node)
        } else {
            RowInfo {
                icon: "📄",
                size: format_size(node.data.size.max(0) as u64),
                modified: format_modified(node.data.last_modified),
                is_dir: false,
            }
        }
    });
}
