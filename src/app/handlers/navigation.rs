use crate::app::{App, Focus};
use crate::models::tree::TreeModel;

#[derive(Debug, Clone, Copy)]
enum CursorMove {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

fn apply<T>(tree: &mut TreeModel<T>, movement: CursorMove) {
    match movement {
        CursorMove::Up => tree.move_up(),
        CursorMove::Down => tree.move_down(),
        CursorMove::PageUp => tree.page_up(),
        CursorMove::PageDown => tree.page_down(),
        CursorMove::Home => tree.home(),
        CursorMove::End => tree.end(),
    }
    update_scroll_offset(tree);
}

fn move_cursor(app: &mut App, movement: CursorMove) {
    match app.focus {
        Focus::Local => apply(&mut app.local_tree, movement),
        Focus::Remote => {
            if let Some(tree) = app.remote_tree.as_mut() {
                apply(tree, movement);
            }
        }
    }
}

pub fn navigate_up(app: &mut App) {
    move_cursor(app, CursorMove::Up);
}

pub fn navigate_down(app: &mut App) {
    move_cursor(app, CursorMove::Down);
}

pub fn navigate_page_up(app: &mut App) {
    move_cursor(app, CursorMove::PageUp);
}

pub fn navigate_page_down(app: &mut App) {
    move_cursor(app, CursorMove::PageDown);
}

pub fn navigate_home(app: &mut App) {
    move_cursor(app, CursorMove::Home);
}

pub fn navigate_end(app: &mut App) {
    move_cursor(app, CursorMove::End);
}

/// Keeps the cursor row inside the last rendered window.
pub fn update_scroll_offset<T>(tree: &mut TreeModel<T>) {
    let cursor = tree.cursor();
    let height = tree.visible_height.max(1);
    if cursor < tree.scroll_offset {
        tree.scroll_offset = cursor;
    } else if cursor >= tree.scroll_offset + height {
        tree.scroll_offset = cursor.saturating_sub(height - 1);
    }
}
