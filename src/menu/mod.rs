use crate::app::{App, Focus, Screen};

/// A footer entry: the key to press and what it does
pub struct MenuItem {
    pub key: &'static str,
    pub label: &'static str,
}

impl MenuItem {
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Key hints for the current screen and focused pane
pub fn get_menu_items(app: &App) -> Vec<MenuItem> {
    match app.screen {
        Screen::Browser => {
            let mut items = vec![
                MenuItem::new("?", "Help"),
                MenuItem::new("Tab", "Switch"),
                MenuItem::new("r", "Reload"),
            ];
            if app.bucket.is_some() {
                items.push(MenuItem::new("u", "Upload"));
                items.push(MenuItem::new("d", "Download"));
            }
            if app.focus == Focus::Local || app.bucket.is_some() {
                items.push(MenuItem::new("D", "Delete"));
            }
            items.push(MenuItem::new("b", "Bucket"));
            items.push(MenuItem::new("q", "Quit"));
            items
        }
        Screen::Confirm => vec![
            MenuItem::new("y", "Yes"),
            MenuItem::new("n", "No"),
            MenuItem::new("Tab", "Toggle"),
            MenuItem::new("Enter", "Confirm"),
        ],
        Screen::BucketSelect => vec![
            MenuItem::new("Enter", "Open"),
            MenuItem::new("Esc", "Close"),
        ],
        Screen::Help => vec![MenuItem::new("Esc", "Close")],
    }
}
