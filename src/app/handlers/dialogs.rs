use crate::app::{App, Screen};

pub fn confirm_select_yes(app: &mut App) {
    app.confirm.yes_selected = true;
}

pub fn confirm_select_no(app: &mut App) {
    app.confirm.yes_selected = false;
}

pub fn confirm_toggle(app: &mut App) {
    app.confirm.yes_selected = !app.confirm.yes_selected;
}

pub fn bucket_select_up(app: &mut App) {
    app.bucket_select.move_up();
}

pub fn bucket_select_down(app: &mut App) {
    app.bucket_select.move_down();
}

pub fn show_help(app: &mut App) {
    app.show_screen(Screen::Help);
}
