mod dialogs;
mod draw;
mod helpers;
mod panels;
mod widgets;

pub use draw::draw;
pub use helpers::{centered_rect, format_size, truncate_string};
