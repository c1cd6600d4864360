use crate::app::{App, Screen};
use crate::message::Message;
use crossterm::event::{KeyCode, KeyModifiers};

/// Converts keyboard input to Message based on current screen/state
pub fn key_to_message(app: &App, key: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
    if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    match app.screen {
        Screen::Browser => browser_key_to_message(key),
        Screen::Confirm => confirm_key_to_message(key),
        Screen::BucketSelect => bucket_select_key_to_message(key),
        Screen::Help => Some(Message::GoBack),
    }
}

fn browser_key_to_message(key: KeyCode) -> Option<Message> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ShowHelp),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),
        KeyCode::PageUp => Some(Message::NavigatePageUp),
        KeyCode::PageDown => Some(Message::NavigatePageDown),
        KeyCode::Home => Some(Message::NavigateHome),
        KeyCode::End => Some(Message::NavigateEnd),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::ToggleNode),
        KeyCode::Right => Some(Message::ExpandNode),
        KeyCode::Left => Some(Message::CollapseNode),
        KeyCode::Tab => Some(Message::SwitchPanel),
        KeyCode::Char('r') => Some(Message::Reload),
        KeyCode::Char('u') => Some(Message::Upload),
        // crossterm reports Shift+d as an uppercase char
        KeyCode::Char('D') => Some(Message::Delete),
        KeyCode::Char('d') => Some(Message::Download),
        KeyCode::Char('b') => Some(Message::ShowBucketSelect),
        _ => None,
    }
}

fn confirm_key_to_message(key: KeyCode) -> Option<Message> {
    match key {
        KeyCode::Left => Some(Message::ConfirmLeft),
        KeyCode::Right => Some(Message::ConfirmRight),
        KeyCode::Tab => Some(Message::ConfirmToggle),
        KeyCode::Enter => Some(Message::ConfirmCommit),
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(Message::ConfirmYes),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
            Some(Message::ConfirmCancel)
        }
        _ => None,
    }
}

fn bucket_select_key_to_message(key: KeyCode) -> Option<Message> {
    match key {
        KeyCode::Up => Some(Message::BucketSelectUp),
        KeyCode::Down => Some(Message::BucketSelectDown),
        KeyCode::Enter => Some(Message::BucketSelectCommit),
        KeyCode::Esc | KeyCode::Char('q') => Some(Message::GoBack),
        _ => None,
    }
}
