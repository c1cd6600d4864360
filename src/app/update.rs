use super::{actions, handlers, navigation};
use super::App;
use crate::message::Message;
use anyhow::Result;

/// Central update function following The Elm Architecture (TEA)
/// Takes current app state and a message, applies the change, and optionally returns another message
pub async fn update(app: &mut App, msg: Message) -> Result<Option<Message>> {
    match msg {
        // ===== Application Control =====
        Message::Quit => {
            app.should_quit = true;
            Ok(None)
        }
        Message::NoOp => Ok(None),
        Message::Start => {
            match app.bucket.clone() {
                Some(bucket) => navigation::open_bucket(app, bucket).await,
                None => navigation::show_bucket_select(app).await,
            }
            Ok(None)
        }

        // ===== Navigation =====
        Message::NavigateUp => {
            handlers::navigate_up(app);
            Ok(None)
        }
        Message::NavigateDown => {
            handlers::navigate_down(app);
            Ok(None)
        }
        Message::NavigatePageUp => {
            handlers::navigate_page_up(app);
            Ok(None)
        }
        Message::NavigatePageDown => {
            handlers::navigate_page_down(app);
            Ok(None)
        }
        Message::NavigateHome => {
            handlers::navigate_home(app);
            Ok(None)
        }
        Message::NavigateEnd => {
            handlers::navigate_end(app);
            Ok(None)
        }
        Message::ToggleNode => {
            navigation::toggle_selected(app).await;
            Ok(None)
        }
        Message::ExpandNode => {
            navigation::expand_selected(app).await;
            Ok(None)
        }
        Message::CollapseNode => {
            navigation::collapse_selected(app);
            Ok(None)
        }
        Message::SwitchPanel => {
            app.switch_focus();
            Ok(None)
        }
        Message::Reload => {
            navigation::reload_selected(app).await;
            Ok(None)
        }
        Message::GoBack => {
            app.go_back();
            Ok(None)
        }

        // ===== UI State Changes =====
        Message::ShowHelp => {
            handlers::show_help(app);
            Ok(None)
        }
        Message::ShowBucketSelect => {
            navigation::show_bucket_select(app).await;
            Ok(None)
        }

        // ===== File Operations =====
        Message::Upload => {
            actions::upload(app);
            Ok(None)
        }
        Message::Download => {
            actions::download(app);
            Ok(None)
        }
        Message::Delete => {
            actions::delete(app);
            Ok(None)
        }

        // ===== Confirmation =====
        Message::ConfirmLeft => {
            handlers::confirm_select_yes(app);
            Ok(None)
        }
        Message::ConfirmRight => {
            handlers::confirm_select_no(app);
            Ok(None)
        }
        Message::ConfirmToggle => {
            handlers::confirm_toggle(app);
            Ok(None)
        }
        Message::ConfirmYes => {
            handlers::confirm_select_yes(app);
            Ok(Some(Message::ConfirmCommit))
        }
        Message::ConfirmCommit => {
            actions::commit_confirm(app);
            Ok(None)
        }
        Message::ConfirmCancel => {
            actions::cancel_confirm(app);
            Ok(None)
        }

        // ===== Bucket Select =====
        Message::BucketSelectUp => {
            handlers::bucket_select_up(app);
            Ok(None)
        }
        Message::BucketSelectDown => {
            handlers::bucket_select_down(app);
            Ok(None)
        }
        Message::BucketSelectCommit => {
            navigation::commit_bucket_select(app).await;
            Ok(None)
        }
    }
}
