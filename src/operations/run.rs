use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::Terminal;
use std::time::{Duration, Instant};

use crate::app::{self, actions, App};
use crate::handlers::key_to_message;
use crate::message::Message;
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(25);
const RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// Processes a message and the messages it cascades into
pub async fn dispatch(app: &mut App, msg: Message) -> Result<()> {
    let mut current_msg = Some(msg);
    while let Some(message) = current_msg {
        current_msg = app::update(app, message).await?;
    }
    Ok(())
}

/// Main application loop following The Elm Architecture (TEA)
pub async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut last_render: Option<Instant> = None;
    let mut needs_render = true;

    dispatch(app, Message::Start).await?;

    loop {
        if process_background_jobs(app).await? {
            needs_render = true;
        }

        // Render only when needed and throttled
        let now = Instant::now();
        let due = last_render.is_none_or(|last| now.duration_since(last) >= RENDER_INTERVAL);
        if needs_render && due {
            terminal.draw(|f| ui::draw(f, app))?;
            last_render = Some(now);
            needs_render = false;
        }

        if app.should_quit {
            break;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => {
                    // Ignore key release events (Windows sends both press and release)
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    if let Some(msg) = key_to_message(app, key.code, key.modifiers) {
                        tracing::debug!(?msg, "key message");
                        dispatch(app, msg).await?;
                        needs_render = true;
                    }
                }
                Event::Resize(_, _) => {
                    needs_render = true;
                }
                _ => {}
            }
        }
    }

    if !app.jobs.is_empty() {
        tracing::warn!(running = app.jobs.len(), "quitting with unfinished jobs");
    }

    Ok(())
}

/// Collects finished background jobs, logs their outcome and reloads what they touched.
/// Returns true when something changed on screen.
pub async fn process_background_jobs(app: &mut App) -> Result<bool> {
    let mut needs_render = false;
    let mut index = 0;

    while index < app.jobs.len() {
        if !app.jobs[index].handle.is_finished() {
            index += 1;
            continue;
        }

        let job = app.jobs.remove(index);
        match job.handle.await {
            Ok(outcome) => {
                tracing::info!(job = %job.description, severity = ?outcome.severity, "job finished");
                actions::finish_job(app, outcome).await;
            }
            Err(e) => app
                .status
                .error(format!("{} did not finish: {e}", job.description)),
        }
        needs_render = true;
    }

    Ok(needs_render)
}
