pub mod app;
pub mod cli;
pub mod handlers;
pub mod menu;
pub mod message;
pub mod models;
pub mod operations;
pub mod ui;

pub use app::App;
pub use cli::Cli;
pub use models::config::Settings;
pub use operations::run_app;
