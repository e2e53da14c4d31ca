pub mod account;
pub mod app;
pub mod auth;
pub mod chat;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod location;
pub mod profile_form;
pub mod render;
pub mod session;
pub mod state;

pub use app::{App, Output};
pub use command::Command;
pub use config::AppConfig;
pub use error::{ClientError, Result};
pub use session::{Screen, Session, SessionId};
pub use state::AppState;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so they never interleave with command output.
pub fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
