use chrono::Utc;
use std::io::Write;
use swingsfab_client::{init_tracing, render, App, AppConfig, AppState, Command, Output};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env()?;
    let state = AppState::new(config);
    info!(build_id = %state.build_id(), demo_user = %state.config().demo_user, "starting Swingsfab");

    let mut app = App::new(state);
    println!("Swingsfab ({}). Type 'help' for commands.", app.state().build_id());

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        prompt(&app)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let result = match line.parse::<Command>() {
            Ok(command) => app.execute(command).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(output) => {
                if app.json_output() {
                    println!("{}", render::json(&output)?);
                } else {
                    println!("{}", render::text(&output, Utc::now()));
                }
                if output == Output::Quit {
                    break;
                }
            }
            Err(err) => {
                debug!(%err, "command failed");
                eprintln!("error: {err}");
            }
        }
    }

    if let Some(session) = app.logout() {
        info!(%session, "session closed on exit");
    }
    Ok(())
}

fn prompt(app: &App) -> std::io::Result<()> {
    let label = match app.session() {
        Some(session) => session.screen().to_string(),
        None => "auth".to_string(),
    };
    let mut stdout = std::io::stdout();
    write!(stdout, "{label}> ")?;
    stdout.flush()
}
