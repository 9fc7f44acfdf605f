#![allow(dead_code)]

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse_core::{default_token_path, PulseConfig};

mod app;
mod data;
mod theme;
mod ui;

use app::App;

#[derive(Parser)]
#[command(name = "pulse", version, about = "Terminal client for PulseAI chat and analysis")]
struct Cli {
    /// Backend base URL (overrides config and PULSE_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Theme to start with
    #[arg(long)]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PulseConfig::load().map_err(|e| anyhow::anyhow!("{e}"))?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(theme) = cli.theme {
        config.tui.theme = theme;
    }

    setup_logging(&config);

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, config);
    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Application error: {e}");
        return Err(e);
    }

    Ok(())
}

fn setup_logging(config: &PulseConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(config.log_level()))
        .unwrap_or_else(|_| "pulse_core=info,pulse_tui=info".into());

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: PulseConfig) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let token_path = default_token_path().unwrap_or_else(|| PathBuf::from(".pulse-token"));
        let mut app = App::new(config, token_path)?;
        app.run(terminal).await
    })
}
