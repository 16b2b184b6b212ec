mod actions;
pub mod app;
pub mod controls;
pub mod detail;
mod input;
pub mod roster;
mod view;

pub use actions::dispatch;
pub use input::{map_key, InputAction};

use anyhow::{Context, Result};
use app::{App, Screen};
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use detail::DetailView;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use roborally_client::{init_tracing, ApiClient, ClientConfig, HttpTransport, Transport};
use roster::RosterView;
use std::io::{self, stdout, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub host: Option<String>,
    /// Player to show; without one the board roster is shown.
    pub player: Option<String>,
    pub log_path: Option<PathBuf>,
}

impl LaunchOptions {
    pub fn config(&self) -> ClientConfig {
        match &self.host {
            Some(host) => ClientConfig::from_host(Some(host.clone())),
            None => ClientConfig::from_env(),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("roborally-cui.log"))
    }
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let log_path = options.log_path();
    init_tracing(&log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    let config = options.config();
    tracing::info!(host = %config.host, player = ?options.player, "starting");
    ensure_interactive_terminal()?;

    let api = ApiClient::new(HttpTransport::new(config.api_base()));
    let screen = match options.player.as_deref() {
        Some(id) => Screen::Detail(DetailView::mount(api, config.assets(), id)),
        None => Screen::Roster(RosterView::mount(api, config.assets())),
    };
    let mut app = App::new(screen);

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    tracing::info!("stopped");
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

pub fn parse_options(args: &[String]) -> LaunchOptions {
    let mut options = LaunchOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--host" | "-H" => {
                if let Some(value) = args.get(idx + 1) {
                    options.host = Some(value.clone());
                    idx += 1;
                }
            }
            "--player" | "-p" => {
                if let Some(value) = args.get(idx + 1) {
                    options.player = Some(value.clone());
                    idx += 1;
                }
            }
            "--log" => {
                if let Some(value) = args.get(idx + 1) {
                    options.log_path = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn run_loop<T: Transport>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<T>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(120);
    while !app.should_quit {
        terminal.draw(|frame| view::draw(frame, app))?;
        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = input::map_key(key);
                actions::dispatch(app, action);
            }
        }
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "roborally-cui requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}
