mod app;
mod axis;
mod config;
mod inoculum;
mod series;
mod simulation;
mod timer;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::{App, Focus};
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use inoculum::Inoculum;
use log::{error, info};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "bacteria-growth")]
#[command(about = "Discrete bacterial growth simulation with a live population plot")]
struct Args {
    /// Cells per grid side (4-20)
    #[arg(short = 's', long)]
    size: Option<usize>,

    /// Milliseconds between ticks (100-10000)
    #[arg(short = 'i', long)]
    interval: Option<u64>,

    /// Initial colonies (none, center, corners, cross, scatter)
    #[arg(long)]
    inoculum: Option<String>,

    /// Start the simulation running instead of paused
    #[arg(long)]
    autostart: bool,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the effective settings to a JSON file and exit
    #[arg(long = "save-config")]
    save_config: Option<PathBuf>,

    /// Write logs to this file (level from RUST_LOG, default info)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// Route `log` output to a file; the terminal belongs to the UI
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// File settings first, then CLI overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => match AppConfig::default_path() {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                AppConfig::load_from_file(&path)?
            }
            _ => AppConfig::default(),
        },
    };

    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(interval) = args.interval {
        config.interval_ms = interval;
    }
    if let Some(name) = &args.inoculum {
        config.inoculum =
            Inoculum::parse(name).ok_or_else(|| anyhow!("Unknown inoculum pattern '{}'", name))?;
    }
    if args.autostart {
        config.autostart = true;
    }

    simulation::validate_config(config.size, config.interval_ms)?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = resolve_config(&args)?;

    if let Some(path) = &args.save_config {
        config.save_to_file(path)?;
        println!("Saved config to {}", path.display());
        return Ok(());
    }

    let mut app = App::new(&config)?;
    if config.autostart {
        app.pause_toggle(Instant::now());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Event loop failed: {:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Block for input only until the next tick is due
        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    // Rejected input is reported through app.status
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char(' ') => app.pause_toggle(Instant::now()),
                        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_grid(),
                        KeyCode::Char('n') | KeyCode::Char('N') => {
                            let _ = app.apply_pending();
                        }
                        KeyCode::Char('i') => {
                            let _ = app.cycle_inoculum(true);
                        }
                        KeyCode::Char('I') => {
                            let _ = app.cycle_inoculum(false);
                        }
                        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => app.toggle_help(),
                        KeyCode::Enter | KeyCode::Char('t') | KeyCode::Char('T') => {
                            if let Err(e) = app.toggle_cursor_cell() {
                                app.status = Some(e.to_string());
                            }
                        }
                        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_pending(1),
                        KeyCode::Char('-') | KeyCode::Char('_') => app.adjust_pending(-1),
                        KeyCode::Tab => app.next_focus(),
                        KeyCode::BackTab => app.prev_focus(),
                        KeyCode::Up => match app.focus {
                            Focus::Grid => app.move_cursor(-1, 0),
                            _ => app.adjust_pending(1),
                        },
                        KeyCode::Down => match app.focus {
                            Focus::Grid => app.move_cursor(1, 0),
                            _ => app.adjust_pending(-1),
                        },
                        KeyCode::Left if app.focus == Focus::Grid => app.move_cursor(0, -1),
                        KeyCode::Right if app.focus == Focus::Grid => app.move_cursor(0, 1),
                        KeyCode::Esc => {
                            if app.show_help {
                                app.toggle_help();
                            } else {
                                app.focus = Focus::Grid;
                            }
                        }
                        KeyCode::Char('j') | KeyCode::Char('J') => {
                            if app.show_help {
                                app.scroll_help_down(ui::HELP_CONTENT_LINES);
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') => {
                            if app.show_help {
                                app.scroll_help_up();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let size = terminal.size()?;
                    let frame_area = Rect::new(0, 0, size.width, size.height);
                    if let Some((row, col)) =
                        ui::cell_at(frame_area, app.simulation.size(), mouse.column, mouse.row)
                    {
                        app.cursor = (row, col);
                        if let Err(e) = app.toggle_cell(row, col) {
                            app.status = Some(e.to_string());
                        }
                    }
                }
                _ => {}
            }
        }

        // Run simulation tick
        app.tick(Instant::now());
    }
}
