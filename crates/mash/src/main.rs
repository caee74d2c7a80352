//! mash - A customizable command launcher
//!
//! Pick a command from a catalog and run it. Nothing more.

mod app;
mod cli;
mod style;
mod tree_view;
mod ui;

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mash_core::{dispatch::dispatch, tree, ConfigResolver, Mode};
use ratatui::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use app::App;
use cli::Args;
use style::Styles;

fn main() {
    // Initialize logging; stdout belongs to the TUI and the tree
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MASH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = cli::exit_code(&err);
            let _ = err.print();
            std::process::exit(code);
        }
    };

    match run(&args) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

/// Load, filter, then either print the tree or run the picker.
/// Returns the exit code.
fn run(args: &Args) -> Result<i32> {
    let resolved = ConfigResolver::from_env()?.resolve(args.global)?;
    debug!(
        source = %resolved.source.display(),
        legacy = resolved.legacy,
        items = resolved.catalog.items.len(),
        "catalog loaded"
    );

    let catalog = &resolved.catalog;
    let spec = args.filter_spec();
    let styles = Styles::from_catalog(catalog);

    if args.tree {
        let root = tree::build(catalog, &spec);
        let stdout = io::stdout();
        let ansi = stdout.is_terminal();
        tree_view::print(&mut stdout.lock(), &root, &styles, ansi)?;
        return Ok(0);
    }

    let show_intro = !(args.skip_intro || catalog.skip_intro);
    let mut app = App::new(spec.visible(catalog), styles, show_intro)?;

    let mode = run_interactive(&mut app)?;
    match (mode, app.controller.confirmed_command()) {
        (Mode::Confirmed, Some(command)) => {
            let index = app.selected_entry().map(|entry| entry.key);
            info!(command, ?index, "launching");
            Ok(dispatch(command)?)
        }
        _ => Ok(0),
    }
}

/// Own the terminal for the picker and hand it back in every case
fn run_interactive(app: &mut App) -> mash_core::Result<Mode> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode()?;
        return Err(err.into());
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(err) => {
            restore(&mut io::stdout())?;
            return Err(err.into());
        }
    };

    let result = run_app(&mut terminal, app);

    restore(terminal.backend_mut())?;
    terminal.show_cursor()?;

    result
}

fn restore<W: io::Write>(out: &mut W) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> mash_core::Result<Mode> {
    app.on_resize(terminal.size()?.height);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let mode = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
            Event::Resize(_, height) => app.on_resize(height),
            _ => app.controller.mode(),
        };

        if mode.is_finished() {
            return Ok(mode);
        }
    }
}
