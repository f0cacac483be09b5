//! Beneath the City of Lanterns
//!
//! Main entry point for the game.

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use lantern_assets::{LoadedMap, load_builtin, load_file};
use lantern_core::{GameRng, Session};
use lantern_save::{default_save_path, load_game, save_exists};
use lantern_tui::{App, Theme};

/// First-person crawl beneath the city of lanterns
#[derive(Parser, Debug)]
#[command(name = "lanterns")]
#[command(author, version, about = "Beneath the City of Lanterns", long_about = None)]
struct Args {
    /// RNG seed (random if omitted)
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Map document to load instead of the built-in sewers
    #[arg(long = "map")]
    map: Option<String>,

    /// Ignore any existing save and start fresh
    #[arg(long = "new")]
    new: bool,

    /// Light terminal background palette
    #[arg(long = "light")]
    light: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let theme = Theme::detect(args.light);

    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };

    let map = load_map(&args).map_err(io::Error::other)?;
    let save_path = default_save_path();

    // Resume from the save slot unless told otherwise. A save made on a
    // different map resolves its own map id for meta and start pose.
    let session = if !args.new && save_exists(&save_path) {
        match load_game(&save_path) {
            Ok(snapshot) => {
                let resolved = if snapshot.map_id == map.meta.id {
                    map
                } else {
                    load_builtin(&snapshot.map_id).map_err(io::Error::other)?
                };
                Session::restore(snapshot, resolved.meta, resolved.start, rng)
            }
            Err(_) => Session::new(map.meta, map.grid, map.start, rng),
        }
    } else {
        Session::new(map.meta, map.grid, map.start, rng)
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, theme, save_path);

    // Main loop: draw, then wait up to one tick for input. The poll
    // timeout also drives the wipe-recovery timer.
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        }
        app.on_tick();

        if app.should_quit() {
            return Ok(());
        }
    }
}

fn load_map(args: &Args) -> Result<LoadedMap, lantern_assets::MapError> {
    match &args.map {
        Some(path) => load_file(path),
        None => load_builtin("map_sewers"),
    }
}
