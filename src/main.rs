// dsviz: terminal visualizer for sorting algorithms and basic data structures

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use dsviz::config::{Command, Settings, USAGE};
use dsviz::engine::RunController;
use dsviz::logging::init_tracing;
use dsviz::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = match Settings::from_args(std::env::args().skip(1)) {
        Ok(Command::Run(settings)) => settings,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    // Held until exit so buffered log lines are flushed
    let _log_guard = match init_tracing(settings.log_file.as_deref(), &settings.log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to set up logging: {}", e);
            std::process::exit(1);
        }
    };

    info!(?settings, "starting");

    let mut controller = RunController::new(
        Vec::new(),
        settings.step_delay(),
        settings.max_value,
        settings.seed,
    );
    controller.generate_random(settings.value_count)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(controller, &settings);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(%err, "ui loop failed");
        eprintln!("Error: {:?}", err);
    }

    info!("exiting");
    Ok(())
}
