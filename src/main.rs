use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod actions;
mod app;
mod catalog;
mod classify;
mod nav;
mod search;
mod ui;
mod widgets;

use app::App;
use catalog::Catalog;
use search::SearchOptions;

/// Searchable cheatsheet of Drupal, Drush and GovCMS commands
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Start with this search query
    #[arg(short, long)]
    query: Option<String>,

    /// Also match the query against the command text
    #[arg(long)]
    search_command: bool,

    /// Print matching entries as tab-separated lines and exit
    #[arg(long)]
    list: bool,

    /// Write diagnostic logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            match_command: self.search_command,
        }
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path, args.log_level())?;
    }

    let catalog = Catalog::global().clone();
    tracing::info!(
        version = catalog.version(),
        entries = catalog.len(),
        "starting cheatsheet"
    );

    let query = args.query.clone().unwrap_or_default();

    if args.list {
        for line in list_lines(&catalog, &query, args.search_options()) {
            println!("{line}");
        }
        return Ok(());
    }

    // Enable mouse capture before initializing the terminal
    crossterm::execute!(std::io::stderr(), crossterm::event::EnableMouseCapture)?;

    let mut terminal = ratatui::init();
    let mut app = App::new(catalog, args.search_options()).with_query(&query);
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal and disable mouse capture
    ratatui::restore();
    crossterm::execute!(std::io::stderr(), crossterm::event::DisableMouseCapture)?;

    match result {
        Ok(Some(command)) => {
            println!("{command}");
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Send tracing output to `path`. The TUI owns the terminal, so logs never
/// go to stderr.
fn init_logging(path: &Path, level: Level) -> color_eyre::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            color_eyre::eyre::eyre!("Failed to open log file '{}': {}", path.display(), e)
        })?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// One `category<TAB>title<TAB>command` line per matching entry.
fn list_lines(catalog: &Catalog, query: &str, options: SearchOptions) -> Vec<String> {
    search::filter(catalog.get_all(), query, options)
        .into_iter()
        .map(|entry| format!("{}\t{}\t{}", entry.category, entry.title, entry.command))
        .collect()
}

fn run_event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> color_eyre::Result<Option<String>> {
    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Global quit shortcut
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    return Ok(None);
                }

                match app.handle_key(key) {
                    app::Action::None => {}
                    app::Action::Quit => return Ok(None),
                    app::Action::Accept => {
                        if let Some(command) = app.accepted_command() {
                            return Ok(Some(command.to_string()));
                        }
                    }
                }
            }
            Event::Mouse(mouse) => {
                if app.handle_mouse(mouse) == app::Action::Quit {
                    return Ok(None);
                }
            }
            Event::Resize(_, _) => {
                // Terminal will be redrawn on next loop iteration
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["drush-cheatsheet"]).unwrap();
        assert_eq!(args.query, None);
        assert!(!args.list);
        assert_eq!(args.search_options(), SearchOptions::default());
        assert_eq!(args.log_level(), Level::INFO);
    }

    #[test]
    fn test_args_flags() {
        let args = Args::try_parse_from([
            "drush-cheatsheet",
            "-q",
            "cache",
            "--search-command",
            "--list",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.query.as_deref(), Some("cache"));
        assert!(args.search_options().match_command);
        assert!(args.list);
        assert_eq!(args.log_level(), Level::TRACE);
    }

    #[test]
    fn test_list_lines() {
        let catalog = Catalog::builtin();
        let lines = list_lines(&catalog, "clear", SearchOptions::default());
        assert_eq!(
            lines,
            vec![
                "Drush\tClear Cache\tdrush cache:rebuild;".to_string(),
                "Other\tClear Cache (using composer drush)\tvendor/bin/drush cache:rebuild;"
                    .to_string(),
            ]
        );
        assert!(list_lines(&catalog, "zzz-no-match", SearchOptions::default()).is_empty());
        assert_eq!(
            list_lines(&catalog, "", SearchOptions::default()).len(),
            catalog.len()
        );
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
