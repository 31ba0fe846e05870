mod app;
mod domain;
mod error;
mod input;
mod logging;
mod persistence;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{
    format_deadline, project, SortKey, StatusFilter, Task, TaskStatus, TaskStore, ViewParams,
    DEADLINE_FORMAT,
};
use persistence::{
    ensure_todos_dir, export_to_file, import_from_file, init_local_todos, load_metadata, log_file,
    meta_file, AppMetadata, FileStore, KeyValueStore, MemoryStore, EXPORT_FILE_NAME,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// How long the event loop waits for input before re-checking the date
const TICK: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "todos")]
#[command(about = "A single-user terminal task tracker with today and all-time views", long_about = None)]
struct Cli {
    /// Keep tasks in memory only; nothing is written to the data directory
    /// (the TUI log goes to the system temp dir)
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .todos directory in the current directory
    Init,
    /// Add a pending task
    Add {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Deadline (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_date)]
        deadline: Option<NaiveDate>,
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// List tasks
    List {
        /// Only tasks due today
        #[arg(long)]
        today: bool,
        /// Case-insensitive text matched against name and description
        #[arg(short, long, default_value = "")]
        search: String,
        /// all, pending, "in progress", done or cancelled
        #[arg(long, default_value = "all", value_parser = parse_status_filter)]
        status: StatusFilter,
        /// created or deadline; omit to keep stored order
        #[arg(long, value_parser = parse_sort_key)]
        sort: Option<SortKey>,
    },
    /// Flip a task between done and in progress
    Toggle { id: String },
    /// Delete a task
    Delete { id: String },
    /// Write every task to a JSON file
    Export {
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },
    /// Replace every task with the contents of a JSON file
    Import { file: PathBuf },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DEADLINE_FORMAT)
        .map_err(|e| format!("invalid date '{}', use YYYY-MM-DD: {}", value, e))
}

fn parse_status_filter(value: &str) -> Result<StatusFilter, String> {
    StatusFilter::from_label(value).ok_or_else(|| format!("unknown status '{}'", value))
}

fn parse_sort_key(value: &str) -> Result<SortKey, String> {
    SortKey::from_label(value).ok_or_else(|| format!("unknown sort key '{}'", value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let todos_dir = init_local_todos()?;
            println!("Initialized todos directory: {}", todos_dir.display());
            println!();
            println!("Todos will now use this local directory for task storage.");
            println!("Run 'todos' to start tracking tasks.");
            Ok(())
        }
        Some(command) => {
            logging::init_stderr_logging()?;
            let mut storage = open_storage(cli.ephemeral)?;
            let mut store = TaskStore::load(storage.as_mut())?;
            run_command(command, &mut store)?;
            if store.needs_save() {
                store.save(storage.as_mut())?;
            }
            Ok(())
        }
        None => run_tui(cli.ephemeral),
    }
}

fn open_storage(ephemeral: bool) -> Result<Box<dyn KeyValueStore>> {
    if ephemeral {
        return Ok(Box::new(MemoryStore::new()));
    }
    Ok(Box::new(FileStore::new(ensure_todos_dir()?)))
}

fn run_command(command: Commands, store: &mut TaskStore) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    match command {
        Commands::Add {
            name,
            description,
            deadline,
            note,
        } => {
            let mut task = Task::new(name, description, deadline.unwrap_or(today));
            task.note = note;
            println!("{}", task.id);
            store.add(task);
        }
        Commands::List {
            today: today_only,
            search,
            status,
            sort,
        } => {
            let params = ViewParams {
                search,
                status,
                today_only,
                sort,
            };
            if store.is_empty() {
                println!("No tasks yet. Add one with 'todos add <name>'.");
            }
            for task in project(store.tasks(), &params, today) {
                print_task(&task);
            }
        }
        Commands::Toggle { id } => {
            let task = store
                .get(&id)
                .with_context(|| format!("no task with id '{}'", id))?;
            if matches!(task.status, TaskStatus::Pending | TaskStatus::Cancelled) {
                println!(
                    "'{}' is {}; toggle only flips done and in progress",
                    task.name,
                    task.status.label()
                );
            }
            store.toggle_status(&id);
        }
        Commands::Delete { id } => {
            if store.get(&id).is_none() {
                anyhow::bail!("no task with id '{}'", id);
            }
            store.delete(&id);
        }
        Commands::Export { output } => {
            export_to_file(store.tasks(), &output)?;
            println!("Exported {} tasks to {}", store.len(), output.display());
        }
        Commands::Import { file } => {
            let tasks = import_from_file(&file)?;
            println!("Imported {} tasks (replaced {})", tasks.len(), store.len());
            store.replace_all(tasks);
        }
        Commands::Init => {}
    }
    Ok(())
}

fn print_task(task: &Task) {
    println!(
        "{}  {:<11}  {}  {}",
        task.id,
        task.status.label(),
        format_deadline(task),
        task.name
    );
}

fn run_tui(ephemeral: bool) -> Result<()> {
    logging::init_file_logging(&log_file(ephemeral)?)?;

    let mut storage = open_storage(ephemeral)?;
    let store = TaskStore::load(storage.as_mut())?;
    let metadata = if ephemeral {
        AppMetadata::default()
    } else {
        load_saved_metadata()?
    };

    let mut app = AppState::new(store, storage, metadata);
    info!(ephemeral, "session started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = app.save() {
        eprintln!("Error saving tasks: {}", e);
    }
    if !ephemeral {
        if let Err(e) = app.save_metadata(meta_file()?) {
            eprintln!("Error saving view settings: {}", e);
        }
    }
    info!("session ended");

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn load_saved_metadata() -> Result<AppMetadata> {
    let todos_dir = ensure_todos_dir()?;
    eprintln!("Using todos directory: {}", todos_dir.display());

    match load_metadata(meta_file()?) {
        Ok(metadata) => Ok(metadata),
        Err(e) => {
            warn!(error = %e, "ignoring unreadable metadata");
            Ok(AppMetadata::default())
        }
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.refresh_today();

        // One write per handled event
        if app.needs_save() {
            app.save()?;
        }
    }
}
