mod app;
mod catalog;
mod config;
mod overlay;
mod route;
mod screen;
mod store;
mod ui;

use app::{App, InputMode, View};
use catalog::Catalog;
use clap::{Parser, Subcommand};
use config::ProfileConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use route::{Route, RouteIdentity};
use screen::ScreenEvent;
use std::io::Write;
use std::path::{Path, PathBuf};
use store::ArtworkStore;

/// TUI gallery browser for a museum artwork catalog stored in SQLite
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the SQLite catalog file
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Open on a named gallery
    #[arg(long, conflicts_with = "genre")]
    gallery: Option<String>,

    /// Open on a genre listing
    #[arg(long)]
    genre: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI browser (default)
    Run {
        /// Path to the SQLite catalog file
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Create (or reset) a catalog file with the built-in demo collection
    Seed {
        /// Catalog file to write
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Download a catalog export over HTTPS
    Fetch {
        /// Source URL of the catalog export
        url: String,
        /// Catalog file to write
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let start_route = initial_route(&cli);

    let command = match cli.command {
        Some(c) => c,
        None => Commands::Run {
            catalog: cli.catalog.clone(),
        },
    };

    match command {
        Commands::Seed { output } => {
            let catalog = Catalog::open(&output).await?;
            catalog.seed_demo().await?;
            eprintln!("Seeded demo collection into {}", output.display());
        }
        Commands::Fetch { url, output } => {
            eprintln!("Downloading catalog from {url}...");
            download_catalog(&url, &output).await?;
            eprintln!("Saved to {}", output.display());
        }
        Commands::Run { catalog } => {
            let catalog_path = match catalog {
                Some(p) => p,
                None => default_catalog_path()?,
            };
            if !catalog_path.exists() {
                if let Some(parent) = catalog_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                eprintln!(
                    "No catalog at {}. Seeding the demo collection...",
                    catalog_path.display()
                );
                let catalog = Catalog::open(&catalog_path).await?;
                catalog.seed_demo().await?;
            }

            let profile = load_profile();
            let catalog = Catalog::open(&catalog_path).await?;

            let mut store = ArtworkStore::spawn(catalog_path, profile);
            let mut app = App::new(catalog);
            app.init(start_route, &mut store);

            let mut terminal = ratatui::init();
            let size = terminal.size()?;
            app.update_grid(size.width, size.height);

            let result = run_app(&mut terminal, &mut app, &mut store).await;

            ratatui::restore();

            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn default_catalog_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dirs = directories::ProjectDirs::from("com", "gallery-explorer", "gallery-explorer")
        .ok_or("Could not determine home directory")?;
    Ok(dirs.data_dir().join("catalog.db"))
}

fn load_profile() -> ProfileConfig {
    match ProfileConfig::default_path().and_then(|p| ProfileConfig::load(&p)) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("Warning: falling back to the default profile: {e}");
            ProfileConfig::default()
        }
    }
}

fn initial_route(cli: &Cli) -> Route {
    if let Some(gallery) = &cli.gallery {
        Route::gallery(gallery.clone())
    } else if let Some(genre) = &cli.genre {
        Route::genre(genre.clone())
    } else {
        Route::profile()
    }
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    store: &mut ArtworkStore,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Forward fresh store snapshots; stale ones were already discarded.
        if let Some(info) = store.poll() {
            if info.has_error {
                app.status_msg = "Could not load this collection".to_string();
            } else if !info.is_loading {
                app.status_msg = format!("{} artworks loaded", info.art.len());
            }
            app.controller
                .handle(ScreenEvent::StoreUpdated(info), store);
            app.clamp_selection();
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 100ms timeout so store updates keep flowing
        if crossterm::event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, store, key).await?;
                }
                Event::Resize(width, height) => {
                    app.update_grid(width, height);
                }
                _ => {}
            }
        }
    }
}

async fn handle_key(
    app: &mut App,
    store: &mut ArtworkStore,
    key: KeyEvent,
) -> Result<(), Box<dyn std::error::Error>> {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return Ok(());
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    if app.input_mode == InputMode::Editing {
        handle_genre_input(app, store, key);
        return Ok(());
    }
    match app.view {
        View::Gallery => handle_gallery_key(app, store, key).await?,
        View::Detail => handle_detail_key(app, store, key),
    }

    Ok(())
}

fn handle_genre_input(app: &mut App, store: &mut ArtworkStore, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.submit_genre(store);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.genre_input.clear();
        }
        KeyCode::Backspace => {
            app.genre_input.pop();
        }
        KeyCode::Char(c) => {
            app.genre_input.push(c);
        }
        _ => {}
    }
}

async fn handle_gallery_key(
    app: &mut App,
    store: &mut ArtworkStore,
    key: KeyEvent,
) -> Result<(), Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('f') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('p') => {
            if app.controller.route().identity() != RouteIdentity::Profile {
                app.push_route(Route::profile(), store);
            }
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.select_left();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.select_right();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_up();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_down();
        }
        KeyCode::PageDown => {
            app.select_page_down();
        }
        KeyCode::PageUp => {
            app.select_page_up();
        }
        KeyCode::Char('g') => {
            app.select_first();
        }
        KeyCode::Char('G') => {
            app.select_last();
        }
        KeyCode::Enter => {
            app.open_detail().await?;
        }
        KeyCode::Esc => {
            // Back is only offered on genre-filtered screens.
            if app.controller.view_state().can_go_back {
                app.pop_route(store);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_detail_key(app: &mut App, store: &mut ArtworkStore, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_detail();
        }
        KeyCode::Char('v') => {
            app.visit_gallery(store);
        }
        _ => {}
    }
}

async fn download_catalog(url: &str, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let response = reqwest::get(url).await?;
    let total_size = response
        .content_length()
        .ok_or("Failed to get content length")?;

    let pb = ProgressBar::new(total_size);
    pb.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
        .progress_chars("#>-"));

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(output)?;
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(item) = stream.next().await {
        let chunk = item?;
        file.write_all(&chunk)?;
        let new = std::cmp::min(downloaded + (chunk.len() as u64), total_size);
        downloaded = new;
        pb.set_position(new);
    }

    pb.finish_with_message("Download complete");
    Ok(())
}
