use clap::{Parser, Subcommand};
use scrollbox_common::Config;
use scrollbox_runtime::{resolve_active, MemoryStore, PageContext, Sidebar};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

mod session;
use session::{Command, Session};

/// Scrollbox - a book sidebar that remembers where you were

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a reader browsing the book
    Run {
        /// Path to the table of contents markup
        toc_path: PathBuf,
        /// Comma-separated list of commands (e.g., "open https://site/a.html,toggle 1,show")
        input_string: String,
        /// Directory holding scrollbox.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the sidebar markup as it looks on a page
    Render {
        /// Path to the table of contents markup
        toc_path: PathBuf,
        /// Document URL of the page
        url: String,
        /// Relative path from the page to the site root
        #[arg(long, default_value = "")]
        root: String,
    },
    /// Print the active entry and the sections it opens, as JSON
    Resolve {
        /// Path to the table of contents markup
        toc_path: PathBuf,
        /// Document URL of the page
        url: String,
        /// Relative path from the page to the site root
        #[arg(long, default_value = "")]
        root: String,
    },
}

fn main() {
    init_tracing();
    let cli = Args::parse();

    match cli.command {
        Commands::Run {
            toc_path,
            input_string,
            config,
        } => {
            let config = load_config(config.as_deref());
            let mut session = Session::new(load_sidebar(&toc_path, config));

            for input in input_string.split(',') {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let Some(command) = Command::parse(trimmed) else {
                    eprintln!("Unknown command: {}", trimmed);
                    continue;
                };
                match session.run(command) {
                    Ok(lines) => {
                        for line in lines {
                            println!("{}", line);
                        }
                    }
                    Err(err) => println!("ERROR: {}", err),
                }
            }
        }
        Commands::Render {
            toc_path,
            url,
            root,
        } => {
            let mut sidebar = load_sidebar(&toc_path, Config::default());
            sidebar.initialize(PageContext::new(url, root), MemoryStore::new());
            println!("{}", sidebar.render());
        }
        Commands::Resolve {
            toc_path,
            url,
            root,
        } => {
            let sidebar = load_sidebar(&toc_path, Config::default());
            let active = resolve_active(&sidebar.tree, &PageContext::new(url, root));
            match serde_json::to_string_pretty(&active) {
                Ok(json) => println!("{}", json),
                Err(err) => {
                    eprintln!("Error writing JSON: {}", err);
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Logs go to stderr so stdout stays comparable in compatibility tests.
fn init_tracing() {
    let subscriber = tracing_subscriber::Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn load_config(dir: Option<&Path>) -> Config {
    let Some(dir) = dir else {
        return Config::default();
    };
    match Config::load(dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    }
}

fn load_sidebar(toc_path: &Path, config: Config) -> Sidebar {
    let markup = match std::fs::read_to_string(toc_path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading table of contents: {}", err);
            std::process::exit(1);
        }
    };

    match Sidebar::from_markup(&markup, config) {
        Ok(sidebar) => sidebar,
        Err(err) => {
            eprintln!("{}: {}", toc_path.display(), err);
            std::process::exit(1);
        }
    }
}
