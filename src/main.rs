mod app;
mod event;
mod handler;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ftree::config::{AppConfig, ThemeSection, TreeSection};
use ftree::error::{AppError, Result};
use ftree::Node;

use crate::app::App;
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};

/// Interactive demo for the ftree widget engine.
///
/// Loads a tree from a JSON structure file (objects are folders, null
/// values are files) or falls back to a built-in sample.
#[derive(Parser, Debug)]
#[command(name = "ftree", version, about)]
struct Cli {
    /// JSON structure file to browse
    structure: Option<PathBuf>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with these paths collapsed (repeatable)
    #[arg(long = "collapsed", value_name = "PATH")]
    collapsed: Vec<String>,

    /// Use the light color scheme
    #[arg(long)]
    light: bool,

    /// Render all rows instead of only the scrolled window
    #[arg(long)]
    no_virtualize: bool,
}

impl Cli {
    /// Partial config built from the flags; merged on top of config files.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            tree: TreeSection {
                virtualize: self.no_virtualize.then_some(false),
                ..Default::default()
            },
            theme: ThemeSection {
                scheme: self.light.then(|| "light".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Log to `ftree.log` when `RUST_LOG` is set; a TUI owns stdout, so the
/// subscriber writes to a file through a non-blocking appender.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    std::env::var_os("RUST_LOG")?;
    let appender = tracing_appender::rolling::never(".", "ftree.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn load_structure(path: Option<&PathBuf>) -> Result<Node> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            let node: Node = serde_json::from_str(&content)
                .map_err(|e| AppError::InvalidStructure(e.to_string()))?;
            if !node.is_dir() {
                return Err(AppError::InvalidStructure(
                    "expected an object at the top level".into(),
                ));
            }
            Ok(node)
        }
        None => Ok(sample_structure()),
    }
}

fn sample_structure() -> Node {
    serde_json::from_str(
        r#"{
            "src": {
                "components": {
                    "tree.rs": null,
                    "status_bar.rs": null,
                    "mod.rs": null
                },
                "tree": {
                    "node.rs": null,
                    "flatten.rs": null,
                    "filter.rs": null,
                    "state.rs": null,
                    "mod.rs": null
                },
                "lib.rs": null,
                "main.rs": null
            },
            "docs": {
                "guide.md": null,
                "api.md": null
            },
            "Cargo.toml": null,
            "README.md": null
        }"#,
    )
    .expect("built-in sample structure is valid")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing();

    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    let root = load_structure(cli.structure.as_ref())?;

    install_panic_hook();

    let mut tui = Tui::enter()?;
    let mut app = App::new(root, &config);
    app.tree.seed_collapsed(cli.collapsed.clone());
    let mut events = EventHandler::new(Duration::from_millis(16));

    loop {
        tui.draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick => app.on_tick(),
            Event::Resize(_, _) => {}
        }

        // The engine's queued requests are applied after every event so the
        // structure the caller owns and the rows on screen never drift.
        app.apply_requests();

        if app.should_quit {
            break;
        }
    }

    // Dropping the guard leaves the alternate screen and raw mode.
    drop(tui);
    Ok(())
}
