use dioxus::prelude::*;
use line_highlight_config::Config;
use line_highlight_engine::io;
use std::env;
use std::path::PathBuf;
use std::process;

mod ui;

use ui::App;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("line-highlight starting up");

    let config_path = Config::config_path();
    let args: Vec<String> = env::args().collect();
    let program_name = args
        .first()
        .cloned()
        .unwrap_or_else(|| "line-highlight".to_string());

    let config;
    let from_config;

    if args.len() == 2 {
        config = match Config::with_notes_override(&PathBuf::from(&args[1])) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                process::exit(1);
            }
        };
        from_config = false;
        log::info!(
            "Using notes path from CLI argument: {}",
            config.notes_path.display()
        );
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(loaded)) => {
                config = loaded;
                from_config = true;
                log::info!(
                    "Loaded notes path from config: {}",
                    config.notes_path.display()
                );
            }
            Ok(None) => {
                eprintln!("Error: No notes path provided and no config file found");
                eprintln!("Usage: {program_name} <notes-folder-path>");
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                log::error!("Config::load() failed with error: {e}");
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {program_name} <notes-folder-path>");
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {program_name} [notes-folder-path]");
        process::exit(1);
    };

    if let Err(e) = io::validate_notes_dir(&config.notes_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Notes path '{}'{} is invalid: {e}",
            config.notes_path.display(),
            source
        );
        process::exit(1);
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .with_context(config)
        .launch(app_root);
}

fn app_root() -> Element {
    let config = use_context::<Config>();
    log::debug!("Rendering app for {}", config.notes_path.display());

    rsx! {
        App { config }
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("line-highlight")
        .with_always_on_top(false);

    Config::default().with_window(window)
}
