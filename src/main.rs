//! Kickshow binary: opens a window and renders the sneaker showcase.

use std::path::{Path, PathBuf};

use kickshow::{options::Options, Viewer};

/// Model shown when no path is given on the command line.
const DEFAULT_MODEL: &str = "assets/models/sneaker.glb";
/// Optional options file read from the working directory.
const OPTIONS_FILE: &str = "kickshow.toml";

fn load_options() -> Options {
    let path = Path::new(OPTIONS_FILE);
    if !path.exists() {
        return Options::default();
    }
    match Options::load(path) {
        Ok(options) => {
            log::info!("loaded options from {OPTIONS_FILE}");
            options
        }
        Err(e) => {
            log::warn!("ignoring {OPTIONS_FILE}: {e}");
            Options::default()
        }
    }
}

fn main() {
    env_logger::init();

    let model_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_MODEL), PathBuf::from);

    if !model_path.exists() {
        log::error!("model file not found: {}", model_path.display());
        log::error!("Usage: kickshow [path/to/model.glb]");
        std::process::exit(1);
    }

    if let Err(e) = Viewer::builder()
        .with_path(model_path)
        .with_options(load_options())
        .with_title("Kickshow")
        .build()
        .run()
    {
        log::error!("viewer exited with error: {e}");
        std::process::exit(1);
    }
}
