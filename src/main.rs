//! Demo binary: an empty window whose camera is driven by the trackball
//! controls, logging the pose as it changes.
//!
//! Accepts an optional path to a TOML settings preset:
//!
//! ```text
//! trackball [settings.toml]
//! ```

use std::path::PathBuf;

use trackball::settings::Settings;
use trackball::viewer::Viewer;

fn main() {
    env_logger::init();

    let mut builder = Viewer::builder();
    if let Some(arg) = std::env::args().nth(1) {
        let path = PathBuf::from(arg);
        match Settings::load(&path) {
            Ok(settings) => builder = builder.with_settings(settings),
            Err(e) => {
                log::error!("failed to load settings from {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = builder.build().run() {
        log::error!("viewer exited with error: {e}");
        std::process::exit(1);
    }
}
