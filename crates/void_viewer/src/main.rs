//! Void Viewer
//!
//! Usage:
//!   void-viewer                               # viewer.toml or defaults
//!   VOID_VIEWER_CONFIG=paced.toml void-viewer
//!   VOID_VIEWER_UPDATE_RATE=30 void-viewer

use void_viewer::{ViewerConfig, ViewerError};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Void Viewer v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ViewerError> {
    let config = ViewerConfig::load()?;
    config.print_summary();

    let report = void_viewer::run(&config)?;
    log::info!("Report:\n{}", report.to_json()?);
    Ok(())
}
