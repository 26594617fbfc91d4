mod cli;
mod commands;
mod common;
mod config;
mod desktop;
mod ui;
mod wallpaper;

use clap::Parser;
use serde_json::json;

use crate::cli::{Cli, Commands};
use crate::ui::{Level, emit};
use crate::wallpaper::error::WallpaperError;

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let config_file = cli.config.as_deref();
    match cli.command {
        Some(Commands::Detect { display }) => commands::handle_detect(display, config_file),
        Some(Commands::Config { command }) => commands::handle_config(command, config_file),
        None => commands::handle_run(cli.run, config_file).await,
    }
}

/// Exit code and event code for a failed run
fn classify(err: &anyhow::Error) -> (i32, &'static str) {
    match err.downcast_ref::<WallpaperError>() {
        Some(e) => (e.exit_code(), e.code()),
        None => (1, "error"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    ui::init(cli.format, !cli.no_color);
    ui::set_debug_mode(cli.debug);

    if let Err(err) = dispatch(cli).await {
        let (exit_code, code) = classify(&err);
        emit(
            Level::Error,
            code,
            &format!("Error: {:#}", err),
            Some(json!({ "exit_code": exit_code })),
        );
        std::process::exit(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_wallpaper_errors() {
        let err = anyhow::Error::from(WallpaperError::NoCandidateFound {
            channel: "wallpapers".into(),
        });
        assert_eq!(classify(&err), (2, "wallpaper.no_candidate"));

        let err = anyhow::anyhow!("parsing config");
        assert_eq!(classify(&err), (1, "error"));
    }

    #[test]
    fn test_classify_through_context() {
        use anyhow::Context;
        let result: Result<(), WallpaperError> = Err(WallpaperError::Fetch {
            url: "http://i.imgur.com/x.jpg".into(),
            reason: "server returned 404 Not Found".into(),
        });
        let err = result.context("downloading wallpaper").unwrap_err();
        assert_eq!(classify(&err).0, 4);
    }
}
