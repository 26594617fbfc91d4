use anyhow::{Context, Result};
use colored::*;
use serde_json::json;
use std::path::Path;

use crate::cli::{ConfigCommands, RunArgs};
use crate::common::http::build_client;
use crate::config::RedwallConfig;
use crate::desktop::DesktopEnvironment;
use crate::desktop::apply::apply;
use crate::ui::prelude::*;
use crate::wallpaper::feed::RedditFeed;
use crate::wallpaper::fetch::HttpFetcher;
use crate::wallpaper::pipeline::{Pipeline, RunRequest};

/// Example path shown by `detect`
const SAMPLE_IMAGE: &str = "/path/to/image.jpg";

fn load_config(config_file: Option<&Path>) -> Result<RedwallConfig> {
    let path = RedwallConfig::config_file_path(config_file)?;
    emit(
        Level::Debug,
        "config.path",
        &format!("Using config {}", path.display()),
        None,
    );
    RedwallConfig::load_from(&path)
}

pub async fn handle_run(args: RunArgs, config_file: Option<&Path>) -> Result<()> {
    let config = load_config(config_file)?.merge_args(&args);
    let output_root = config.output_root()?;

    let client = build_client(config.timeout(), &config.user_agent)?;
    let feed = RedditFeed::new(client.clone(), config.feed_url.clone());
    let fetcher = HttpFetcher::new(client);

    emit(
        Level::Info,
        "feed.fetch",
        &format!("Looking for a wallpaper in r/{}", config.channel.cyan()),
        None,
    );

    let request = RunRequest {
        channel: config.channel.clone(),
        policy: config.policy(),
        output_root,
    };
    let outcome = Pipeline::new(&feed, &fetcher).run(&request).await?;
    let details = json!({
        "post_id": outcome.selection.post.id,
        "url": outcome.selection.image.direct_url,
        "path": outcome.target.path,
        "cached": outcome.target.already_exists,
        "bytes": outcome.bytes_written,
    });
    let path = outcome.target.path;

    if args.no_apply {
        emit(
            Level::Success,
            "wallpaper.saved",
            &format!("Wallpaper saved to {}", path.display()),
            Some(details),
        );
        return Ok(());
    }

    let desktop = config.desktop.unwrap_or_else(DesktopEnvironment::detect);
    emit(
        Level::Debug,
        "desktop.detected",
        &format!("Desktop environment: {}", desktop.name()),
        None,
    );

    let command = desktop.command_for(&path, config.display)?;
    let line = command.to_shell_line();

    if args.print_command {
        emit(
            Level::Info,
            "desktop.command",
            &line,
            Some(json!({ "path": path, "desktop": desktop, "command": line })),
        );
        return Ok(());
    }

    emit(Level::Debug, "desktop.run", &format!("Running {}", line), None);
    apply(&command)?;

    emit(
        Level::Success,
        "wallpaper.applied",
        &format!("Wallpaper set to {}", path.display()),
        Some(json!({ "desktop": desktop, "run": details })),
    );
    Ok(())
}

pub fn handle_detect(display: Option<u32>, config_file: Option<&Path>) -> Result<()> {
    let config = load_config(config_file)?;
    let desktop = config.desktop.unwrap_or_else(DesktopEnvironment::detect);
    let display = display.unwrap_or(config.display);

    match desktop.command_for(Path::new(SAMPLE_IMAGE), display) {
        Ok(command) => {
            emit(
                Level::Info,
                "desktop.detected",
                &format!("Detected desktop: {}", desktop.name().green()),
                Some(json!({ "desktop": desktop })),
            );
            emit(
                Level::Info,
                "desktop.command",
                &command.to_shell_line(),
                Some(json!({ "command": command.to_shell_line() })),
            );
        }
        Err(_) => emit(
            Level::Warn,
            "desktop.unsupported",
            "No supported desktop environment detected; use --desktop to pick one",
            None,
        ),
    }
    Ok(())
}

pub fn handle_config(command: ConfigCommands, config_file: Option<&Path>) -> Result<()> {
    let path = RedwallConfig::config_file_path(config_file)?;

    match command {
        ConfigCommands::Show => {
            let config = RedwallConfig::load_from(&path)?;
            let toml = toml::to_string_pretty(&config).context("serializing config to toml")?;
            print!("{}", toml);
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
        ConfigCommands::Init => {
            if path.exists() {
                emit(
                    Level::Warn,
                    "config.exists",
                    &format!("Config already exists at {}", path.display()),
                    None,
                );
                return Ok(());
            }
            RedwallConfig::default().save_to(&path)?;
            emit(
                Level::Success,
                "config.created",
                &format!("Created config at {}", path.display()),
                Some(json!({ "path": path })),
            );
        }
    }
    Ok(())
}
