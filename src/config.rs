use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::RunArgs;
use crate::common::http::DEFAULT_USER_AGENT;
use crate::common::paths;
use crate::desktop::DesktopEnvironment;
use crate::wallpaper::feed::DEFAULT_FEED_URL;
use crate::wallpaper::post::{SelectionPolicy, SortMode, TimeWindow};

fn default_channel() -> String {
    "wallpapers".to_string()
}

fn default_limit() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Defaults for every run; command line flags win over these
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RedwallConfig {
    #[serde(default = "default_channel")]
    pub channel: String,
    pub sort: SortMode,
    pub time: TimeWindow,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub allow_adult: bool,
    pub randomize: bool,
    #[serde(default = "paths::default_output_dir")]
    pub output_dir: String,
    pub display: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop: Option<DesktopEnvironment>,
}

impl Default for RedwallConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            sort: SortMode::default(),
            time: TimeWindow::default(),
            limit: default_limit(),
            allow_adult: false,
            randomize: false,
            output_dir: paths::default_output_dir(),
            display: 0,
            timeout_secs: default_timeout_secs(),
            feed_url: default_feed_url(),
            user_agent: default_user_agent(),
            desktop: None,
        }
    }
}

impl RedwallConfig {
    /// Config file to use: `explicit` if given, the default location otherwise
    pub fn config_file_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => paths::default_config_file(),
        }
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let s = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&s)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("creating config directory")?;
        }

        let toml = toml::to_string_pretty(self).context("serializing config to toml")?;
        fs::write(path, toml).context("writing config file")?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            anyhow::bail!("limit must be a positive number");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be a positive number");
        }
        if self.channel.trim().is_empty() {
            anyhow::bail!("channel must not be empty");
        }
        Ok(())
    }

    /// Overlay command line flags on top of the file values
    pub fn merge_args(mut self, args: &RunArgs) -> Self {
        if let Some(channel) = &args.subreddit {
            self.channel = channel.clone();
        }
        if let Some(sort) = args.sort {
            self.sort = sort;
        }
        if let Some(time) = args.time {
            self.time = time;
        }
        if let Some(limit) = args.limit {
            self.limit = limit;
        }
        if let Some(allow_adult) = args.allow_adult() {
            self.allow_adult = allow_adult;
        }
        if let Some(randomize) = args.randomize() {
            self.randomize = randomize;
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.to_string_lossy().into_owned();
        }
        if let Some(display) = args.display {
            self.display = display;
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = timeout;
        }
        if args.desktop.is_some() {
            self.desktop = args.desktop;
        }
        self
    }

    pub fn policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            sort_mode: self.sort,
            time_window: self.time,
            allow_adult: self.allow_adult,
            result_limit: self.limit,
            randomize: self.randomize,
        }
    }

    /// Absolute download directory
    pub fn output_root(&self) -> Result<PathBuf> {
        paths::absolutize(&paths::expand_path(&self.output_dir)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
