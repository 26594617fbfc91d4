use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::desktop::DesktopEnvironment;
use crate::ui::OutputFormat;
use crate::wallpaper::post::{SortMode, TimeWindow};

/// Set the top image of a subreddit as your desktop wallpaper
#[derive(Parser, Debug)]
#[command(name = "redwall", author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Show every skipped post and the exact commands being run
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use this config file instead of the default one
    #[arg(short, long = "config", id = "config_file", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the detected desktop environment and the command it would use
    Detect {
        /// Display (monitor) index used by the command
        #[arg(long)]
        display: Option<u32>,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with the defaults (never overwrites)
    Init,
}

/// Flags for a wallpaper run; each one overrides the config file
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Subreddit to take the image from
    #[arg(short, long, value_name = "NAME")]
    pub subreddit: Option<String>,

    /// Listing to read
    #[arg(long, value_enum)]
    pub sort: Option<SortMode>,

    /// Time window for the `top` listing
    #[arg(short, long, value_enum)]
    pub time: Option<TimeWindow>,

    /// Number of posts to consider
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: Option<u32>,

    /// Allow adult (NSFW) posts
    #[arg(long, overrides_with = "no_nsfw")]
    pub nsfw: bool,

    /// Skip adult posts even if the config file allows them
    #[arg(long, overrides_with = "nsfw")]
    pub no_nsfw: bool,

    /// Pick a random post among the fetched ones instead of the top one
    #[arg(short, long, overrides_with = "no_random")]
    pub random: bool,

    /// Take the top post even if the config file asks for a random one
    #[arg(long, overrides_with = "random")]
    pub no_random: bool,

    /// Directory the images are saved in
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Display (monitor) index for desktops that set wallpapers per monitor
    #[arg(long)]
    pub display: Option<u32>,

    /// Force a desktop environment instead of detecting it
    #[arg(long, value_enum)]
    pub desktop: Option<DesktopEnvironment>,

    /// Network timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Only download the image, do not change the wallpaper
    #[arg(long)]
    pub no_apply: bool,

    /// Print the wallpaper command instead of running it
    #[arg(long, conflicts_with = "no_apply")]
    pub print_command: bool,
}

impl RunArgs {
    /// `Some` when `--nsfw` or `--no-nsfw` was given; the last one wins
    pub fn allow_adult(&self) -> Option<bool> {
        flag_pair(self.nsfw, self.no_nsfw)
    }

    /// `Some` when `--random` or `--no-random` was given; the last one wins
    pub fn randomize(&self) -> Option<bool> {
        flag_pair(self.random, self.no_random)
    }
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
