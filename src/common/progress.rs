use indicatif::{ProgressBar, ProgressStyle};

use crate::ui::prelude::*;

pub fn create_spinner(message: String) -> ProgressBar {
    if get_output_format() == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style.tick_chars("⠁⠉⠙⠚⠒⠂⠲⠴⠤⠄⠦⠖⠓⠋ "));
    }
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Byte progress bar for downloads; falls back to a spinner when the size is unknown
pub fn create_download_bar(total: Option<u64>, message: String) -> ProgressBar {
    let Some(total) = total else {
        return create_spinner(message);
    };
    if get_output_format() == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{msg} [{bar:30}] {bytes}/{total_bytes} ({bytes_per_sec})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.set_message(message);
    pb
}

/// Finish a progress bar and print a success message with a checkmark
/// This clears the bar line entirely and prints a clean message
pub fn finish_with_success(pb: ProgressBar, message: impl Into<String>) {
    pb.finish_and_clear();
    if get_output_format() == OutputFormat::Text {
        println!("✓ {}", message.into());
    }
}
