use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WallpaperError {
    #[error("No suitable image found in r/{channel} today")]
    NoCandidateFound { channel: String },

    #[error("Failed to query r/{channel}: {reason}")]
    Feed { channel: String, reason: String },

    #[error("Failed to download {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Desktop environment not supported; image kept at {}", path.display())]
    DesktopEnvironmentUnsupported { path: PathBuf },

    #[error("Wallpaper command `{command}` failed: {reason}")]
    ApplyFailed { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WallpaperError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            WallpaperError::NoCandidateFound { .. } => 2,
            WallpaperError::Feed { .. } => 3,
            WallpaperError::Fetch { .. } => 4,
            WallpaperError::DesktopEnvironmentUnsupported { .. } => 5,
            WallpaperError::ApplyFailed { .. } => 6,
            WallpaperError::Io(_) => 1,
        }
    }

    /// Stable event code used for output
    pub fn code(&self) -> &'static str {
        match self {
            WallpaperError::NoCandidateFound { .. } => "wallpaper.no_candidate",
            WallpaperError::Feed { .. } => "feed.failed",
            WallpaperError::Fetch { .. } => "fetch.failed",
            WallpaperError::DesktopEnvironmentUnsupported { .. } => "desktop.unsupported",
            WallpaperError::ApplyFailed { .. } => "desktop.apply_failed",
            WallpaperError::Io(_) => "io.failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            WallpaperError::NoCandidateFound {
                channel: "w".into(),
            },
            WallpaperError::Feed {
                channel: "w".into(),
                reason: "timeout".into(),
            },
            WallpaperError::Fetch {
                url: "u".into(),
                reason: "404".into(),
            },
            WallpaperError::DesktopEnvironmentUnsupported { path: "/x".into() },
            WallpaperError::ApplyFailed {
                command: "feh".into(),
                reason: "exit 1".into(),
            },
            WallpaperError::Io(std::io::Error::other("disk")),
        ];
        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        assert!(codes.iter().all(|c| *c != 0));
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_messages() {
        let err = WallpaperError::NoCandidateFound {
            channel: "wallpapers".into(),
        };
        assert_eq!(err.to_string(), "No suitable image found in r/wallpapers today");
    }
}
