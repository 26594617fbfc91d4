use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home, config and download directories for one test
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir_all(temp_dir.path().join("home"))?;
        fs::create_dir_all(temp_dir.path().join("config"))?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn home(&self) -> PathBuf {
        self.path().join("home")
    }

    /// Value for XDG_CONFIG_HOME
    pub fn xdg_config_home(&self) -> PathBuf {
        self.path().join("config")
    }

    pub fn config_file(&self) -> PathBuf {
        self.path().join("redwall.toml")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join("walls")
    }

    /// Write a config pointing the feed at `feed_url` and downloads into `output_dir()`
    pub fn write_config(&self, feed_url: &str, extra: &str) -> Result<()> {
        let contents = format!(
            "feed_url = \"{}\"\noutput_dir = \"{}\"\ntimeout_secs = 5\n{}",
            feed_url,
            self.output_dir().display(),
            extra
        );
        fs::write(self.config_file(), contents)?;
        Ok(())
    }

    /// Names of all files in the download directory
    pub fn downloaded_files(&self) -> Result<Vec<String>> {
        if !self.output_dir().exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(self.output_dir())? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}
