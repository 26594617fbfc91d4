use serde::{Deserialize, Serialize};
use std::fmt;

/// One feed entry. Rank is the position in the feed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub url: String,
    pub is_adult: bool,
}

impl Post {
    pub fn new(id: impl Into<String>, url: impl Into<String>, is_adult: bool) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            is_adult,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Hot,
    Top,
    New,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Hot => "hot",
            SortMode::Top => "top",
            SortMode::New => "new",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window for `top` listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a winning post is picked out of a feed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub sort_mode: SortMode,
    pub time_window: TimeWindow,
    pub allow_adult: bool,
    pub result_limit: u32,
    pub randomize: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            sort_mode: SortMode::Hot,
            time_window: TimeWindow::Day,
            allow_adult: false,
            result_limit: 10,
            randomize: false,
        }
    }
}

/// A post link mapped to something that can be downloaded directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub post_id: String,
    pub direct_url: String,
    /// Lowercase, without the leading dot
    pub extension: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_parse_from_lowercase_toml() {
        #[derive(Deserialize)]
        struct Probe {
            sort: SortMode,
            time: TimeWindow,
        }
        let probe: Probe = toml::from_str("sort = \"top\"\ntime = \"week\"").unwrap();
        assert_eq!(probe.sort, SortMode::Top);
        assert_eq!(probe.time, TimeWindow::Week);
    }

    #[test]
    fn test_display_matches_api_names() {
        assert_eq!(SortMode::New.to_string(), "new");
        assert_eq!(TimeWindow::Month.to_string(), "month");
    }
}
