use async_trait::async_trait;
use serde::Deserialize;

use super::error::WallpaperError;
use super::post::{Post, SelectionPolicy, SortMode, TimeWindow};
use crate::common::http::describe_error;

pub const DEFAULT_FEED_URL: &str = "https://www.reddit.com";

/// Query for one listing page of a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub channel: String,
    pub sort_mode: SortMode,
    pub time_window: TimeWindow,
    pub limit: u32,
}

impl FeedRequest {
    pub fn new(channel: impl Into<String>, policy: &SelectionPolicy) -> Self {
        Self {
            channel: channel.into(),
            sort_mode: policy.sort_mode,
            time_window: policy.time_window,
            limit: policy.result_limit,
        }
    }
}

/// Source of ranked posts for a channel
#[async_trait]
pub trait FeedSource {
    async fn fetch_posts(&self, request: &FeedRequest) -> Result<Vec<Post>, WallpaperError>;
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: ListingPost,
}

#[derive(Debug, Deserialize)]
struct ListingPost {
    id: String,
    url: Option<String>,
    #[serde(default)]
    over_18: bool,
}

/// Reddit's public JSON listings
#[derive(Debug, Clone)]
pub struct RedditFeed {
    client: reqwest::Client,
    base_url: String,
}

impl RedditFeed {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn listing_url(&self, request: &FeedRequest) -> String {
        let mut url = format!(
            "{}/r/{}/{}.json?limit={}",
            self.base_url.trim_end_matches('/'),
            request.channel,
            request.sort_mode,
            request.limit
        );
        if request.sort_mode == SortMode::Top {
            url.push_str(&format!("&t={}", request.time_window));
        }
        url
    }
}

/// Posts of a listing in feed order; entries without a link are dropped
fn parse_listing(body: &str) -> Result<Vec<Post>, serde_json::Error> {
    let listing: Listing = serde_json::from_str(body)?;
    Ok(listing
        .data
        .children
        .into_iter()
        .filter_map(|child| {
            let post = child.data;
            post.url.map(|url| Post::new(post.id, url, post.over_18))
        })
        .collect())
}

#[async_trait]
impl FeedSource for RedditFeed {
    async fn fetch_posts(&self, request: &FeedRequest) -> Result<Vec<Post>, WallpaperError> {
        let feed_error = |reason: String| WallpaperError::Feed {
            channel: request.channel.clone(),
            reason,
        };

        let url = self.listing_url(request);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| feed_error(describe_error(&e)))?;

        if !response.status().is_success() {
            return Err(feed_error(format!("server returned {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| feed_error(describe_error(&e)))?;
        parse_listing(&body).map_err(|e| feed_error(format!("unexpected listing format: {}", e)))
    }
}
