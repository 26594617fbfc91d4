use rand::Rng;
use serde_json::json;
use std::path::PathBuf;

use super::error::WallpaperError;
use super::feed::{FeedRequest, FeedSource};
use super::fetch::Fetcher;
use super::post::SelectionPolicy;
use super::select::{Selection, SkipReason, select};
use super::target::{SaveTarget, name_target};
use crate::ui::prelude::*;

/// Inputs of one run
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub channel: String,
    pub policy: SelectionPolicy,
    pub output_root: PathBuf,
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub selection: Selection,
    pub target: SaveTarget,
    /// `None` when an existing file was reused
    pub bytes_written: Option<u64>,
}

/// Feed query, selection, naming and download, in that order.
pub struct Pipeline<'a, S: ?Sized, F: ?Sized> {
    feed: &'a S,
    fetcher: &'a F,
}

impl<'a, S, F> Pipeline<'a, S, F>
where
    S: FeedSource + Sync + ?Sized,
    F: Fetcher + Sync + ?Sized,
{
    pub fn new(feed: &'a S, fetcher: &'a F) -> Self {
        Self { feed, fetcher }
    }

    pub async fn run(&self, request: &RunRequest) -> Result<RunOutcome, WallpaperError> {
        self.run_with_rng(request, &mut rand::thread_rng()).await
    }

    pub async fn run_with_rng<R: Rng + ?Sized>(
        &self,
        request: &RunRequest,
        rng: &mut R,
    ) -> Result<RunOutcome, WallpaperError> {
        let feed_request = FeedRequest::new(request.channel.clone(), &request.policy);
        emit(
            Level::Debug,
            "feed.query",
            &format!(
                "Querying r/{} ({}, {}, limit {})",
                feed_request.channel,
                feed_request.sort_mode,
                feed_request.time_window,
                feed_request.limit
            ),
            None,
        );

        let posts = self.feed.fetch_posts(&feed_request).await?;
        emit(
            Level::Debug,
            "feed.received",
            &format!("Received {} posts", posts.len()),
            Some(json!({ "count": posts.len() })),
        );

        let selection = select(&posts, &request.policy, rng, |post, reason| {
            let why = match reason {
                SkipReason::Adult => "adult content not allowed",
                SkipReason::Unresolvable => "link is not a single image",
            };
            emit(
                Level::Debug,
                "wallpaper.skip",
                &format!("Skipping {} ({}): {}", post.id, post.url, why),
                None,
            );
        })
        .ok_or_else(|| WallpaperError::NoCandidateFound {
            channel: request.channel.clone(),
        })?;

        emit(
            Level::Info,
            "wallpaper.selected",
            &format!(
                "Selected post {} -> {}",
                selection.post.id, selection.image.direct_url
            ),
            Some(json!({
                "post_id": selection.post.id,
                "url": selection.image.direct_url,
            })),
        );

        let target = name_target(
            &request.channel,
            &selection.image.post_id,
            &selection.image.extension,
            &request.output_root,
        )?;

        if target.already_exists {
            emit(
                Level::Info,
                "wallpaper.cached",
                &format!("Reusing existing {}", target.path.display()),
                None,
            );
            return Ok(RunOutcome {
                selection,
                target,
                bytes_written: None,
            });
        }

        let written = self
            .fetcher
            .fetch(&selection.image.direct_url, &target.path)
            .await?;

        Ok(RunOutcome {
            selection,
            target,
            bytes_written: Some(written),
        })
    }
}
