//! Picking a wallpaper out of a subreddit listing and getting it onto disk

pub mod error;
pub mod feed;
pub mod fetch;
pub mod pipeline;
pub mod post;
pub mod resolve;
pub mod select;
pub mod target;
