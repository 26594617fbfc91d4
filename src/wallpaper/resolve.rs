//! Mapping of raw post links to directly downloadable images.
//!
//! Links either point at a raw image already, at an image host's wrapper page
//! for a single image, or at something we cannot pick one image from (albums,
//! galleries, unknown hosts). The last group is always rejected.

use reqwest::Url;

use super::post::ResolvedImage;

/// Domain of the image host whose wrapper pages can be rewritten
const IMAGE_HOST: &str = "imgur.com";
/// Direct-image base for the image host
const IMAGE_HOST_DIRECT: &str = "http://i.imgur.com";
/// Extensions that are usable without any rewriting
const DIRECT_EXTENSIONS: &[&str] = &["jpg", "png"];
/// Path segments that mark multi-image collections
const COLLECTION_MARKERS: &[&str] = &["a", "gallery"];
/// Trailing segment left behind by "upload new image" links
const UPLOAD_ARTIFACT: &str = "new";

/// Resolve the link of post `post_id` to a direct image, or `None` when the
/// link shape is not supported.
pub fn resolve(post_id: &str, raw_url: &str) -> Option<ResolvedImage> {
    let stripped = strip_query(raw_url);
    let parsed = Url::parse(stripped).ok()?;
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let on_image_host = parsed.host_str().is_some_and(is_image_host);

    // Collections are never usable, even when the link carries an image extension
    if on_image_host
        && segments
            .iter()
            .any(|seg| COLLECTION_MARKERS.contains(seg))
    {
        return None;
    }

    if let Some(extension) = segments.last().and_then(|seg| extension_of(seg))
        && DIRECT_EXTENSIONS.contains(&extension.as_str())
    {
        return Some(ResolvedImage {
            post_id: post_id.to_string(),
            direct_url: stripped.trim_end_matches('/').to_string(),
            extension,
        });
    }

    if !on_image_host {
        return None;
    }

    let id = image_id(&segments)?;
    Some(ResolvedImage {
        post_id: post_id.to_string(),
        direct_url: format!("{}/{}.jpg", IMAGE_HOST_DIRECT, id),
        extension: "jpg".to_string(),
    })
}

/// Everything before the first `?`
fn strip_query(raw: &str) -> &str {
    raw.split_once('?').map_or(raw, |(head, _)| head)
}

/// Lowercased text after the last `.` of a path segment
fn extension_of(segment: &str) -> Option<String> {
    segment
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

fn is_image_host(host: &str) -> bool {
    host == IMAGE_HOST || host.ends_with(&format!(".{}", IMAGE_HOST))
}

/// Image identifier from a wrapper page path like `/xYz123` or `/xYz123/new`
fn image_id<'a>(segments: &[&'a str]) -> Option<&'a str> {
    let mut last = *segments.last()?;
    if last == UPLOAD_ARTIFACT {
        last = *segments.iter().rev().nth(1)?;
    }

    let id = last.rsplit_once('.').map_or(last, |(stem, _)| stem);
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(id)
}
