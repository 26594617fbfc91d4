use rand::Rng;
use rand::seq::SliceRandom;

use super::post::{Post, ResolvedImage, SelectionPolicy};
use super::resolve::resolve;

/// Why a post was passed over during the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Adult,
    Unresolvable,
}

/// The winning post together with its resolved image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub post: Post,
    pub image: ResolvedImage,
}

/// Pick the first admissible, resolvable post.
///
/// Feed order is kept unless `policy.randomize` is set, in which case the posts
/// are shuffled with `rng` before scanning. `on_skip` sees every passed-over post.
pub fn select<R, F>(
    posts: &[Post],
    policy: &SelectionPolicy,
    rng: &mut R,
    mut on_skip: F,
) -> Option<Selection>
where
    R: Rng + ?Sized,
    F: FnMut(&Post, SkipReason),
{
    let mut order: Vec<&Post> = posts.iter().collect();
    if policy.randomize {
        order.shuffle(rng);
    }

    for post in order {
        if post.is_adult && !policy.allow_adult {
            on_skip(post, SkipReason::Adult);
            continue;
        }

        match resolve(&post.id, &post.url) {
            Some(image) => {
                return Some(Selection {
                    post: post.clone(),
                    image,
                });
            }
            None => on_skip(post, SkipReason::Unresolvable),
        }
    }

    None
}
