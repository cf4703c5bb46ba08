use crate::models::RawPost;

/// Body text the API substitutes for content taken down by moderators or authors.
pub const REMOVAL_SENTINELS: [&str; 2] = ["[removed]", "[deleted]"];

#[inline]
pub fn is_removed_body(body: &str) -> bool {
    REMOVAL_SENTINELS.contains(&body)
}

/// A post is collectable when its body survived, no removal category is set,
/// and it still has an author.
pub fn is_valid_post(post: &RawPost) -> bool {
    if is_removed_body(&post.selftext) {
        return false;
    }
    if post.removed_by_category.as_deref().is_some_and(|c| !c.is_empty()) {
        return false;
    }
    post.author.is_some()
}
