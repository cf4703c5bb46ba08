use crate::models::{CommentRecord, PostRecord, RawComment, RawPost};
use crate::normalize::TextNormalizer;

/// Make free text safe for a `;`-delimited single-line field.
pub fn sanitize_field(s: &str) -> String {
    s.replace("\r\n", " ")
        .replace(|c: char| c == '\n' || c == '\r', " ")
        .replace(';', ",")
}

/// `"t1_abc"` -> `Some("abc")`; no underscore (or nothing after it) -> `None`.
pub fn parse_parent_id(raw: &str) -> Option<String> {
    if !raw.contains('_') {
        return None;
    }
    raw.split('_')
        .nth(1)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Strip a `t3_`-style kind prefix, leaving ids without one untouched.
pub fn strip_kind_prefix(fullname: &str) -> &str {
    match fullname.split_once('_') {
        Some((kind, rest)) if kind.len() == 2 && kind.starts_with('t') => rest,
        _ => fullname,
    }
}

/// Converts API objects into flat records, running text through a normalizer.
pub struct RecordMapper<'a, N: TextNormalizer + ?Sized> {
    normalizer: &'a N,
}

impl<'a, N: TextNormalizer + ?Sized> RecordMapper<'a, N> {
    pub fn new(normalizer: &'a N) -> Self {
        Self { normalizer }
    }

    pub fn map_post(&self, post: &RawPost) -> PostRecord {
        let joined = format!("{} {}", post.title, post.selftext);
        PostRecord {
            post_id: post.id.clone(),
            subreddit: post.subreddit.clone(),
            title: sanitize_field(&post.title),
            text: sanitize_field(&post.selftext),
            clean_text: self.normalizer.normalize(&joined),
            author: post.author.clone(),
            score: post.score,
            upvote_ratio: post.upvote_ratio,
            num_comments: post.num_comments,
            comments: Vec::new(),
        }
    }

    pub fn map_comment(&self, comment: &RawComment) -> CommentRecord {
        CommentRecord {
            comment_id: comment.id.clone(),
            post_id: strip_kind_prefix(&comment.link_id).to_string(),
            author: comment.author.clone(),
            parent_id: parse_parent_id(&comment.parent_id),
            body: sanitize_field(&comment.body),
            clean_body: self.normalizer.normalize(&comment.body),
            score: comment.score,
        }
    }
}
