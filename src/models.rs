//! Raw API objects (as returned by a `ForumClient`) and the flat records
//! produced from them.

/// A post as fetched from the forum API.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawPost {
    pub id: String,
    pub subreddit: String,
    pub title: String,
    pub selftext: String,
    /// `None` when the account is gone (`[deleted]`) or missing.
    pub author: Option<String>,
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: u64,
    /// Moderation marker such as `"moderator"` or `"deleted"`.
    pub removed_by_category: Option<String>,
}

impl RawPost {
    /// Type-prefixed identifier used as the pagination cursor.
    pub fn fullname(&self) -> String {
        format!("t3_{}", self.id)
    }
}

/// A comment as fetched from the forum API, with its nested replies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawComment {
    pub id: String,
    pub link_id: String,   // t3_<post id>
    pub parent_id: String, // t1_<comment id> or t3_<post id>
    pub author: Option<String>,
    pub body: String,
    pub score: i64,
    pub replies: Vec<CommentNode>,
}

impl RawComment {
    pub fn fullname(&self) -> String {
        format!("t1_{}", self.id)
    }
}

/// "Load more comments" placeholder inside a comment tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoreComments {
    pub id: String,
    pub parent_id: String,
    pub count: u64,
    pub children: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CommentNode {
    Comment(RawComment),
    More(MoreComments),
}

impl CommentNode {
    pub fn parent_id(&self) -> &str {
        match self {
            CommentNode::Comment(c) => &c.parent_id,
            CommentNode::More(m) => &m.parent_id,
        }
    }
}

/// Flat post row plus the comments collected with it.
#[derive(Clone, Debug, PartialEq)]
pub struct PostRecord {
    pub post_id: String,
    pub subreddit: String,
    pub title: String,
    pub text: String,
    pub clean_text: String,
    pub author: Option<String>,
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: u64,
    pub comments: Vec<CommentRecord>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommentRecord {
    pub comment_id: String,
    pub post_id: String,
    pub author: Option<String>,
    pub parent_id: Option<String>,
    pub body: String,
    pub clean_body: String,
    pub score: i64,
}
