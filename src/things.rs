//! Decoding of Reddit "thing" JSON (listings, `t3` posts, `t1` comments and
//! `more` placeholders) into the crate's raw models.

use crate::models::{CommentNode, MoreComments, RawComment, RawPost};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct Thing {
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    id: String,
    #[serde(default)]
    subreddit: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    upvote_ratio: f64,
    #[serde(default)]
    num_comments: u64,
    #[serde(default)]
    removed_by_category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentData {
    id: String,
    #[serde(default)]
    link_id: String,
    #[serde(default)]
    parent_id: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    replies: Value, // "" when empty, otherwise a Listing
}

#[derive(Debug, Deserialize)]
struct MoreData {
    id: String,
    #[serde(default)]
    parent_id: String,
    #[serde(default)]
    count: u64,
    #[serde(default)]
    children: Vec<String>,
}

/// The API reports gone accounts as the literal `[deleted]`.
fn live_author(author: Option<String>) -> Option<String> {
    author.filter(|a| !a.is_empty() && a != "[deleted]")
}

pub fn post_from_value(v: Value) -> Result<RawPost> {
    let d: PostData = serde_json::from_value(v).context("decode t3 post")?;
    Ok(RawPost {
        id: d.id,
        subreddit: d.subreddit,
        title: d.title,
        selftext: d.selftext,
        author: live_author(d.author),
        score: d.score,
        upvote_ratio: d.upvote_ratio,
        num_comments: d.num_comments,
        removed_by_category: d.removed_by_category,
    })
}

/// Posts of a `/new` listing; non-`t3` children are ignored.
pub fn posts_from_listing(listing: Listing) -> Result<Vec<RawPost>> {
    listing
        .data
        .children
        .into_iter()
        .filter(|t| t.kind == "t3")
        .map(|t| post_from_value(t.data))
        .collect()
}

pub fn node_from_thing(thing: Thing) -> Result<Option<CommentNode>> {
    match thing.kind.as_str() {
        "t1" => {
            let d: CommentData = serde_json::from_value(thing.data).context("decode t1 comment")?;
            let replies = match d.replies {
                Value::Object(_) => {
                    let l: Listing = serde_json::from_value(d.replies).context("decode replies")?;
                    nodes_from_listing(l)?
                }
                _ => Vec::new(),
            };
            Ok(Some(CommentNode::Comment(RawComment {
                id: d.id,
                link_id: d.link_id,
                parent_id: d.parent_id,
                author: live_author(d.author),
                body: d.body,
                score: d.score,
                replies,
            })))
        }
        "more" => {
            let d: MoreData = serde_json::from_value(thing.data).context("decode more")?;
            Ok(Some(CommentNode::More(MoreComments {
                id: d.id,
                parent_id: d.parent_id,
                count: d.count,
                children: d.children,
            })))
        }
        other => {
            tracing::debug!(kind = other, "ignoring unexpected thing in comment listing");
            Ok(None)
        }
    }
}

pub fn nodes_from_listing(listing: Listing) -> Result<Vec<CommentNode>> {
    let mut out = Vec::with_capacity(listing.data.children.len());
    for t in listing.data.children {
        if let Some(n) = node_from_thing(t)? {
            out.push(n);
        }
    }
    Ok(out)
}

/// `/comments/<id>` returns `[post listing, comment listing]`.
pub fn comment_nodes_from_response(v: Value) -> Result<Vec<CommentNode>> {
    let mut parts: Vec<Listing> = serde_json::from_value(v).context("decode comments response")?;
    if parts.len() < 2 {
        return Err(anyhow!("comments response has {} listings, expected 2", parts.len()));
    }
    nodes_from_listing(parts.swap_remove(1))
}

#[derive(Debug, Deserialize)]
struct MoreChildrenResponse {
    json: MoreChildrenJson,
}

#[derive(Debug, Deserialize)]
struct MoreChildrenJson {
    #[serde(default)]
    errors: Vec<Value>,
    #[serde(default)]
    data: Option<MoreChildrenData>,
}

#[derive(Debug, Deserialize)]
struct MoreChildrenData {
    #[serde(default)]
    things: Vec<Thing>,
}

/// `/api/morechildren?api_type=json` payload -> flat nodes.
pub fn nodes_from_morechildren(v: Value) -> Result<Vec<CommentNode>> {
    let resp: MoreChildrenResponse = serde_json::from_value(v).context("decode morechildren")?;
    if !resp.json.errors.is_empty() {
        return Err(anyhow!("morechildren errors: {:?}", resp.json.errors));
    }
    let mut out = Vec::new();
    for t in resp.json.data.map(|d| d.things).unwrap_or_default() {
        if let Some(n) = node_from_thing(t)? {
            out.push(n);
        }
    }
    Ok(out)
}
