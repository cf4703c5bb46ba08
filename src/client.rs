//! The forum API seam plus the comment-tree handling shared by every client:
//! "load more" expansion and breadth-first flattening.

use crate::models::{CommentNode, MoreComments, RawComment, RawPost};
use anyhow::Result;
use std::collections::VecDeque;

/// Paginated read access to a forum.
pub trait ForumClient {
    /// Up to `limit` newest posts of `forum`, starting after the `after` fullname.
    fn new_posts(&mut self, forum: &str, limit: usize, after: Option<&str>) -> Result<Vec<RawPost>>;

    /// Top-level comment nodes of `post` with their nested replies.
    fn comment_tree(&mut self, post: &RawPost) -> Result<Vec<CommentNode>>;

    /// Resolve a placeholder into the nodes it stands for. Returned nodes are
    /// flat; each one is re-attached by its `parent_id`.
    fn expand_more(&mut self, post: &RawPost, more: &MoreComments) -> Result<Vec<CommentNode>>;
}

impl<C: ForumClient + ?Sized> ForumClient for &mut C {
    fn new_posts(&mut self, forum: &str, limit: usize, after: Option<&str>) -> Result<Vec<RawPost>> {
        (**self).new_posts(forum, limit, after)
    }
    fn comment_tree(&mut self, post: &RawPost) -> Result<Vec<CommentNode>> {
        (**self).comment_tree(post)
    }
    fn expand_more(&mut self, post: &RawPost, more: &MoreComments) -> Result<Vec<CommentNode>> {
        (**self).expand_more(post, more)
    }
}

/// A post's comment forest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentTree {
    pub roots: Vec<CommentNode>,
}

impl CommentTree {
    pub fn new(roots: Vec<CommentNode>) -> Self {
        Self { roots }
    }

    /// Replace up to `limit` placeholders, largest first. Placeholders with no
    /// child ids ("continue this thread") are dropped without a request and do
    /// not count against the limit.
    pub fn replace_more<C: ForumClient + ?Sized>(
        &mut self,
        client: &mut C,
        post: &RawPost,
        limit: usize,
    ) -> Result<usize> {
        let mut replaced = 0usize;
        while replaced < limit {
            let Some(target) = largest_more(&self.roots) else { break };
            let Some(more) = remove_more(&mut self.roots, &target) else { break };
            // "Continue this thread" stubs list no child ids: dropped without a
            // request and without using up the expansion budget.
            if more.children.is_empty() {
                continue;
            }
            let nodes = client.expand_more(post, &more)?;
            tracing::debug!(post = %post.id, more = %more.id, fetched = nodes.len(), "expanded placeholder");
            self.attach(nodes);
            replaced += 1;
        }
        // Whatever is left can no longer be expanded.
        strip_more(&mut self.roots);
        Ok(replaced)
    }

    /// Insert flat nodes under their parents (`t1_` comment or `t3_` root).
    pub fn attach(&mut self, nodes: Vec<CommentNode>) {
        for node in nodes {
            let parent = node.parent_id().to_string();
            if parent.starts_with("t3_") {
                self.roots.push(node);
                continue;
            }
            match find_comment_mut(&mut self.roots, &parent) {
                Some(c) => c.replies.push(node),
                None => self.roots.push(node),
            }
        }
    }

    /// Breadth-first list of comments; replies are moved out of each item.
    pub fn flatten(self) -> Vec<RawComment> {
        let mut out = Vec::new();
        let mut queue: VecDeque<CommentNode> = self.roots.into();
        while let Some(node) = queue.pop_front() {
            if let CommentNode::Comment(mut c) = node {
                queue.extend(std::mem::take(&mut c.replies));
                out.push(c);
            }
        }
        out
    }
}

fn largest_more(nodes: &[CommentNode]) -> Option<String> {
    fn walk<'a>(nodes: &'a [CommentNode], best: &mut Option<&'a MoreComments>) {
        for n in nodes {
            match n {
                CommentNode::More(m) => {
                    if best.map_or(true, |b| m.count > b.count) {
                        *best = Some(m);
                    }
                }
                CommentNode::Comment(c) => walk(&c.replies, best),
            }
        }
    }
    let mut best = None;
    walk(nodes, &mut best);
    best.map(|m| m.id.clone())
}

fn remove_more(nodes: &mut Vec<CommentNode>, id: &str) -> Option<MoreComments> {
    if let Some(pos) = nodes.iter().position(|n| matches!(n, CommentNode::More(m) if m.id == id)) {
        if let CommentNode::More(m) = nodes.remove(pos) {
            return Some(m);
        }
    }
    nodes.iter_mut().find_map(|n| match n {
        CommentNode::Comment(c) => remove_more(&mut c.replies, id),
        CommentNode::More(_) => None,
    })
}

fn strip_more(nodes: &mut Vec<CommentNode>) {
    nodes.retain(|n| matches!(n, CommentNode::Comment(_)));
    for n in nodes.iter_mut() {
        if let CommentNode::Comment(c) = n {
            strip_more(&mut c.replies);
        }
    }
}

fn find_comment_mut<'a>(nodes: &'a mut [CommentNode], fullname: &str) -> Option<&'a mut RawComment> {
    for n in nodes.iter_mut() {
        if let CommentNode::Comment(c) = n {
            if c.fullname() == fullname {
                return Some(c);
            }
            if let Some(found) = find_comment_mut(&mut c.replies, fullname) {
                return Some(found);
            }
        }
    }
    None
}

/// Fetch a post's comments: tree, `more_expansions` placeholder expansions,
/// breadth-first flatten, first `cap` items.
pub fn fetch_comments<C: ForumClient + ?Sized>(
    client: &mut C,
    post: &RawPost,
    more_expansions: usize,
    cap: usize,
) -> Result<Vec<RawComment>> {
    let mut tree = CommentTree::new(client.comment_tree(post)?);
    tree.replace_more(client, post, more_expansions)?;
    let mut flat = tree.flatten();
    flat.truncate(cap);
    Ok(flat)
}
