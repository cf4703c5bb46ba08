#![allow(dead_code)]

use anyhow::{anyhow, Result};
use forum_harvest::{CommentNode, ForumClient, MoreComments, RawComment, RawPost, TextNormalizer};
use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A post by "bob" with a plain body.
pub fn post(id: &str, forum: &str) -> RawPost {
    RawPost {
        id: id.to_string(),
        subreddit: forum.to_string(),
        title: format!("Title {id}"),
        selftext: format!("Body of {id}"),
        author: Some("bob".to_string()),
        score: 10,
        upvote_ratio: 0.9,
        num_comments: 2,
        removed_by_category: None,
    }
}

pub fn comment(id: &str, post_id: &str, parent: &str, body: &str) -> RawComment {
    RawComment {
        id: id.to_string(),
        link_id: format!("t3_{post_id}"),
        parent_id: parent.to_string(),
        author: Some("alice".to_string()),
        body: body.to_string(),
        score: 1,
        replies: Vec::new(),
    }
}

pub fn node(c: RawComment) -> CommentNode {
    CommentNode::Comment(c)
}

pub fn with_replies(mut c: RawComment, replies: Vec<CommentNode>) -> CommentNode {
    c.replies = replies;
    CommentNode::Comment(c)
}

pub fn more(id: &str, parent: &str, children: &[&str]) -> CommentNode {
    CommentNode::More(MoreComments {
        id: id.to_string(),
        parent_id: parent.to_string(),
        count: children.len() as u64,
        children: children.iter().map(|s| s.to_string()).collect(),
    })
}

/// Scripted page response.
pub enum Page {
    Posts(Vec<RawPost>),
    Fail(&'static str),
}

/// In-memory forum API. Pages are served in order per forum; once a forum's
/// script is used up it returns empty pages. Every request is recorded.
#[derive(Default)]
pub struct FakeForum {
    pub pages: HashMap<String, VecDeque<Page>>,
    pub trees: HashMap<String, Vec<CommentNode>>,
    pub expansions: HashMap<String, Vec<CommentNode>>,
    pub failing_comments: Vec<String>,
    pub page_requests: Vec<(String, Option<String>)>,
    pub expand_requests: Vec<String>,
}

impl FakeForum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, forum: &str, page: Page) -> Self {
        self.pages.entry(forum.to_string()).or_default().push_back(page);
        self
    }

    pub fn tree(mut self, post_id: &str, nodes: Vec<CommentNode>) -> Self {
        self.trees.insert(post_id.to_string(), nodes);
        self
    }

    pub fn expansion(mut self, more_id: &str, nodes: Vec<CommentNode>) -> Self {
        self.expansions.insert(more_id.to_string(), nodes);
        self
    }

    pub fn failing_comments_for(mut self, post_id: &str) -> Self {
        self.failing_comments.push(post_id.to_string());
        self
    }
}

impl ForumClient for FakeForum {
    fn new_posts(&mut self, forum: &str, _limit: usize, after: Option<&str>) -> Result<Vec<RawPost>> {
        self.page_requests.push((forum.to_string(), after.map(str::to_string)));
        match self.pages.get_mut(forum).and_then(|q| q.pop_front()) {
            Some(Page::Posts(p)) => Ok(p),
            Some(Page::Fail(msg)) => Err(anyhow!(msg)),
            None => Ok(Vec::new()),
        }
    }

    fn comment_tree(&mut self, post: &RawPost) -> Result<Vec<CommentNode>> {
        if self.failing_comments.contains(&post.id) {
            return Err(anyhow!("comments unavailable for {}", post.id));
        }
        Ok(self.trees.get(&post.id).cloned().unwrap_or_default())
    }

    fn expand_more(&mut self, _post: &RawPost, more: &MoreComments) -> Result<Vec<CommentNode>> {
        self.expand_requests.push(more.id.clone());
        Ok(self.expansions.get(&more.id).cloned().unwrap_or_default())
    }
}

/// Normalizer that only lowercases, so tests can assert exact text.
pub struct LowercaseNormalizer;

impl TextNormalizer for LowercaseNormalizer {
    fn normalize(&self, text: &str) -> String {
        text.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join(" ")
    }
}

/// Read a `;`-delimited file into rows of fields (header included).
pub fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .unwrap();
    rdr.records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

pub fn read_lines(path: &Path) -> Vec<String> {
    let f = File::open(path).unwrap();
    BufReader::new(f).lines().map(|l| l.unwrap()).collect()
}
