use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_FORUMS: [&str; 6] = [
    "Conservative",
    "Liberal",
    "PoliticalDiscussion",
    "Republican",
    "democrats",
    "politics",
];

/// How page-fetch failures are retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Give up on a forum after this many consecutive failures; `None` retries forever.
    pub max_consecutive: Option<u32>,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

/// Default: give up on a forum after 5 consecutive page failures, waiting
/// 2 s more per attempt (at most 30 s). [`RetryPolicy::unbounded`] retries
/// forever without pausing.
impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_consecutive: Some(5),
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Legacy behavior: retry forever, no pause.
    pub fn unbounded() -> Self {
        Self { max_consecutive: None, base_delay: Duration::ZERO, max_delay: Duration::ZERO }
    }

    /// Linear backoff for the `attempt`-th consecutive failure (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt.max(1)).min(self.max_delay)
    }

    pub fn exhausted(&self, consecutive_failures: u32) -> bool {
        self.max_consecutive.is_some_and(|max| consecutive_failures > max)
    }
}

/// Run configuration with defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct HarvestOptions {
    pub forums: Vec<String>,          // names without "r/"
    pub posts_per_forum: usize,       // quota of collected posts per forum
    pub comments_per_post: usize,     // cap applied to the flattened tree
    pub page_size: usize,             // posts requested per page
    pub more_expansions: usize,       // "load more" placeholders expanded per post
    pub forum_delay: Duration,        // pause between forums
    pub retry: RetryPolicy,
    pub out_dir: PathBuf,
    pub source_tag: String,           // posts_<tag>.csv / comments_<tag>.csv
    pub progress: bool,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            forums: DEFAULT_FORUMS.iter().map(|s| s.to_string()).collect(),
            posts_per_forum: 1000,
            comments_per_post: 30,
            page_size: 100,
            more_expansions: 1,
            forum_delay: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            out_dir: PathBuf::from("."),
            source_tag: "r".to_string(),
            progress: true,
        }
    }
}

fn normalize_forum(name: &str) -> String {
    let s = name.trim().trim_start_matches('/');
    s.strip_prefix("r/").unwrap_or(s).to_string()
}

impl HarvestOptions {
    pub fn with_forums<I, S>(mut self, forums: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.forums = forums
            .into_iter()
            .map(|s| normalize_forum(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        self
    }
    pub fn with_posts_per_forum(mut self, n: usize) -> Self {
        self.posts_per_forum = n;
        self
    }
    pub fn with_comments_per_post(mut self, n: usize) -> Self {
        self.comments_per_post = n;
        self
    }
    pub fn with_page_size(mut self, n: usize) -> Self {
        self.page_size = n.clamp(1, 100);
        self
    }
    pub fn with_more_expansions(mut self, n: usize) -> Self {
        self.more_expansions = n;
        self
    }
    pub fn with_forum_delay(mut self, d: Duration) -> Self {
        self.forum_delay = d;
        self
    }
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
    pub fn with_out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.out_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_source_tag(mut self, tag: impl Into<String>) -> Self {
        self.source_tag = tag.into();
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
}
