//! Per-forum collection loop: paginate newest posts, validate, map, attach
//! comments, stop at the quota or when the source runs dry.

use crate::client::{fetch_comments, ForumClient};
use crate::config::HarvestOptions;
use crate::mapper::RecordMapper;
use crate::models::{PostRecord, RawPost};
use crate::normalize::TextNormalizer;
use crate::progress::ProgressScope;
use crate::util::pause;
use crate::validate::{is_removed_body, is_valid_post};

/// Result of requesting one page of posts.
#[derive(Debug)]
pub enum PageOutcome {
    Posts(Vec<RawPost>),
    Exhausted,
    Retry(anyhow::Error),
}

/// Result of processing one fetched post.
#[derive(Debug)]
pub enum PostOutcome {
    Collected(PostRecord),
    Rejected,
    Skipped(anyhow::Error),
}

/// What one forum produced, plus counters for the run summary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForumHarvest {
    pub forum: String,
    pub posts: Vec<PostRecord>,
    pub pages: u64,
    pub page_failures: u64,
    pub rejected: u64,
    pub skipped: u64,
    pub exhausted: bool,
    pub gave_up: bool,
}

impl ForumHarvest {
    pub fn comment_count(&self) -> usize {
        self.posts.iter().map(|p| p.comments.len()).sum()
    }
}

pub struct Collector<'a, C: ForumClient + ?Sized, N: TextNormalizer + ?Sized> {
    client: &'a mut C,
    mapper: RecordMapper<'a, N>,
    opts: &'a HarvestOptions,
}

impl<'a, C: ForumClient + ?Sized, N: TextNormalizer + ?Sized> Collector<'a, C, N> {
    pub fn new(client: &'a mut C, normalizer: &'a N, opts: &'a HarvestOptions) -> Self {
        Self { client, mapper: RecordMapper::new(normalizer), opts }
    }

    pub fn fetch_page(&mut self, forum: &str, after: Option<&str>) -> PageOutcome {
        match self.client.new_posts(forum, self.opts.page_size, after) {
            Ok(posts) if posts.is_empty() => PageOutcome::Exhausted,
            Ok(posts) => PageOutcome::Posts(posts),
            Err(e) => PageOutcome::Retry(e),
        }
    }

    pub fn process_post(&mut self, post: &RawPost) -> PostOutcome {
        if !is_valid_post(post) {
            return PostOutcome::Rejected;
        }
        let mut record = self.mapper.map_post(post);
        let comments = match fetch_comments(
            &mut *self.client,
            post,
            self.opts.more_expansions,
            self.opts.comments_per_post,
        ) {
            Ok(c) => c,
            Err(e) => return PostOutcome::Skipped(e),
        };
        record.comments = comments
            .iter()
            .filter(|c| !is_removed_body(&c.body))
            .map(|c| self.mapper.map_comment(c))
            .collect();
        PostOutcome::Collected(record)
    }

    pub fn collect_forum(&mut self, forum: &str) -> ForumHarvest {
        let quota = self.opts.posts_per_forum;
        let mut out = ForumHarvest { forum: forum.to_string(), ..Default::default() };
        let pb = ProgressScope::count(format!("r/{forum}"), quota as u64, self.opts.progress);

        let mut after: Option<String> = None;
        let mut consecutive_failures = 0u32;

        'pages: while out.posts.len() < quota {
            let page = match self.fetch_page(forum, after.as_deref()) {
                PageOutcome::Posts(page) => page,
                PageOutcome::Exhausted => {
                    tracing::info!(forum, collected = out.posts.len(), "no more posts available");
                    out.exhausted = true;
                    break;
                }
                PageOutcome::Retry(e) => {
                    out.page_failures += 1;
                    consecutive_failures += 1;
                    tracing::warn!(forum, attempt = consecutive_failures, error = %format!("{e:#}"), "page fetch failed");
                    if self.opts.retry.exhausted(consecutive_failures) {
                        tracing::error!(forum, failures = consecutive_failures, "giving up on forum after repeated page failures");
                        out.gave_up = true;
                        break;
                    }
                    pause(self.opts.retry.delay_for(consecutive_failures));
                    continue;
                }
            };
            consecutive_failures = 0;
            out.pages += 1;

            let mut advanced = false;
            for post in &page {
                match self.process_post(post) {
                    PostOutcome::Collected(record) => {
                        out.posts.push(record);
                        pb.inc_items(1);
                        after = Some(post.fullname());
                        advanced = true;
                        if out.posts.len() >= quota {
                            break 'pages;
                        }
                    }
                    PostOutcome::Rejected => out.rejected += 1,
                    PostOutcome::Skipped(e) => {
                        out.skipped += 1;
                        tracing::warn!(forum, post = %post.id, error = %format!("{e:#}"), "comment fetch failed; skipping post");
                    }
                }
            }
            // A page with nothing collected must still move the cursor.
            if !advanced {
                after = page.last().map(RawPost::fullname);
            }
        }

        out.posts.truncate(quota);
        pb.finish(format!("r/{forum}: {} posts", out.posts.len()));
        tracing::info!(
            forum,
            posts = out.posts.len(),
            comments = out.comment_count(),
            pages = out.pages,
            rejected = out.rejected,
            skipped = out.skipped,
            page_failures = out.page_failures,
            "forum done"
        );
        out
    }
}
