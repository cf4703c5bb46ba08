use crate::client::ForumClient;
use crate::collect::{Collector, ForumHarvest};
use crate::config::{HarvestOptions, RetryPolicy};
use crate::export::{export_tables, ExportReport};
use crate::models::PostRecord;
use crate::normalize::TextNormalizer;
use crate::util::{init_tracing_once, pause};
use anyhow::Result;
use std::path::Path;
use std::time::Duration;

/// Per-forum counters kept after the records move into the export.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForumStats {
    pub forum: String,
    pub posts: usize,
    pub comments: usize,
    pub pages: u64,
    pub page_failures: u64,
    pub rejected: u64,
    pub skipped: u64,
    pub exhausted: bool,
    pub gave_up: bool,
}

impl From<&ForumHarvest> for ForumStats {
    fn from(h: &ForumHarvest) -> Self {
        Self {
            forum: h.forum.clone(),
            posts: h.posts.len(),
            comments: h.comment_count(),
            pages: h.pages,
            page_failures: h.page_failures,
            rejected: h.rejected,
            skipped: h.skipped,
            exhausted: h.exhausted,
            gave_up: h.gave_up,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub forums: Vec<ForumStats>,
    pub total_posts: usize,
    pub total_comments: usize,
    pub export: ExportReport,
}

/// Drives a full run: every forum in order, a pause between forums, then export.
#[derive(Clone, Debug, Default)]
pub struct Harvester {
    pub(crate) opts: HarvestOptions,
}

impl Harvester {
    pub fn new() -> Self {
        Self { opts: HarvestOptions::default() }
    }

    pub fn with_options(opts: HarvestOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &HarvestOptions {
        &self.opts
    }

    // -------- Builder methods --------
    pub fn forums<I, S>(mut self, forums: I) -> Self where I: IntoIterator<Item = S>, S: AsRef<str> { self.opts = self.opts.with_forums(forums); self }
    pub fn posts_per_forum(mut self, n: usize) -> Self { self.opts = self.opts.with_posts_per_forum(n); self }
    pub fn comments_per_post(mut self, n: usize) -> Self { self.opts = self.opts.with_comments_per_post(n); self }
    pub fn page_size(mut self, n: usize) -> Self { self.opts = self.opts.with_page_size(n); self }
    pub fn more_expansions(mut self, n: usize) -> Self { self.opts = self.opts.with_more_expansions(n); self }
    pub fn forum_delay(mut self, d: Duration) -> Self { self.opts = self.opts.with_forum_delay(d); self }
    pub fn retry(mut self, retry: RetryPolicy) -> Self { self.opts = self.opts.with_retry(retry); self }
    pub fn out_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_out_dir(dir); self }
    pub fn source_tag(mut self, tag: impl Into<String>) -> Self { self.opts = self.opts.with_source_tag(tag); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }

    /// Collect every configured forum, in order, without exporting.
    pub fn collect_all<C, N>(&self, client: &mut C, normalizer: &N) -> Vec<ForumHarvest>
    where
        C: ForumClient + ?Sized,
        N: TextNormalizer + ?Sized,
    {
        init_tracing_once();
        let mut harvests = Vec::with_capacity(self.opts.forums.len());
        for (i, forum) in self.opts.forums.iter().enumerate() {
            if i > 0 {
                tracing::debug!(delay_ms = self.opts.forum_delay.as_millis() as u64, "pausing between forums");
                pause(self.opts.forum_delay);
            }
            tracing::info!(forum = %forum, "collecting");
            let mut collector = Collector::new(&mut *client, normalizer, &self.opts);
            harvests.push(collector.collect_forum(forum));
        }
        harvests
    }

    /// Full run: collect, then write both tables. Export I/O errors are returned.
    pub fn run<C, N>(&self, client: &mut C, normalizer: &N) -> Result<RunSummary>
    where
        C: ForumClient + ?Sized,
        N: TextNormalizer + ?Sized,
    {
        let harvests = self.collect_all(client, normalizer);
        let forums: Vec<ForumStats> = harvests.iter().map(ForumStats::from).collect();
        let all: Vec<PostRecord> = harvests.into_iter().flat_map(|h| h.posts).collect();
        let total_comments = all.iter().map(|p| p.comments.len()).sum();

        let export = export_tables(&all, &self.opts.out_dir, &self.opts.source_tag)?;
        Ok(RunSummary { forums, total_posts: all.len(), total_comments, export })
    }
}
