use anyhow::Result;
use forum_harvest::{init_tracing_once, Harvester, LexiconNormalizer, RedditClient};

const OUT_DIR: &str = ".";
const SOURCE_TAG: &str = "r";

fn main() -> Result<()> {
    init_tracing_once();

    let mut client = RedditClient::from_env()?;
    let normalizer = LexiconNormalizer::new();

    // Forums, quota, comment cap, pause and retry policy are the HarvestOptions defaults.
    let summary = Harvester::new()
        .out_dir(OUT_DIR)
        .source_tag(SOURCE_TAG)
        .progress(true)
        .run(&mut client, &normalizer)?;

    for f in &summary.forums {
        if f.gave_up {
            eprintln!(
                "r/{}: stopped after {} page failures (use RetryPolicy::unbounded() to retry forever)",
                f.forum, f.page_failures
            );
        }
    }
    println!("\nExport completed: {} / {}", summary.export.posts_path.display(), summary.export.comments_path.display());
    println!("Total posts collected: {}", summary.total_posts);
    println!("Total comments collected: {}", summary.total_comments);
    println!("Forums processed: {}", summary.forums.len());
    Ok(())
}
