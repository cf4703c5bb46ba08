#[path = "common/mod.rs"]
mod common;

use common::*;
use forum_harvest::{Harvester, LexiconNormalizer, RetryPolicy, DEFAULT_FORUMS};
use std::time::Duration;

/// End-to-end over a scripted API with two forums:
/// - forums are processed in order, each with its own pagination;
/// - a post cross-posted into both listings is exported once;
/// - every exported comment points at an exported post.
#[test]
fn run_collects_forums_in_order_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let mut client = FakeForum::new()
        .page("Liberal", Page::Posts(vec![post("a1", "Liberal"), post("shared", "Liberal")]))
        .page("politics", Page::Posts(vec![post("shared", "politics"), post("b1", "politics")]))
        .tree("a1", vec![with_replies(
            comment("c1", "a1", "t3_a1", "Voters are angry; really angry"),
            vec![node(comment("c2", "a1", "t1_c1", "Why?"))],
        )])
        .tree("shared", vec![node(comment("c3", "shared", "t3_shared", "same thread"))]);

    let summary = Harvester::new()
        .forums(["r/Liberal", "politics"])
        .posts_per_forum(10)
        .forum_delay(Duration::ZERO)
        .retry(RetryPolicy::unbounded())
        .out_dir(dir.path())
        .source_tag("test")
        .progress(false)
        .run(&mut client, &LexiconNormalizer::new())
        .unwrap();

    let order: Vec<&str> = summary.forums.iter().map(|f| f.forum.as_str()).collect();
    assert_eq!(order, ["Liberal", "politics"]);
    assert_eq!(summary.total_posts, 4);
    assert_eq!(summary.export.post_rows, 3);
    assert_eq!(summary.export.comment_rows, 3);
    assert!(client.page_requests.iter().any(|(f, _)| f == "politics"));

    let posts = read_rows(&dir.path().join("posts_test.csv"));
    let post_ids: Vec<&str> = posts[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(post_ids, ["a1", "shared", "b1"]);
    // The first listing that saw the shared post wins.
    assert_eq!(posts[2][1], "Liberal");

    let comments = read_rows(&dir.path().join("comments_test.csv"));
    for row in &comments[1..] {
        assert!(post_ids.contains(&row[1].as_str()), "orphan comment row {row:?}");
    }
    let c1 = comments.iter().find(|r| r[0] == "c1").unwrap();
    assert_eq!(c1[4], "Voters are angry, really angry");
    assert_eq!(c1[5], "voter angry angry");
    let c2 = comments.iter().find(|r| r[0] == "c2").unwrap();
    assert_eq!(c2[3], "c1");
}

/// A forum whose listing is empty contributes nothing but the run still exports.
#[test]
fn empty_forum_still_exports_headers() {
    let dir = tempfile::tempdir().unwrap();
    let mut client = FakeForum::new();

    let summary = Harvester::new()
        .forums(["quiet"])
        .forum_delay(Duration::ZERO)
        .out_dir(dir.path())
        .progress(false)
        .run(&mut client, &LowercaseNormalizer)
        .unwrap();

    assert_eq!(summary.total_posts, 0);
    assert!(summary.forums[0].exhausted);
    assert_eq!(read_lines(&summary.export.posts_path).len(), 1);
    assert_eq!(read_lines(&summary.export.comments_path).len(), 1);
}

/// A bare harvester carries the full run configuration used by the binary.
#[test]
fn default_harvester_uses_documented_run_settings() {
    let h = Harvester::new();
    let o = h.options();
    assert_eq!(o.forums, DEFAULT_FORUMS);
    assert_eq!(o.posts_per_forum, 1000);
    assert_eq!(o.comments_per_post, 30);
    assert_eq!(o.forum_delay, Duration::from_secs(10));
    assert_eq!(o.source_tag, "r");
    assert_eq!(o.retry, RetryPolicy::default());
}
