#[path = "common/mod.rs"]
mod common;

use common::*;
use forum_harvest::{Collector, HarvestOptions, RetryPolicy};

fn opts() -> HarvestOptions {
    HarvestOptions::default()
        .with_progress(false)
        .with_retry(RetryPolicy::unbounded())
}

/// Quota 2 with three valid posts on one page: exactly the first two are
/// returned, in order, and no further page is requested.
#[test]
fn stops_at_quota_without_requesting_another_page() {
    let mut client = FakeForum::new().page(
        "f",
        Page::Posts(vec![post("p1", "f"), post("p2", "f"), post("p3", "f")]),
    );
    let opts = opts().with_posts_per_forum(2);
    let n = LowercaseNormalizer;

    let harvest = Collector::new(&mut client, &n, &opts).collect_forum("f");

    let got: Vec<&str> = harvest.posts.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(got, ["p1", "p2"]);
    assert_eq!(client.page_requests.len(), 1);
    assert!(!harvest.exhausted);
}

/// A post whose comments cannot be fetched is left out; the loop goes on.
#[test]
fn comment_failure_skips_only_that_post() {
    let mut client = FakeForum::new()
        .page("f", Page::Posts(vec![post("p1", "f"), post("p2", "f"), post("p3", "f")]))
        .failing_comments_for("p2")
        .tree("p3", vec![node(comment("c1", "p3", "t3_p3", "hello"))]);
    let opts = opts();
    let n = LowercaseNormalizer;

    let harvest = Collector::new(&mut client, &n, &opts).collect_forum("f");

    let got: Vec<&str> = harvest.posts.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(got, ["p1", "p3"]);
    assert_eq!(harvest.skipped, 1);
    assert_eq!(harvest.posts[1].comments.len(), 1);
    assert_eq!(harvest.posts[1].comments[0].post_id, "p3");
    assert!(harvest.exhausted);
}

/// Zero eligible comments still yields a post record with an empty list.
#[test]
fn post_without_eligible_comments_is_collected() {
    let mut client = FakeForum::new()
        .page("f", Page::Posts(vec![post("p1", "f")]))
        .tree(
            "p1",
            vec![
                node(comment("c1", "p1", "t3_p1", "[deleted]")),
                node(comment("c2", "p1", "t3_p1", "[removed]")),
            ],
        );
    let opts = opts();
    let n = LowercaseNormalizer;

    let harvest = Collector::new(&mut client, &n, &opts).collect_forum("f");
    assert_eq!(harvest.posts.len(), 1);
    assert!(harvest.posts[0].comments.is_empty());
}

/// Invalid posts are filtered, and the cursor for the next page is the
/// fullname of the last collected post.
#[test]
fn cursor_follows_last_collected_post() {
    let mut removed = post("p2", "f");
    removed.selftext = "[removed]".to_string();
    let mut client = FakeForum::new()
        .page("f", Page::Posts(vec![post("p1", "f"), removed]))
        .page("f", Page::Posts(vec![post("p3", "f")]));
    let opts = opts();
    let n = LowercaseNormalizer;

    let harvest = Collector::new(&mut client, &n, &opts).collect_forum("f");

    assert_eq!(harvest.posts.len(), 2);
    assert_eq!(harvest.rejected, 1);
    let cursors: Vec<Option<&str>> = client.page_requests.iter().map(|(_, a)| a.as_deref()).collect();
    assert_eq!(cursors, [None, Some("t3_p1"), Some("t3_p3")]);
}

/// A page where nothing is collected moves the cursor to its last post.
#[test]
fn cursor_advances_past_fully_rejected_page() {
    let mut a = post("p1", "f");
    a.author = None;
    let mut b = post("p2", "f");
    b.author = None;
    let mut client = FakeForum::new().page("f", Page::Posts(vec![a, b]));
    let opts = opts();
    let n = LowercaseNormalizer;

    let harvest = Collector::new(&mut client, &n, &opts).collect_forum("f");

    assert!(harvest.posts.is_empty());
    assert_eq!(client.page_requests[1].1.as_deref(), Some("t3_p2"));
}

/// Page failures are retried and counted; collection resumes afterwards.
#[test]
fn page_failures_are_retried() {
    let mut client = FakeForum::new()
        .page("f", Page::Fail("503"))
        .page("f", Page::Fail("timeout"))
        .page("f", Page::Posts(vec![post("p1", "f")]));
    let opts = opts();
    let n = LowercaseNormalizer;

    let harvest = Collector::new(&mut client, &n, &opts).collect_forum("f");

    assert_eq!(harvest.page_failures, 2);
    assert_eq!(harvest.posts.len(), 1);
    assert!(!harvest.gave_up);
}

/// A bounded policy stops the forum after too many consecutive failures.
#[test]
fn bounded_retry_gives_up() {
    let mut client = FakeForum::new();
    for _ in 0..10 {
        client = client.page("f", Page::Fail("down"));
    }
    let retry = RetryPolicy {
        max_consecutive: Some(2),
        base_delay: std::time::Duration::ZERO,
        max_delay: std::time::Duration::ZERO,
    };
    let opts = opts().with_retry(retry);
    let n = LowercaseNormalizer;

    let harvest = Collector::new(&mut client, &n, &opts).collect_forum("f");

    assert!(harvest.gave_up);
    assert_eq!(harvest.page_failures, 3);
    assert_eq!(client.page_requests.len(), 3);
}

#[test]
fn retry_delay_is_linear_and_capped() {
    let r = RetryPolicy::default();
    assert_eq!(r.delay_for(1), std::time::Duration::from_secs(2));
    assert_eq!(r.delay_for(3), std::time::Duration::from_secs(6));
    assert_eq!(r.delay_for(100), std::time::Duration::from_secs(30));
}

/// The default policy stops after 5 consecutive failures; the unbounded one never does.
#[test]
fn default_retry_is_bounded_unbounded_never_gives_up() {
    let r = RetryPolicy::default();
    assert_eq!(r.max_consecutive, Some(5));
    assert!(!r.exhausted(5));
    assert!(r.exhausted(6));

    let forever = RetryPolicy::unbounded();
    assert!(!forever.exhausted(u32::MAX));
    assert_eq!(forever.delay_for(7), std::time::Duration::ZERO);
}
