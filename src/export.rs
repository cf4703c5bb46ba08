//! Flatten collected posts into the posts/comments tables, drop duplicate ids
//! (first occurrence wins) and write them as `;`-delimited CSV.

use crate::models::{CommentRecord, PostRecord};
use crate::util::promote_file;
use ahash::AHashSet;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Written in place of an absent author or parent id.
pub const MISSING: &str = "NA";
pub const DELIMITER: u8 = b';';

#[derive(Debug, Serialize)]
pub struct PostRow<'a> {
    pub post_id: &'a str,
    pub subreddit: &'a str,
    pub title: &'a str,
    pub text: &'a str,
    pub clean_text: &'a str,
    pub author: &'a str,
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: u64,
}

impl<'a> From<&'a PostRecord> for PostRow<'a> {
    fn from(p: &'a PostRecord) -> Self {
        Self {
            post_id: &p.post_id,
            subreddit: &p.subreddit,
            title: &p.title,
            text: &p.text,
            clean_text: &p.clean_text,
            author: p.author.as_deref().unwrap_or(MISSING),
            score: p.score,
            upvote_ratio: p.upvote_ratio,
            num_comments: p.num_comments,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentRow<'a> {
    pub comment_id: &'a str,
    pub post_id: &'a str,
    pub author: &'a str,
    pub parent_id: &'a str,
    pub body: &'a str,
    pub clean_body: &'a str,
    pub score: i64,
}

impl<'a> From<&'a CommentRecord> for CommentRow<'a> {
    fn from(c: &'a CommentRecord) -> Self {
        Self {
            comment_id: &c.comment_id,
            post_id: &c.post_id,
            author: c.author.as_deref().unwrap_or(MISSING),
            parent_id: c.parent_id.as_deref().unwrap_or(MISSING),
            body: &c.body,
            clean_body: &c.clean_body,
            score: c.score,
        }
    }
}

/// Post rows (comments dropped), first occurrence of each id only.
pub fn posts_table(posts: &[PostRecord]) -> Vec<PostRow<'_>> {
    let mut seen: AHashSet<&str> = AHashSet::with_capacity(posts.len());
    posts
        .iter()
        .filter(|p| seen.insert(p.post_id.as_str()))
        .map(PostRow::from)
        .collect()
}

/// Comments of every post record, flattened in post order, first occurrence
/// of each id only.
pub fn comments_table(posts: &[PostRecord]) -> Vec<CommentRow<'_>> {
    let mut seen: AHashSet<&str> = AHashSet::new();
    posts
        .iter()
        .flat_map(|p| p.comments.iter())
        .filter(|c| seen.insert(c.comment_id.as_str()))
        .map(CommentRow::from)
        .collect()
}

fn write_rows<W: Write, R: Serialize>(w: W, headers: &[&str], rows: &[R]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_writer(w);
    // Written explicitly so an empty table still carries its header row.
    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub const POST_COLUMNS: [&str; 9] = [
    "post_id", "subreddit", "title", "text", "clean_text", "author", "score", "upvote_ratio",
    "num_comments",
];
pub const COMMENT_COLUMNS: [&str; 7] =
    ["comment_id", "post_id", "author", "parent_id", "body", "clean_body", "score"];

pub fn write_posts_csv<W: Write>(w: W, rows: &[PostRow<'_>]) -> Result<()> {
    write_rows(w, &POST_COLUMNS, rows)
}

pub fn write_comments_csv<W: Write>(w: W, rows: &[CommentRow<'_>]) -> Result<()> {
    write_rows(w, &COMMENT_COLUMNS, rows)
}

/// Paths and row counts of one export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    pub posts_path: PathBuf,
    pub comments_path: PathBuf,
    pub post_rows: usize,
    pub comment_rows: usize,
}

fn write_file_atomic(path: &Path, f: impl FnOnce(BufWriter<File>) -> Result<()>) -> Result<()> {
    let tmp = path.with_extension("csv.inprogress");
    let file = File::create(&tmp).with_context(|| format!("create {}", tmp.display()))?;
    f(BufWriter::new(file)).with_context(|| format!("write {}", tmp.display()))?;
    promote_file(&tmp, path)
}

/// Write `posts_<tag>.csv` and `comments_<tag>.csv` into `out_dir`.
pub fn export_tables(posts: &[PostRecord], out_dir: &Path, source_tag: &str) -> Result<ExportReport> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    let posts_path = out_dir.join(format!("posts_{source_tag}.csv"));
    let comments_path = out_dir.join(format!("comments_{source_tag}.csv"));

    let post_rows = posts_table(posts);
    let comment_rows = comments_table(posts);

    write_file_atomic(&posts_path, |w| write_posts_csv(w, &post_rows))?;
    write_file_atomic(&comments_path, |w| write_comments_csv(w, &comment_rows))?;

    tracing::info!(
        posts = post_rows.len(),
        comments = comment_rows.len(),
        dropped_posts = posts.len() - post_rows.len(),
        path = %posts_path.display(),
        "export written"
    );
    Ok(ExportReport {
        post_rows: post_rows.len(),
        comment_rows: comment_rows.len(),
        posts_path,
        comments_path,
    })
}
