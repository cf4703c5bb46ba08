mod config;
mod models;
mod util;
mod progress;

mod lexicon;
mod normalize;
mod validate;
mod mapper;

mod client;
mod things;
mod reddit;

mod collect;
mod export;
mod pipeline;

pub use crate::config::{HarvestOptions, RetryPolicy, DEFAULT_FORUMS};
pub use crate::models::{CommentNode, CommentRecord, MoreComments, PostRecord, RawComment, RawPost};
pub use crate::pipeline::{ForumStats, Harvester, RunSummary};

// Text normalization seam and the default rule-based implementation.
pub use crate::lexicon::{is_stopword, lemmatize};
pub use crate::normalize::{LexiconNormalizer, TextNormalizer};

// Validation and record mapping.
pub use crate::validate::{is_removed_body, is_valid_post, REMOVAL_SENTINELS};
pub use crate::mapper::{parse_parent_id, sanitize_field, strip_kind_prefix, RecordMapper};

// Forum API seam, comment-tree helpers and the Reddit HTTP client.
pub use crate::client::{fetch_comments, CommentTree, ForumClient};
pub use crate::reddit::{user_agent_from_env, Credentials, RedditClient, DEFAULT_USER_AGENT};
pub use crate::things::{comment_nodes_from_response, nodes_from_morechildren, posts_from_listing, Listing};

// Collection loop and export.
pub use crate::collect::{Collector, ForumHarvest, PageOutcome, PostOutcome};
pub use crate::export::{
    comments_table, export_tables, posts_table, write_comments_csv, write_posts_csv, CommentRow,
    ExportReport, PostRow, COMMENT_COLUMNS, MISSING, POST_COLUMNS,
};

pub use crate::util::init_tracing_once;
