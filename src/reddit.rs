//! Blocking HTTP client for the Reddit JSON API.
//!
//! With credentials it uses the app-only OAuth flow against
//! `oauth.reddit.com`; without, it falls back to the public `.json` endpoints
//! on `www.reddit.com`, which are rate limited harder.

use crate::client::ForumClient;
use crate::models::{CommentNode, MoreComments, RawPost};
use crate::things::{comment_nodes_from_response, nodes_from_morechildren, posts_from_listing, Listing};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};

pub const DEFAULT_USER_AGENT: &str = "forum-harvest/0.1";
const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const OAUTH_BASE: &str = "https://oauth.reddit.com";
const PUBLIC_BASE: &str = "https://www.reddit.com";
/// Refresh this long before the server-side expiry.
const TOKEN_SLACK: Duration = Duration::from_secs(60);

/// Script-app credentials for the client-credentials grant.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// Reads `REDDIT_CLIENT_ID` and `REDDIT_CLIENT_SECRET`; `None` unless both are set.
    pub fn from_env() -> Option<Self> {
        let id = std::env::var("REDDIT_CLIENT_ID").ok()?;
        let secret = std::env::var("REDDIT_CLIENT_SECRET").ok()?;
        if id.trim().is_empty() || secret.trim().is_empty() {
            return None;
        }
        Some(Self { client_id: id.trim().to_string(), client_secret: secret.trim().to_string() })
    }
}

/// `REDDIT_USER_AGENT` or the crate default.
pub fn user_agent_from_env() -> String {
    std::env::var("REDDIT_USER_AGENT")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expiry")]
    expires_in: u64,
}

fn default_expiry() -> u64 {
    3600
}

struct Token {
    value: String,
    expires_at: Instant,
}

pub struct RedditClient {
    http: Client,
    credentials: Option<Credentials>,
    token: Option<Token>,
}

impl RedditClient {
    pub fn new(credentials: Option<Credentials>, user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, credentials, token: None })
    }

    /// Client configured from the environment (see `Credentials::from_env`).
    pub fn from_env() -> Result<Self> {
        let creds = Credentials::from_env();
        if creds.is_none() {
            tracing::warn!("REDDIT_CLIENT_ID/REDDIT_CLIENT_SECRET not set; using anonymous public endpoints");
        }
        Self::new(creds, &user_agent_from_env())
    }

    fn bearer(&mut self) -> Result<Option<String>> {
        let Some(creds) = &self.credentials else { return Ok(None) };
        if let Some(t) = &self.token {
            if Instant::now() + TOKEN_SLACK < t.expires_at {
                return Ok(Some(t.value.clone()));
            }
        }
        let resp: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .context("token request")?
            .error_for_status()
            .context("token request rejected")?
            .json()
            .context("decode token response")?;
        tracing::debug!(expires_in = resp.expires_in, "obtained access token");
        let value = resp.access_token.clone();
        self.token = Some(Token {
            value: resp.access_token,
            expires_at: Instant::now() + Duration::from_secs(resp.expires_in),
        });
        Ok(Some(value))
    }

    fn get_json(&mut self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let bearer = self.bearer()?;
        let url = match bearer {
            Some(_) => format!("{OAUTH_BASE}{path}"),
            None => format!("{PUBLIC_BASE}{path}.json"),
        };
        let mut req = self.http.get(&url).query(&[("raw_json", "1")]).query(query);
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;
        resp.json().with_context(|| format!("decode {url}"))
    }
}

impl ForumClient for RedditClient {
    fn new_posts(&mut self, forum: &str, limit: usize, after: Option<&str>) -> Result<Vec<RawPost>> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(a) = after {
            query.push(("after", a.to_string()));
        }
        let v = self.get_json(&format!("/r/{forum}/new"), &query)?;
        let listing: Listing = serde_json::from_value(v).context("decode post listing")?;
        posts_from_listing(listing)
    }

    fn comment_tree(&mut self, post: &RawPost) -> Result<Vec<CommentNode>> {
        let v = self.get_json(&format!("/comments/{}", post.id), &[])?;
        comment_nodes_from_response(v)
    }

    fn expand_more(&mut self, post: &RawPost, more: &MoreComments) -> Result<Vec<CommentNode>> {
        let query = [
            ("api_type", "json".to_string()),
            ("link_id", post.fullname()),
            ("children", more.children.join(",")),
        ];
        let v = self.get_json("/api/morechildren", &query)?;
        nodes_from_morechildren(v)
    }
}
