use crate::metrics::{MetricsCollector, RequestMetrics};
use crate::rate_limiter::{RateLimitConfig, RateLimiter};
use linkharvest_core::{CoreError, LinkPost, RedditApiError, SortOrder};
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

const REDDIT_API_BASE: &str = "https://oauth.reddit.com";
const REDDIT_AUTH_BASE: &str = "https://www.reddit.com";

/// Listings return at most 100 posts per request; larger limits paginate
/// with the `after` cursor.
const LISTING_PAGE_SIZE: u32 = 100;

/// `/api/morechildren` accepts at most 100 comment ids per call.
const MORE_CHILDREN_BATCH: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
    #[serde(default)]
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    pub subreddit: String,
    pub url: String,
    #[serde(default)]
    pub is_self: bool,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u32,
    #[serde(default)]
    pub link_flair_text: Option<String>,
    #[serde(default)]
    pub upvote_ratio: Option<f64>,
}

/// A comment flattened out of the tree. Nesting is not preserved; the
/// scraper only filters bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditCommentData {
    pub id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
}

#[derive(Debug, Deserialize)]
struct MoreChildrenResponse {
    json: MoreChildrenEnvelope,
}

#[derive(Debug, Deserialize)]
struct MoreChildrenEnvelope {
    #[serde(default)]
    data: Option<MoreChildrenData>,
}

#[derive(Debug, Deserialize)]
struct MoreChildrenData {
    #[serde(default)]
    things: Vec<RedditListingChild<Value>>,
}

#[derive(Debug)]
pub struct RedditApiClient {
    pub(crate) http_client: Client,
    pub(crate) rate_limiter: Arc<RateLimiter>,
    pub(crate) metrics: Arc<MetricsCollector>,
    pub(crate) user_agent: String,
    api_base: String,
    pub(crate) auth_base: String,
}

impl RedditApiClient {
    pub fn new(user_agent: String) -> Self {
        Self::with_base_urls(
            user_agent,
            REDDIT_API_BASE.to_string(),
            REDDIT_AUTH_BASE.to_string(),
        )
    }

    /// Point the client at alternative endpoints, e.g. a local mock server.
    pub fn with_base_urls(user_agent: String, api_base: String, auth_base: String) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(RateLimitConfig::reddit_oauth()));
        let metrics = Arc::new(MetricsCollector::new());

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            rate_limiter,
            metrics,
            user_agent,
            api_base,
            auth_base,
        }
    }

    pub async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        access_token: &str,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Response, CoreError> {
        let url = format!("{}{}", self.api_base, endpoint);
        let start_time = Instant::now();

        let _permit = self.rate_limiter.acquire_permit().await;
        debug!("Acquired rate limit permit for {} {}", method, endpoint);

        let mut request_builder = self
            .http_client
            .request(method.clone(), &url)
            .bearer_auth(access_token)
            .header("User-Agent", &self.user_agent);

        if let Some(params) = query_params {
            request_builder = request_builder.query(params);
        }

        debug!("Reddit API request: {} {}", method, endpoint);
        let response = match request_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {} {}: {}", method, endpoint, e);
                self.record_request(endpoint, &method, None, start_time, false, false, Some("network_error"))
                    .await;
                return Err(if e.is_timeout() {
                    CoreError::RedditApi(RedditApiError::RequestTimeout)
                } else {
                    CoreError::Network(e)
                });
            }
        };

        let status = response.status();
        let api_error = if status.is_success() {
            None
        } else if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            warn!("Rate limited on {}, retry after {} seconds", endpoint, retry_after);
            Some(RedditApiError::RateLimitExceeded { retry_after })
        } else if status.as_u16() == 401 {
            Some(RedditApiError::InvalidToken)
        } else if status.as_u16() == 403 {
            Some(RedditApiError::Forbidden {
                resource: endpoint.to_string(),
            })
        } else if status.as_u16() == 404 {
            Some(RedditApiError::SubredditNotFound {
                subreddit: subreddit_from_endpoint(endpoint),
            })
        } else if status.is_server_error() {
            Some(RedditApiError::ServerError {
                status_code: status.as_u16(),
            })
        } else {
            Some(RedditApiError::InvalidResponse {
                details: format!("unexpected status {status} for {endpoint}"),
            })
        };

        let rate_limited = matches!(api_error, Some(RedditApiError::RateLimitExceeded { .. }));
        self.record_request(
            endpoint,
            &method,
            Some(status.as_u16()),
            start_time,
            api_error.is_none(),
            rate_limited,
            api_error.as_ref().map(error_label),
        )
        .await;

        match api_error {
            Some(e) => {
                error!("Request failed with status {} for {}", status, endpoint);
                Err(CoreError::RedditApi(e))
            }
            None => {
                debug!("Request successful: {} {}", status, endpoint);
                Ok(response)
            }
        }
    }

    /// Fetch up to `limit` posts from a subreddit under the given sort
    /// order, following `after` cursors across pages.
    pub async fn fetch_posts(
        &self,
        access_token: &str,
        subreddit: &str,
        sort: &SortOrder,
        limit: u32,
    ) -> Result<Vec<RedditPostData>, CoreError> {
        let endpoint = format!("/r/{}/{}", subreddit, sort.endpoint());
        let mut posts: Vec<RedditPostData> = Vec::new();
        let mut after: Option<String> = None;

        while (posts.len() as u32) < limit {
            let page_size = LISTING_PAGE_SIZE.min(limit - posts.len() as u32).to_string();
            let mut params: Vec<(&str, &str)> =
                vec![("limit", page_size.as_str()), ("raw_json", "1")];
            if let SortOrder::Top(window) = sort {
                params.push(("t", window.as_str()));
            }
            if let Some(cursor) = after.as_deref() {
                params.push(("after", cursor));
            }

            let response = self
                .make_request(Method::GET, &endpoint, access_token, Some(&params))
                .await?;

            let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
                error!("Failed to parse subreddit listing: {}", e);
                CoreError::RedditApi(RedditApiError::InvalidResponse {
                    details: format!("failed to parse posts for r/{subreddit}"),
                })
            })?;

            if listing.data.children.is_empty() {
                break;
            }
            after = listing.data.after.clone();
            posts.extend(listing.data.children.into_iter().map(|child| child.data));
            if after.is_none() {
                break;
            }
        }

        posts.truncate(limit as usize);
        debug!(
            "Retrieved {} posts from r/{} ({})",
            posts.len(),
            subreddit,
            sort
        );
        Ok(posts)
    }

    /// Fetch the fully expanded comment tree of a post, resolving "load
    /// more" placeholders, and return it flattened.
    pub async fn fetch_comment_tree(
        &self,
        access_token: &str,
        subreddit: &str,
        post_id: &str,
    ) -> Result<Vec<RedditCommentData>, CoreError> {
        let endpoint = format!("/r/{subreddit}/comments/{post_id}");
        let params = [("raw_json", "1"), ("limit", "500")];

        let response = self
            .make_request(Method::GET, &endpoint, access_token, Some(&params))
            .await?;

        // The comments endpoint returns [post listing, comment listing].
        let slices: Vec<RedditListing<Value>> = response.json().await.map_err(|e| {
            error!("Failed to parse comment tree: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("failed to parse comments for post {post_id}"),
            })
        })?;

        let comment_listing = slices.into_iter().nth(1).ok_or_else(|| {
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("comment listing missing for post {post_id}"),
            })
        })?;

        let mut comments = Vec::new();
        let mut pending_more: Vec<String> = Vec::new();
        for child in &comment_listing.data.children {
            collect_comment_node(&child.kind, &child.data, &mut comments, &mut pending_more);
        }

        while !pending_more.is_empty() {
            let take = MORE_CHILDREN_BATCH.min(pending_more.len());
            let batch: Vec<String> = pending_more.drain(..take).collect();
            let children_arg = batch.join(",");
            let link_id = format!("t3_{post_id}");
            let params = [
                ("api_type", "json"),
                ("link_id", link_id.as_str()),
                ("children", children_arg.as_str()),
                ("raw_json", "1"),
            ];

            let response = self
                .make_request(Method::GET, "/api/morechildren", access_token, Some(&params))
                .await?;

            let resolved: MoreChildrenResponse = response.json().await.map_err(|e| {
                error!("Failed to parse morechildren response: {}", e);
                CoreError::RedditApi(RedditApiError::InvalidResponse {
                    details: format!("failed to resolve more comments for post {post_id}"),
                })
            })?;

            if let Some(data) = resolved.json.data {
                for thing in &data.things {
                    collect_comment_node(&thing.kind, &thing.data, &mut comments, &mut pending_more);
                }
            }
        }

        debug!("Expanded {} comments for post {}", comments.len(), post_id);
        Ok(comments)
    }

    pub async fn get_metrics(&self) -> crate::metrics::ApiMetrics {
        self.metrics.get_metrics().await
    }

    pub async fn get_rate_limit_status(&self) -> crate::rate_limiter::RateLimitStatus {
        self.rate_limiter.status().await
    }

    async fn record_request(
        &self,
        endpoint: &str,
        method: &Method,
        status_code: Option<u16>,
        start_time: Instant,
        success: bool,
        rate_limited: bool,
        error_type: Option<&'static str>,
    ) {
        self.metrics
            .record_request(RequestMetrics {
                endpoint: endpoint.to_string(),
                method: method.to_string(),
                status_code,
                response_time: start_time.elapsed(),
                success,
                rate_limited,
                error_type: error_type.map(str::to_string),
            })
            .await;
    }
}

/// Walk one node of the comment tree: `t1` nodes are collected and their
/// replies recursed into, `more` nodes queue their children for resolution.
fn collect_comment_node(
    kind: &str,
    data: &Value,
    comments: &mut Vec<RedditCommentData>,
    pending_more: &mut Vec<String>,
) {
    match kind {
        "t1" => {
            match serde_json::from_value::<RedditCommentData>(data.clone()) {
                Ok(comment) => comments.push(comment),
                Err(e) => warn!("Skipping malformed comment node: {}", e),
            }
            if let Some(children) = data.pointer("/replies/data/children").and_then(Value::as_array)
            {
                for child in children {
                    let child_kind = child.get("kind").and_then(Value::as_str).unwrap_or("");
                    if let Some(child_data) = child.get("data") {
                        collect_comment_node(child_kind, child_data, comments, pending_more);
                    }
                }
            }
        }
        "more" => {
            if let Some(ids) = data.get("children").and_then(Value::as_array) {
                pending_more.extend(ids.iter().filter_map(Value::as_str).map(str::to_string));
            }
        }
        _ => {}
    }
}

fn error_label(error: &RedditApiError) -> &'static str {
    match error {
        RedditApiError::AuthenticationFailed { .. } => "auth_failed",
        RedditApiError::RateLimitExceeded { .. } => "rate_limited",
        RedditApiError::Forbidden { .. } => "forbidden",
        RedditApiError::SubredditNotFound { .. } => "not_found",
        RedditApiError::InvalidToken => "unauthorized",
        RedditApiError::RequestTimeout => "timeout",
        RedditApiError::InvalidResponse { .. } => "invalid_response",
        RedditApiError::ServerError { .. } => "server_error",
    }
}

/// Best-effort subreddit name out of an `/r/{sub}/...` endpoint, for 404
/// reporting.
fn subreddit_from_endpoint(endpoint: &str) -> String {
    endpoint
        .strip_prefix("/r/")
        .and_then(|rest| rest.split('/').next())
        .unwrap_or(endpoint)
        .to_string()
}

// Helper to flatten a matching post into an output record.
impl From<&RedditPostData> for LinkPost {
    fn from(post: &RedditPostData) -> Self {
        Self {
            post_id: post.id.clone(),
            title: post.title.clone(),
            url: post.url.clone(),
            subreddit: post.subreddit.clone(),
            score: post.score,
            flair: post.link_flair_text.clone(),
            upvote_ratio: post.upvote_ratio,
        }
    }
}
