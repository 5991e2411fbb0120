use crate::api::{RedditApiClient, RedditCommentData, RedditPostData};
use crate::auth::AccessToken;
use async_trait::async_trait;
use linkharvest_core::{CoreError, Credentials, SortOrder};
use tracing::info;

/// The surface the scraping layer needs from Reddit. Production code uses
/// [`RedditSession`]; tests substitute a deterministic source.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Up to `limit` posts from a subreddit under the given sort order.
    async fn posts(
        &self,
        subreddit: &str,
        sort: &SortOrder,
        limit: u32,
    ) -> Result<Vec<RedditPostData>, CoreError>;

    /// The fully expanded, flattened comment tree of a post.
    async fn comment_tree(
        &self,
        subreddit: &str,
        post_id: &str,
    ) -> Result<Vec<RedditCommentData>, CoreError>;
}

/// An authenticated Reddit connection shared by all scrape jobs.
#[derive(Debug)]
pub struct RedditSession {
    client: RedditApiClient,
    token: AccessToken,
}

impl RedditSession {
    pub async fn connect(credentials: &Credentials) -> Result<Self, CoreError> {
        let client = RedditApiClient::new(credentials.user_agent.clone());
        let token = client.authenticate(credentials).await?;
        info!("Authenticated with Reddit as u/{}", credentials.username);
        Ok(Self { client, token })
    }

    /// Assemble a session from an already authenticated client, e.g. one
    /// pointed at a mock server.
    pub fn from_parts(client: RedditApiClient, token: AccessToken) -> Self {
        Self { client, token }
    }

    pub fn client(&self) -> &RedditApiClient {
        &self.client
    }
}

#[async_trait]
impl PostSource for RedditSession {
    async fn posts(
        &self,
        subreddit: &str,
        sort: &SortOrder,
        limit: u32,
    ) -> Result<Vec<RedditPostData>, CoreError> {
        self.client
            .fetch_posts(&self.token.access_token, subreddit, sort, limit)
            .await
    }

    async fn comment_tree(
        &self,
        subreddit: &str,
        post_id: &str,
    ) -> Result<Vec<RedditCommentData>, CoreError> {
        self.client
            .fetch_comment_tree(&self.token.access_token, subreddit, post_id)
            .await
    }
}
