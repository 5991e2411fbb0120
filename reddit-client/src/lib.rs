pub mod api;
pub mod auth;
pub mod metrics;
pub mod rate_limiter;
pub mod source;


pub use api::{
    RedditApiClient, RedditCommentData, RedditListing, RedditListingChild, RedditListingData,
    RedditPostData,
};
pub use auth::AccessToken;
pub use metrics::ApiMetrics;
pub use rate_limiter::{RateLimitConfig, RateLimitStatus};
pub use source::{PostSource, RedditSession};
