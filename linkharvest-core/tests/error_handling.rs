use linkharvest_core::{ConfigError, CoreError, ErrorExt, RedditApiError};

#[test]
fn test_error_codes() {
    let reddit_error = CoreError::RedditApi(RedditApiError::InvalidToken);
    assert_eq!(reddit_error.error_code(), "REDDIT_API");

    let config_error = CoreError::Config(ConfigError::MissingField {
        field: "client_id".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");

    let internal_error = CoreError::Internal {
        message: "oops".to_string(),
    };
    assert_eq!(internal_error.error_code(), "INTERNAL");
}

#[test]
fn test_user_friendly_messages() {
    let reddit_error = CoreError::RedditApi(RedditApiError::InvalidToken);
    let message = reddit_error.user_friendly_message();
    assert!(!message.is_empty());
    assert!(message.contains("access token is invalid"));

    let config_error = CoreError::Config(ConfigError::MissingField {
        field: "client_id".to_string(),
    });
    let message = config_error.user_friendly_message();
    assert!(message.contains("client_id"));

    let not_found = CoreError::RedditApi(RedditApiError::SubredditNotFound {
        subreddit: "rust".to_string(),
    });
    assert!(not_found.user_friendly_message().contains("rust"));
}

#[test]
fn test_rate_limit_message_includes_delay() {
    let error = CoreError::RedditApi(RedditApiError::RateLimitExceeded { retry_after: 42 });
    assert!(error.user_friendly_message().contains("42"));
}

#[test]
fn test_nested_error_display() {
    let error = CoreError::RedditApi(RedditApiError::ServerError { status_code: 503 });
    assert_eq!(error.to_string(), "Reddit API error: Server error: 503");
}

#[test]
fn test_log_error_returns_self() {
    let error = CoreError::RedditApi(RedditApiError::RequestTimeout);
    // log_error is chainable and must not panic without a subscriber.
    assert_eq!(error.log_error().error_code(), "REDDIT_API");
}
