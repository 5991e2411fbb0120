use crate::error::*;
use tracing::error;

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn error_code(&self) -> &'static str;
    fn user_friendly_message(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::RedditApi(e) => {
                error!("Reddit API error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn error_code(&self) -> &'static str {
        match self {
            CoreError::RedditApi(_) => "REDDIT_API",
            CoreError::Config(_) => "CONFIG",
            CoreError::Io(_) => "IO",
            CoreError::Serialization(_) => "SERIALIZATION",
            CoreError::Network(_) => "NETWORK",
            CoreError::Csv(_) => "CSV",
            CoreError::InvalidInput { .. } => "INVALID_INPUT",
            CoreError::Internal { .. } => "INTERNAL",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::RedditApi(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Io(e) => format!("File operation failed: {e}"),
            CoreError::Csv(e) => format!("Could not write output file: {e}"),
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            CoreError::Serialization(_) => "Received data in an unexpected format.".to_string(),
            CoreError::InvalidInput { message } => format!("Invalid input: {message}"),
            CoreError::Internal { message } => format!("Internal error: {message}"),
        }
    }
}

impl RedditApiError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            RedditApiError::AuthenticationFailed { reason } => {
                format!("Reddit authentication failed: {reason}. Check your OAuth credentials.")
            }
            RedditApiError::RateLimitExceeded { retry_after } => format!(
                "Reddit is rate limiting this client. Try again in {retry_after} seconds or lower the post limit."
            ),
            RedditApiError::Forbidden { resource } => {
                format!("Access to {resource} is forbidden for this account.")
            }
            RedditApiError::SubredditNotFound { subreddit } => {
                format!("Subreddit not found: {subreddit}. Check the --subs spelling.")
            }
            RedditApiError::InvalidToken => {
                "The Reddit access token is invalid or expired.".to_string()
            }
            RedditApiError::RequestTimeout => {
                "A Reddit API request timed out. Try again later.".to_string()
            }
            RedditApiError::InvalidResponse { details } => {
                format!("Reddit returned an unexpected response: {details}")
            }
            RedditApiError::ServerError { status_code } => {
                format!("Reddit is having server trouble (status {status_code}). Try again later.")
            }
        }
    }
}

impl ConfigError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Credential file not found: {path}")
            }
            ConfigError::MissingField { field } => {
                format!("Credential field '{field}' is missing or empty.")
            }
            ConfigError::InvalidValue { field, value } => {
                format!("Invalid value for {field}: {value}")
            }
            ConfigError::ValidationFailed { reason } => {
                format!("Configuration problem: {reason}")
            }
            ConfigError::Parse(e) => format!("Could not parse the credential file: {e}"),
        }
    }
}
