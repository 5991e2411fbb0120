use std::fmt;
use std::str::FromStr;

/// One row of the posts output: a direct-link submission whose URL matched
/// a target domain.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPost {
    pub post_id: String,
    pub title: String,
    pub url: String,
    pub subreddit: String,
    pub score: i64,
    pub flair: Option<String>,
    pub upvote_ratio: Option<f64>,
}

/// One row of the comments output: a comment whose body matched a target
/// domain, tagged with its parent post's title and flair.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkComment {
    pub comment_id: String,
    pub post_id: String,
    pub body: String,
    pub score: i64,
    pub subreddit: String,
    pub post_title: String,
    pub post_flair: Option<String>,
}

/// Listing algorithm used to select and order posts from a subreddit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Hot,
    New,
    Controversial,
    Top(TimeWindow),
}

impl SortOrder {
    /// Path segment of the listing endpoint: `/r/{sub}/{endpoint}`.
    pub fn endpoint(&self) -> &'static str {
        match self {
            SortOrder::Hot => "hot",
            SortOrder::New => "new",
            SortOrder::Controversial => "controversial",
            SortOrder::Top(_) => "top",
        }
    }

    /// Adjective used in job descriptions ("the hottest 100 posts").
    pub fn adjective(&self) -> &'static str {
        match self {
            SortOrder::Hot => "hottest",
            SortOrder::New => "newest",
            SortOrder::Controversial => "most controversial",
            SortOrder::Top(_) => "top",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Top(window) => write!(f, "top:{window}"),
            other => f.write_str(other.endpoint()),
        }
    }
}

/// Time window for `top` listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(TimeWindow::Hour),
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            other => Err(format!(
                "invalid time window '{other}' (expected hour, day, week, month, year, or all)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_endpoints() {
        assert_eq!(SortOrder::Hot.endpoint(), "hot");
        assert_eq!(SortOrder::New.endpoint(), "new");
        assert_eq!(SortOrder::Controversial.endpoint(), "controversial");
        assert_eq!(SortOrder::Top(TimeWindow::Week).endpoint(), "top");
    }

    #[test]
    fn test_sort_order_display() {
        assert_eq!(SortOrder::Hot.to_string(), "hot");
        assert_eq!(SortOrder::Top(TimeWindow::All).to_string(), "top:all");
    }

    #[test]
    fn test_time_window_round_trip() {
        for window in [
            TimeWindow::Hour,
            TimeWindow::Day,
            TimeWindow::Week,
            TimeWindow::Month,
            TimeWindow::Year,
            TimeWindow::All,
        ] {
            assert_eq!(window.as_str().parse::<TimeWindow>(), Ok(window));
        }
    }

    #[test]
    fn test_time_window_rejects_unknown() {
        assert!("fortnight".parse::<TimeWindow>().is_err());
    }
}
