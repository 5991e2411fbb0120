use clap::Parser;
use linkharvest_core::{SortOrder, TimeWindow};
use std::path::PathBuf;

/// A tool for grabbing links from Reddit posts and comments.
#[derive(Debug, Parser)]
#[command(name = "linkharvest", version)]
pub struct Args {
    /// Subreddit(s) to target, comma separated.
    #[arg(short = 's', long = "subs", required = true, value_delimiter = ',')]
    pub subs: Vec<String>,

    /// Domains to collect URLs for, comma separated.
    #[arg(short = 'd', long = "domains", required = true, value_delimiter = ',')]
    pub domains: Vec<String>,

    /// OAuth credentials: either inline comma-separated values in order
    /// (client_id,client_secret,password,username,user_agent) or a path to
    /// a YAML file with those keys.
    #[arg(short = 'o', long = "oauth", required = true)]
    pub oauth: String,

    /// Directory for the output files (Posts_<TIMESTAMP>.csv and
    /// Comments_<TIMESTAMP>.csv).
    #[arg(short = 'p', long = "path", default_value = ".")]
    pub path: PathBuf,

    /// Maximum number of posts to search per job.
    #[arg(
        short = 'l',
        long = "limit",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub limit: u32,

    /// Search top posts within a time window: hour, day, week, month,
    /// year, or all.
    #[arg(short = 't', long = "top", value_name = "WINDOW")]
    pub top: Option<TimeWindow>,

    /// Search hot posts.
    #[arg(long)]
    pub hot: bool,

    /// Search new posts.
    #[arg(short = 'n', long)]
    pub new: bool,

    /// Search controversial posts.
    #[arg(short = 'c', long)]
    pub controversial: bool,

    /// Suppress progress reports until jobs are complete.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Do not collect post comments (helps with Reddit's rate limit if you
    /// do not need them).
    #[arg(short = 'x', long = "no-comments")]
    pub no_comments: bool,

    /// Maximum number of jobs scraping concurrently.
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,
}

impl Args {
    /// The sort orders selected by flags. Empty means a configuration
    /// error; the caller aborts before doing anything else.
    pub fn sort_orders(&self) -> Vec<SortOrder> {
        let mut sorts = Vec::new();
        if self.new {
            sorts.push(SortOrder::New);
        }
        if self.controversial {
            sorts.push(SortOrder::Controversial);
        }
        if self.hot {
            sorts.push(SortOrder::Hot);
        }
        if let Some(window) = self.top {
            sorts.push(SortOrder::Top(window));
        }
        sorts
    }
}
