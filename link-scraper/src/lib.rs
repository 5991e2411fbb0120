pub mod aggregate;
pub mod driver;
pub mod job;
pub mod output;
pub mod scrape;
pub mod seen;

pub use aggregate::{merge_results, Aggregated};
pub use driver::run_jobs;
pub use job::{build_jobs, ScrapeJob};
pub use output::{
    run_timestamp, write_outputs, COMMENT_COLUMNS, OUTPUT_SCHEMA_VERSION, POST_COLUMNS,
};
pub use scrape::{scrape_links, JobResult, ScrapeOptions};
pub use seen::{SeenSet, SeenState};
