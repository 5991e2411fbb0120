use crate::job::ScrapeJob;
use crate::scrape::{scrape_links, JobResult, ScrapeOptions};
use crate::seen::SeenState;
use futures::stream::{self, StreamExt, TryStreamExt};
use linkharvest_core::CoreError;
use reddit_client::PostSource;
use std::sync::Arc;
use tracing::info;

/// Run every job against the shared source with bounded concurrency,
/// collecting results in submission order. The first failing job aborts
/// the run.
pub async fn run_jobs(
    source: Arc<dyn PostSource>,
    jobs: Vec<ScrapeJob>,
    options: &ScrapeOptions,
) -> Result<Vec<JobResult>, CoreError> {
    let seen = SeenState::default();
    info!("{} scraping job(s) started", jobs.len());

    let results = stream::iter(jobs)
        .map(|job| {
            let source = Arc::clone(&source);
            let seen = seen.clone();
            let options = options.clone();
            async move { scrape_links(source.as_ref(), &job, &seen, &options).await }
        })
        .buffered(options.concurrency.max(1))
        .try_collect::<Vec<JobResult>>()
        .await?;

    Ok(results)
}
