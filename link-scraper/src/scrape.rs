use crate::job::ScrapeJob;
use crate::seen::SeenState;
use linkharvest_core::{CoreError, LinkComment, LinkPost};
use reddit_client::PostSource;
use std::time::Instant;
use tracing::{debug, info};

/// Behavior flags for a scraping run, passed explicitly into every job.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Expand and search post comments. Turning this off spares most of
    /// the request volume.
    pub collect_comments: bool,
    /// Log quartile progress checkpoints while a job runs.
    pub report_progress: bool,
    /// Maximum number of jobs scraping at once.
    pub concurrency: usize,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            collect_comments: true,
            report_progress: true,
            concurrency: 8,
        }
    }
}

/// What one job found.
#[derive(Debug, Clone)]
pub struct JobResult {
    pub job_id: usize,
    pub posts: Vec<LinkPost>,
    pub comments: Vec<LinkComment>,
    pub posts_checked: usize,
}

/// Run one scrape job: list posts, gate each on first sighting, then
/// match comment bodies and direct-link URLs against the target domains.
pub async fn scrape_links(
    source: &dyn PostSource,
    job: &ScrapeJob,
    seen: &SeenState,
    options: &ScrapeOptions,
) -> Result<JobResult, CoreError> {
    let started = Instant::now();
    info!("Started: {}", job);

    let listing = source.posts(&job.subreddit, &job.sort, job.limit).await?;

    let mut link_posts: Vec<LinkPost> = Vec::new();
    let mut link_comments: Vec<LinkComment> = Vec::new();
    let mut checked = 0usize;
    let quartiles = [job.limit / 4, job.limit / 2, job.limit * 3 / 4];

    for post in listing {
        checked += 1;
        if options.report_progress {
            if let Some(quarter) = quartiles.iter().position(|&q| q as usize == checked) {
                info!(
                    "{}: {}% complete in {:.1} seconds, {} posts checked, found {} link posts and {} comments containing links",
                    job,
                    (quarter + 1) * 25,
                    started.elapsed().as_secs_f64(),
                    checked,
                    link_posts.len(),
                    link_comments.len()
                );
            }
        }

        // First sighting wins across all concurrent jobs; a repeat skips
        // the whole post, comment expansion included.
        if !seen.posts.insert(&post.id) {
            debug!("Skipping already-seen post {}", post.id);
            continue;
        }

        if post.num_comments > 0 && options.collect_comments {
            let comments = source.comment_tree(&job.subreddit, &post.id).await?;
            for comment in comments {
                let matched = job
                    .domains
                    .iter()
                    .any(|domain| comment.body.contains(domain.as_str()));
                if matched && seen.comments.insert(&comment.id) {
                    link_comments.push(LinkComment {
                        comment_id: comment.id,
                        post_id: post.id.clone(),
                        body: comment.body,
                        score: comment.score,
                        subreddit: job.subreddit.clone(),
                        post_title: post.title.clone(),
                        post_flair: post.link_flair_text.clone(),
                    });
                }
            }
        }

        // Literal substring match on the URL, not a parsed-domain match.
        if !post.is_self
            && job
                .domains
                .iter()
                .any(|domain| post.url.contains(domain.as_str()))
        {
            link_posts.push(LinkPost::from(&post));
        }
    }

    info!(
        "{}: completed in {:.1} seconds, {} posts checked, found {} link posts and {} comments containing links",
        job,
        started.elapsed().as_secs_f64(),
        checked,
        link_posts.len(),
        link_comments.len()
    );

    Ok(JobResult {
        job_id: job.id,
        posts: link_posts,
        comments: link_comments,
        posts_checked: checked,
    })
}
