use linkharvest_core::SortOrder;
use std::fmt;
use std::sync::Arc;

/// One unit of scraping work: a (subreddit, sort order) pair.
#[derive(Debug, Clone)]
pub struct ScrapeJob {
    pub id: usize,
    pub total: usize,
    pub subreddit: String,
    pub domains: Arc<Vec<String>>,
    pub sort: SortOrder,
    pub limit: u32,
}

/// Expand the (subreddit × sort order) cross product into jobs, numbered
/// sequentially from 1 in subreddit-major order.
pub fn build_jobs(
    subreddits: &[String],
    sorts: &[SortOrder],
    domains: &[String],
    limit: u32,
) -> Vec<ScrapeJob> {
    let domains = Arc::new(domains.to_vec());
    let total = subreddits.len() * sorts.len();
    let mut jobs = Vec::with_capacity(total);
    let mut id = 0;

    for subreddit in subreddits {
        for sort in sorts {
            id += 1;
            jobs.push(ScrapeJob {
                id,
                total,
                subreddit: subreddit.clone(),
                domains: Arc::clone(&domains),
                sort: sort.clone(),
                limit,
            });
        }
    }

    jobs
}

impl fmt::Display for ScrapeJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Job {}/{}, searching the {} {} posts from /r/{} for links to {}",
            self.id,
            self.total,
            self.sort.adjective(),
            self.limit,
            self.subreddit,
            self.domains.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkharvest_core::TimeWindow;

    fn subs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cross_product_count() {
        let jobs = build_jobs(
            &subs(&["rust", "programming", "linux"]),
            &[SortOrder::New, SortOrder::Hot],
            &subs(&["example.com"]),
            100,
        );
        assert_eq!(jobs.len(), 6);
    }

    #[test]
    fn test_jobs_numbered_sequentially() {
        let jobs = build_jobs(
            &subs(&["rust", "programming"]),
            &[SortOrder::New, SortOrder::Top(TimeWindow::Week)],
            &subs(&["example.com"]),
            50,
        );

        let ids: Vec<usize> = jobs.iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(jobs.iter().all(|j| j.total == 4));

        // Subreddit-major order: all sorts for one subreddit first.
        assert_eq!(jobs[0].subreddit, "rust");
        assert_eq!(jobs[1].subreddit, "rust");
        assert_eq!(jobs[1].sort, SortOrder::Top(TimeWindow::Week));
        assert_eq!(jobs[2].subreddit, "programming");
    }

    #[test]
    fn test_no_sorts_means_no_jobs() {
        let jobs = build_jobs(&subs(&["rust"]), &[], &subs(&["example.com"]), 100);
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_job_display() {
        let jobs = build_jobs(
            &subs(&["rust"]),
            &[SortOrder::Hot],
            &subs(&["example.com", "crates.io"]),
            100,
        );
        assert_eq!(
            jobs[0].to_string(),
            "Job 1/1, searching the hottest 100 posts from /r/rust for links to example.com, crates.io"
        );
    }
}
