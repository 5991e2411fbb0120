use crate::scrape::JobResult;
use linkharvest_core::{LinkComment, LinkPost};
use std::collections::HashSet;
use tracing::info;

/// All job results merged into two flat, deduplicated record sets.
#[derive(Debug, Clone, Default)]
pub struct Aggregated {
    pub posts: Vec<LinkPost>,
    pub comments: Vec<LinkComment>,
    pub duplicate_posts: usize,
    pub duplicate_comments: usize,
}

/// Concatenate per-job results in job order and drop every repeated
/// identifier after its first occurrence. This pass is the correctness
/// guarantee; the in-job seen sets only cut wasted work.
pub fn merge_results(results: Vec<JobResult>) -> Aggregated {
    let mut posts = Vec::new();
    let mut comments = Vec::new();
    for result in results {
        posts.extend(result.posts);
        comments.extend(result.comments);
    }

    let (posts, duplicate_posts) = dedup_by_id(posts, |post| post.post_id.clone());
    let (comments, duplicate_comments) = dedup_by_id(comments, |comment| comment.comment_id.clone());

    info!("{} duplicate posts removed", duplicate_posts);
    info!("{} duplicate comments removed", duplicate_comments);

    Aggregated {
        posts,
        comments,
        duplicate_posts,
        duplicate_comments,
    }
}

fn dedup_by_id<T>(records: Vec<T>, id: impl Fn(&T) -> String) -> (Vec<T>, usize) {
    let before = records.len();
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(before);
    for record in records {
        if seen.insert(id(&record)) {
            kept.push(record);
        }
    }
    let removed = before - kept.len();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, title: &str) -> LinkPost {
        LinkPost {
            post_id: id.to_string(),
            title: title.to_string(),
            url: "https://example.com".to_string(),
            subreddit: "rust".to_string(),
            score: 1,
            flair: None,
            upvote_ratio: None,
        }
    }

    fn comment(id: &str, post_id: &str) -> LinkComment {
        LinkComment {
            comment_id: id.to_string(),
            post_id: post_id.to_string(),
            body: "see example.com".to_string(),
            score: 1,
            subreddit: "rust".to_string(),
            post_title: "a post".to_string(),
            post_flair: None,
        }
    }

    fn job_result(id: usize, posts: Vec<LinkPost>, comments: Vec<LinkComment>) -> JobResult {
        JobResult {
            job_id: id,
            posts,
            comments,
            posts_checked: 0,
        }
    }

    #[test]
    fn test_merge_keeps_first_occurrence() {
        let results = vec![
            job_result(1, vec![post("p1", "from job 1")], vec![comment("c1", "p1")]),
            job_result(
                2,
                vec![post("p1", "from job 2"), post("p2", "unique")],
                vec![comment("c1", "p1"), comment("c2", "p2")],
            ),
        ];

        let merged = merge_results(results);

        assert_eq!(merged.posts.len(), 2);
        assert_eq!(merged.duplicate_posts, 1);
        // First occurrence in concatenation order survives.
        assert_eq!(merged.posts[0].title, "from job 1");

        assert_eq!(merged.comments.len(), 2);
        assert_eq!(merged.duplicate_comments, 1);
    }

    #[test]
    fn test_merge_without_duplicates() {
        let results = vec![
            job_result(1, vec![post("p1", "a")], vec![]),
            job_result(2, vec![post("p2", "b")], vec![comment("c1", "p2")]),
        ];

        let merged = merge_results(results);
        assert_eq!(merged.posts.len(), 2);
        assert_eq!(merged.comments.len(), 1);
        assert_eq!(merged.duplicate_posts, 0);
        assert_eq!(merged.duplicate_comments, 0);
    }

    #[test]
    fn test_merge_empty() {
        let merged = merge_results(vec![]);
        assert!(merged.posts.is_empty());
        assert!(merged.comments.is_empty());
    }
}
