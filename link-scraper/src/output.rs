use crate::aggregate::Aggregated;
use chrono::Local;
use csv::Writer;
use linkharvest_core::{CoreError, LinkComment, LinkPost};
use std::path::{Path, PathBuf};
use tracing::info;

/// Bump when a column list changes.
pub const OUTPUT_SCHEMA_VERSION: u32 = 1;

pub const POST_COLUMNS: [&str; 7] = [
    "post_id",
    "title",
    "url",
    "subreddit",
    "score",
    "flair",
    "upvote_ratio",
];

pub const COMMENT_COLUMNS: [&str; 7] = [
    "comment_id",
    "post_id",
    "body",
    "score",
    "subreddit",
    "post_title",
    "post_flair",
];

/// Timestamp shared by both output files of a run.
pub fn run_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Write the aggregated records under `dir`. The comments file is only
/// produced when comment collection was enabled.
pub fn write_outputs(
    dir: &Path,
    timestamp: &str,
    aggregated: &Aggregated,
    include_comments: bool,
) -> Result<(PathBuf, Option<PathBuf>), CoreError> {
    let posts_path = write_posts(dir, timestamp, &aggregated.posts)?;
    let comments_path = if include_comments {
        Some(write_comments(dir, timestamp, &aggregated.comments)?)
    } else {
        None
    };
    Ok((posts_path, comments_path))
}

pub fn write_posts(dir: &Path, timestamp: &str, posts: &[LinkPost]) -> Result<PathBuf, CoreError> {
    let path = dir.join(format!("Posts_{timestamp}.csv"));
    let mut writer = Writer::from_path(&path)?;
    writer.write_record(POST_COLUMNS)?;

    for post in posts {
        let score = post.score.to_string();
        let ratio = post
            .upvote_ratio
            .map(|r| r.to_string())
            .unwrap_or_default();
        writer.write_record([
            post.post_id.as_str(),
            post.title.as_str(),
            post.url.as_str(),
            post.subreddit.as_str(),
            score.as_str(),
            post.flair.as_deref().unwrap_or(""),
            ratio.as_str(),
        ])?;
    }

    writer.flush()?;
    info!("Wrote {} posts to {}", posts.len(), path.display());
    Ok(path)
}

pub fn write_comments(
    dir: &Path,
    timestamp: &str,
    comments: &[LinkComment],
) -> Result<PathBuf, CoreError> {
    let path = dir.join(format!("Comments_{timestamp}.csv"));
    let mut writer = Writer::from_path(&path)?;
    writer.write_record(COMMENT_COLUMNS)?;

    for comment in comments {
        let score = comment.score.to_string();
        writer.write_record([
            comment.comment_id.as_str(),
            comment.post_id.as_str(),
            comment.body.as_str(),
            score.as_str(),
            comment.subreddit.as_str(),
            comment.post_title.as_str(),
            comment.post_flair.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    info!("Wrote {} comments to {}", comments.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> LinkPost {
        LinkPost {
            post_id: "p1".to_string(),
            title: "A post, with a comma".to_string(),
            url: "https://example.com/article".to_string(),
            subreddit: "rust".to_string(),
            score: 42,
            flair: Some("News".to_string()),
            upvote_ratio: Some(0.93),
        }
    }

    fn sample_comment() -> LinkComment {
        LinkComment {
            comment_id: "c1".to_string(),
            post_id: "p1".to_string(),
            body: "see https://example.com/thread".to_string(),
            score: 3,
            subreddit: "rust".to_string(),
            post_title: "A post, with a comma".to_string(),
            post_flair: None,
        }
    }

    #[test]
    fn test_posts_file_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_posts(dir.path(), "20260101_120000", &[sample_post()]).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Posts_20260101_120000.csv"
        );
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "post_id,title,url,subreddit,score,flair,upvote_ratio"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("p1,"));
        assert!(row.contains("\"A post, with a comma\""));
        assert!(row.contains("0.93"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_posts_file_is_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_posts(dir.path(), "20260101_120000", &[]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_missing_optionals_serialize_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut post = sample_post();
        post.flair = None;
        post.upvote_ratio = None;
        let path = write_posts(dir.path(), "20260101_120000", &[post]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let row = contents.lines().nth(1).unwrap();
        assert!(row.ends_with("rust,42,,"));
    }

    #[test]
    fn test_write_outputs_skips_comments_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let aggregated = Aggregated {
            posts: vec![sample_post()],
            comments: vec![sample_comment()],
            duplicate_posts: 0,
            duplicate_comments: 0,
        };

        let (posts_path, comments_path) =
            write_outputs(dir.path(), "20260101_120000", &aggregated, false).unwrap();
        assert!(posts_path.exists());
        assert!(comments_path.is_none());
        assert!(!dir.path().join("Comments_20260101_120000.csv").exists());

        let (_, comments_path) =
            write_outputs(dir.path(), "20260101_120001", &aggregated, true).unwrap();
        let comments_path = comments_path.unwrap();
        let contents = std::fs::read_to_string(&comments_path).unwrap();
        assert_eq!(
            contents.lines().next().unwrap(),
            "comment_id,post_id,body,score,subreddit,post_title,post_flair"
        );
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_schema_version_matches_columns() {
        // Version 1 is the seven-column layout.
        assert_eq!(OUTPUT_SCHEMA_VERSION, 1);
        assert_eq!(POST_COLUMNS.len(), 7);
        assert_eq!(COMMENT_COLUMNS.len(), 7);
    }
}
