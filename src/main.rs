mod cli;

use clap::Parser;
use cli::Args;
use link_scraper::{build_jobs, merge_results, run_jobs, run_timestamp, write_outputs, ScrapeOptions};
use linkharvest_core::{CoreError, Credentials, ErrorExt, SortOrder};
use reddit_client::RedditSession;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Configuration check comes before credential parsing or any network
    // activity.
    let sorts = args.sort_orders();
    if sorts.is_empty() {
        eprintln!(
            "Must provide at least one sorting flag: --hot, --new, --controversial, or --top <window>. See --help for details."
        );
        return ExitCode::FAILURE;
    }

    match run(args, sorts).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.log_error();
            eprintln!("{}", e.user_friendly_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, sorts: Vec<SortOrder>) -> Result<(), CoreError> {
    let credentials = Credentials::from_cli_arg(&args.oauth)?;
    let session = RedditSession::connect(&credentials).await?;

    let jobs = build_jobs(&args.subs, &sorts, &args.domains, args.limit);
    let options = ScrapeOptions {
        collect_comments: !args.no_comments,
        report_progress: !args.quiet,
        concurrency: args.concurrency,
    };

    tracing::info!(
        "Loading {}",
        args.subs
            .iter()
            .map(|s| format!("/r/{s}"))
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!("Searching for links from: {}", args.domains.join(", "));

    let started = Instant::now();
    let results = run_jobs(Arc::new(session), jobs, &options).await?;
    tracing::info!(
        "All jobs completed in {:.1} seconds. Filtering and saving results to {}",
        started.elapsed().as_secs_f64(),
        args.path.display()
    );

    let aggregated = merge_results(results);
    let timestamp = run_timestamp();
    write_outputs(&args.path, &timestamp, &aggregated, options.collect_comments)?;

    tracing::info!(
        "Collected {} link posts and {} link comments",
        aggregated.posts.len(),
        aggregated.comments.len()
    );
    Ok(())
}
