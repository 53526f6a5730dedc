use crate::cmd::SearchArgs;
use crate::config::OutputFormat;
use crate::render::render_post;
use crate::utils::print_output;
use anyhow::{Context, Result};
use fc_api::search::SearchResults;
use fc_api::Client;
use std::fmt::Write;
use tracing::trace;

pub async fn run_search_command(
    client: &Client,
    args: SearchArgs,
    format: OutputFormat,
) -> Result<()> {
    trace!("running search command with args: {args:?}");
    let results = client
        .search(
            args.query.as_str(),
            args.board.as_deref(),
            args.offset,
            args.length,
        )
        .await
        .context("when searching")?;
    print_output(&results, format, render_search_results)
}

fn render_search_results(results: &SearchResults) -> String {
    let body = match results.body.as_ref() {
        Some(v) => v,
        None => return "no results".to_string(),
    };
    let mut out = format!("{} hits", body.nhits.unwrap_or_default());
    for thread in body.threads.iter().flatten() {
        let board = thread.board.as_deref().unwrap_or_default();
        let _ = write!(out, "\n\n===== /{board}/ {} =====", thread.thread);
        for post in thread.posts.iter().flatten() {
            let _ = write!(out, "\n{}", render_post(post));
        }
    }
    out
}
