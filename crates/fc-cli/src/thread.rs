use crate::cmd::ThreadArgs;
use crate::config::OutputFormat;
use crate::render::render_post;
use crate::utils::{parallel_future, print_output};
use anyhow::{Context, Result};
use fc_api::post::Post;
use fc_api::thread::{ChanThread, FilterShownExt};
use fc_api::Client;
use tracing::trace;

/// Threads fetched at the same time.
const THREAD_FETCH_LIMIT: usize = 4;

pub async fn run_thread_command(
    client: &Client,
    args: ThreadArgs,
    format: OutputFormat,
) -> Result<()> {
    trace!("running thread command with args: {args:?}");

    let board = args.board.as_str();
    let threads = parallel_future(args.no.iter().copied(), THREAD_FETCH_LIMIT, |no| async move {
        client
            .thread(board, no)
            .await
            .with_context(|| format!("when fetching thread {no} on /{board}/"))
    })
    .await?;

    let threads = if args.images_only {
        threads
            .into_iter()
            .map(|x| x.filter_should_be_shown(&Post::has_reasonable_sized_image))
            .collect()
    } else {
        threads
    };

    print_output(&threads, format, |x| {
        x.iter().map(render_thread).collect::<Vec<_>>().join("\n\n")
    })
}

pub(crate) fn render_thread(thread: &ChanThread) -> String {
    thread
        .posts
        .iter()
        .map(render_post)
        .collect::<Vec<_>>()
        .join("\n----------\n")
}
