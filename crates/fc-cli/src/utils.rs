use crate::config::OutputFormat;
use anyhow::{Context, Result};
use futures::StreamExt;
use serde::Serialize;
use std::future::Future;

/// Print `value` as pretty json, or as the text `render` produces.
///
/// # Errors
///
/// When failed to serialize `value`.
pub fn print_output<T, F>(value: &T, format: OutputFormat, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let text = match format {
        OutputFormat::Text => render(value),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("when serializing output")?
        }
    };
    println!("{text}");
    Ok(())
}

/// Generate a series of tasks from [task_source] by running [`closure`], run those tasks and
/// return the results in the order of [task_source].
///
/// # Errors
///
/// Return error when any of the generated tasks failed.
#[allow(clippy::future_not_send)]
pub async fn parallel_future<T, U, W, V>(
    task_source: T,
    buffer_size: usize,
    closure: U,
) -> Result<Vec<V>>
where
    T: Iterator,
    U: FnMut(<T as Iterator>::Item) -> W,
    W: Future<Output = Result<V>> + Sized,
{
    let ret = futures::stream::iter(task_source.map(closure))
        .buffered(buffer_size)
        .collect::<Vec<Result<V>>>()
        .await
        .into_iter()
        .collect::<Result<Vec<V>>>()?;
    Ok(ret)
}
