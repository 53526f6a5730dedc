use std::fmt::Display;
use std::future::Future;
use tracing::debug;

pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36";

/// Run the task produced by `task` until it succeeds, at most `1 + retry_count` times.
///
/// The closure receives the attempt index, starting from 0. The error of the last attempt is
/// returned if all attempts failed.
pub(crate) async fn with_retry<T, E, U, W>(retry_count: usize, mut task: U) -> Result<T, E>
where
    U: FnMut(usize) -> W,
    W: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0;
    loop {
        match task(attempt).await {
            Ok(v) => return Ok(v),
            Err(e) if attempt < retry_count => {
                debug!("attempt {attempt} failed: {e}, retrying");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
