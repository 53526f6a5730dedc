use anyhow::Result;
use flate2::bufread::{DeflateDecoder, GzDecoder};
use reqwest::header::CONTENT_ENCODING;
use reqwest::Response;
use std::io::Read;

pub mod board;
pub mod cache;
pub mod client;
pub mod endpoint;
pub mod loader;
pub mod post;
pub mod search;
pub mod thread;
mod utils;

pub use client::{Client, ClientOptions};

#[derive(Clone, Debug, thiserror::Error)]
pub enum ApiError {
    /// Http request failed.
    ///
    /// * 0: url.
    /// * 1: status code.
    #[error("bad response code {1:?} in http request on: {0:?}")]
    WebRequestError(String, String),

    /// Every attempt failed before getting any response.
    ///
    /// * 0: url.
    /// * 1: error in the last attempt.
    #[error("no response from {0:?} after retrying: {1}")]
    NoResponse(String, String),

    /// Server compressed the body in a way we can not decode.
    #[error("unsupported http response encoding format: {0}")]
    UnsupportedEncoding(String),
}

/// Read the whole response body, decompressing it according to `Content-Encoding`.
pub(crate) async fn decompress_response(resp: Response) -> Result<Vec<u8>> {
    let encoding = match resp.headers().get(CONTENT_ENCODING) {
        Some(v) => Some(v.to_str()?.to_owned()),
        None => None,
    };
    let b = resp.bytes().await?;

    let data = match encoding.as_deref() {
        Some("gzip") => {
            let mut d = GzDecoder::new(b.iter().as_slice());
            let mut data = vec![];
            d.read_to_end(&mut data)?;
            data
        }
        Some("deflate") => {
            let mut d = DeflateDecoder::new(b.iter().as_slice());
            let mut data = vec![];
            d.read_to_end(&mut data)?;
            data
        }
        Some("identity") | None => b.to_vec(),
        Some(v) => return Err(ApiError::UnsupportedEncoding(v.to_string()).into()),
    };

    Ok(data)
}
