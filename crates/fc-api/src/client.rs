use anyhow::{Context, Result};
use fc_types::{PageNumber, PostNumber};
use futures::stream::{self, Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::board::Boards;
use crate::cache::{ByteCache, DEFAULT_CACHE_CAPACITY};
use crate::decompress_response;
use crate::endpoint::Endpoint;
use crate::post::PostInContext;
use crate::search::SearchResults;
use crate::thread::{Archive, Catalog, ChanThread, Pages, Threads};
use crate::utils::{with_retry, USER_AGENT};
use crate::ApiError::{NoResponse, WebRequestError};

/// Requests in flight at once when walking many threads.
const FAN_OUT_LIMIT: usize = 4;

/// Header the search api refuses to answer without.
const REQUESTED_WITH: &str = "x-requested-with";

/// Tunables of [Client].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Extra attempts after a request failed without response.
    pub retry_count: usize,

    /// Responses kept in memory, 0 to disable caching.
    pub cache_capacity: usize,

    pub user_agent: String,

    /// Value of `x-requested-with` sent to the search api.
    ///
    /// Mirrors what the mobile site sends, update it if the search api starts to refuse.
    pub requested_with: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            retry_count: 3,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            user_agent: USER_AGENT.to_string(),
            requested_with: "p4 613fcc6".to_string(),
        }
    }
}

/// Read-only api client.
///
/// Cheap to clone, clones share the connection pool and the response cache.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    cache: Arc<ByteCache>,
    options: ClientOptions,
}

impl Client {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
        let http = reqwest::Client::builder()
            .user_agent(options.user_agent.as_str())
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            cache: Arc::new(ByteCache::new(options.cache_capacity)),
            options,
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn cache(&self) -> &ByteCache {
        &self.cache
    }

    /// Get the body on `url`, from cache if fetched before.
    pub async fn fetch_bytes(&self, url: Url) -> Result<Vec<u8>> {
        self.fetch_with_headers(url, HeaderMap::new()).await
    }

    #[tracing::instrument(skip_all, fields(url = %url))]
    async fn fetch_with_headers(&self, url: Url, headers: HeaderMap) -> Result<Vec<u8>> {
        let target = url.to_string();
        if let Some(data) = self.cache.get(target.as_str()) {
            return Ok(data);
        }

        debug!("fetch on url {target}");
        let resp = with_retry(self.options.retry_count, |_| {
            self.http.get(url.clone()).headers(headers.clone()).send()
        })
        .await
        .map_err(|e| NoResponse(target.clone(), e.to_string()))?;
        if resp.status() != StatusCode::OK {
            debug!("bad response status: {}", resp.status());
            return Err(WebRequestError(target, resp.status().to_string()).into());
        }

        let data = decompress_response(resp)
            .await
            .with_context(|| format!("when reading response body of {target}"))?;
        trace!("fetched {} bytes", data.len());
        self.cache.insert(target, data.clone());
        Ok(data)
    }

    async fn fetch_json<T>(&self, endpoint: Endpoint) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = endpoint.url(&[])?;
        let data = self.fetch_bytes(url).await?;
        serde_json::from_slice(data.as_slice())
            .with_context(|| format!("when deserializing data from {}", endpoint.path()))
    }

    pub async fn boards(&self) -> Result<Boards> {
        self.fetch_json(Endpoint::Boards).await
    }

    pub async fn catalog(&self, board: &str) -> Result<Catalog> {
        self.fetch_json(Endpoint::Catalog(board.to_string())).await
    }

    pub async fn thread(&self, board: &str, no: PostNumber) -> Result<ChanThread> {
        self.fetch_json(Endpoint::Thread(board.to_string(), no))
            .await
    }

    pub async fn threads(&self, board: &str, page: PageNumber) -> Result<Threads> {
        self.fetch_json(Endpoint::Threads(board.to_string(), page))
            .await
    }

    /// Every thread on `board` with minimal information filled in.
    pub async fn all_threads(&self, board: &str) -> Result<Pages> {
        self.fetch_json(Endpoint::AllThreads(board.to_string()))
            .await
    }

    pub async fn archive(&self, board: &str) -> Result<Archive> {
        self.fetch_json(Endpoint::Archive(board.to_string())).await
    }

    /// Raw bytes of a post file, works for any type including webm and pdf.
    pub async fn image_data(&self, board: &str, tim: i64, ext: &str) -> Result<Vec<u8>> {
        let url = Endpoint::Image(board.to_string(), tim, ext.to_string()).url(&[])?;
        self.fetch_bytes(url).await
    }

    pub async fn thumbnail_data(&self, board: &str, tim: i64) -> Result<Vec<u8>> {
        let url = Endpoint::Thumbnail(board.to_string(), tim).url(&[])?;
        self.fetch_bytes(url).await
    }

    /// Search posts, optionally on one `board` only.
    pub async fn search(
        &self,
        query: &str,
        board: Option<&str>,
        offset: Option<u32>,
        length: Option<u32>,
    ) -> Result<SearchResults> {
        let url = Endpoint::search_url(query, offset, length, board)?;
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(REQUESTED_WITH),
            HeaderValue::from_str(self.options.requested_with.as_str())
                .context("invalid x-requested-with header value")?,
        );
        let data = self.fetch_with_headers(url, headers).await?;
        serde_json::from_slice(data.as_slice()).context("when deserializing search results")
    }

    /// Every post on every board.
    ///
    /// Walks boards, then the thread list of each board, then each thread. Any failed step is
    /// logged and skipped, the stream goes on with the rest.
    pub fn all_posts(&self) -> impl Stream<Item = PostInContext> + '_ {
        stream::once(self.boards())
            .flat_map(|result| skip_failed("boards", result.map(|x| x.boards)))
            .map(move |board| async move {
                let pages = self.all_threads(board.board.as_str()).await;
                (board.board, pages)
            })
            .buffer_unordered(FAN_OUT_LIMIT)
            .flat_map(|(board, pages)| {
                let threads = pages.map(|pages| {
                    pages
                        .into_iter()
                        .flat_map(|x| x.threads)
                        .map(|x| (board.clone(), x.no))
                        .collect::<Vec<_>>()
                });
                skip_failed("thread list", threads)
            })
            .map(move |(board, no)| async move {
                let thread = self.thread(board.as_str(), no).await;
                (board, no, thread)
            })
            .buffer_unordered(FAN_OUT_LIMIT)
            .flat_map(|(board, no, thread)| {
                let posts = thread.map(|thread| {
                    thread
                        .posts
                        .into_iter()
                        .map(|post| PostInContext::new(board.clone(), no, post))
                        .collect::<Vec<_>>()
                });
                skip_failed("thread", posts)
            })
    }
}

/// Turn a fetched list into a stream, or an empty one with a warning if fetching failed.
fn skip_failed<T>(what: &str, result: Result<Vec<T>>) -> stream::Iter<std::vec::IntoIter<T>> {
    match result {
        Ok(v) => stream::iter(v),
        Err(e) => {
            warn!("skipped {what}: {e:?}");
            stream::iter(vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.retry_count, 3);
        assert_eq!(options.cache_capacity, 50);
        assert_eq!(options.requested_with, "p4 613fcc6");
    }

    #[test]
    fn test_partial_options() {
        let options: ClientOptions = serde_json::from_str(r#"{"retry_count": 0}"#).unwrap();
        assert_eq!(options.retry_count, 0);
        assert_eq!(options.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[tokio::test]
    async fn test_fetch_served_from_cache() {
        let client = Client::new(ClientOptions::default()).unwrap();
        let url = Endpoint::Boards.url(&[]).unwrap();
        client
            .cache()
            .insert(url.as_str(), br#"{"boards": []}"#.to_vec());

        let boards = client.boards().await.unwrap();
        assert!(boards.boards.is_empty());
    }

    #[tokio::test]
    async fn test_bad_cached_json_is_an_error() {
        let client = Client::new(ClientOptions::default()).unwrap();
        let url = Endpoint::Archive("g".into()).url(&[]).unwrap();
        client.cache().insert(url.as_str(), b"{not json".to_vec());

        let err = client.archive("g").await.unwrap_err();
        assert!(format!("{err:?}").contains("archive.json"));
    }

    #[tokio::test]
    async fn test_all_posts_from_cache() {
        let client = Client::new(ClientOptions::default()).unwrap();
        let put = |endpoint: Endpoint, data: &str| {
            client
                .cache()
                .insert(endpoint.url(&[]).unwrap().as_str(), data.as_bytes().to_vec());
        };
        put(
            Endpoint::Boards,
            r#"{"boards": [{
                "board": "g", "title": "Technology", "ws_board": 1, "per_page": 15,
                "pages": 10, "max_filesize": 1, "max_webm_filesize": 1,
                "max_comment_chars": 1, "max_webm_duration": 1, "bump_limit": 1,
                "image_limit": 1, "cooldowns": {"threads": 1, "replies": 1, "images": 1},
                "meta_description": ""
            }]}"#,
        );
        put(
            Endpoint::AllThreads("g".into()),
            r#"[{"page": 1, "threads": [{"no": 1}, {"no": 2}]}, {"page": 2, "threads": [{"no": 4}]}]"#,
        );
        put(
            Endpoint::Thread("g".into(), 1),
            r#"{"posts": [{"no": 1}, {"no": 3, "resto": 1}]}"#,
        );
        put(Endpoint::Thread("g".into(), 2), r#"{"posts": [{"no": 2}]}"#);
        // Broken thread data is skipped.
        put(Endpoint::Thread("g".into(), 4), "<html>");

        let mut posts = client
            .all_posts()
            .map(|x| (x.thread, x.post.no))
            .collect::<Vec<_>>()
            .await;
        posts.sort();
        assert_eq!(posts, vec![(1, 1), (1, 3), (2, 2)]);
    }
}
