use anyhow::Result;
use fc_types::{BoardName, PostNumber};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::board::Boards;
use crate::client::Client;
use crate::thread::{Catalog, ChanThread};

/// Values a [Loader] can hold.
///
/// A loader starts from the default value and only fetches while the value is still empty.
pub trait Loadable: Default + Send + Sync + 'static {
    fn is_empty(&self) -> bool;
}

impl Loadable for Boards {
    fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl Loadable for ChanThread {
    fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl Loadable for Catalog {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

type FetchFn<T> = dyn Fn(Client) -> BoxFuture<'static, Result<T>> + Send + Sync;

/// A value fetched in background on first use, for a ui to observe.
///
/// [Loader::subscribe] hands out a receiver seeing the empty default at first and the fetched
/// value once it arrives. A failed fetch is logged and leaves the empty value, the next
/// subscription tries again.
///
/// Dropping the loader cancels a fetch still running.
pub struct Loader<T> {
    client: Client,
    sender: Arc<watch::Sender<T>>,
    fetch: Box<FetchFn<T>>,
    loading: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Loader<T>
where
    T: Loadable,
{
    pub fn new<U>(client: Client, fetch: U) -> Self
    where
        U: Fn(Client) -> BoxFuture<'static, Result<T>> + Send + Sync + 'static,
    {
        let (sender, _) = watch::channel(T::default());
        Self {
            client,
            sender: Arc::new(sender),
            fetch: Box::new(fetch),
            loading: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
        }
    }

    /// Observe the value, starting the fetch if there is nothing yet.
    ///
    /// Must be called inside a tokio runtime.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        let receiver = self.sender.subscribe();
        if self.sender.borrow().is_empty() && !self.loading.swap(true, Ordering::AcqRel) {
            debug!("start loading");
            let future = (self.fetch)(self.client.clone());
            let sender = self.sender.clone();
            let loading = self.loading.clone();
            let handle = tokio::spawn(async move {
                match future.await {
                    Ok(v) => {
                        sender.send_replace(v);
                    }
                    Err(e) => warn!("failed to load: {e:?}"),
                }
                loading.store(false, Ordering::Release);
            });
            *self.task.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        }
        receiver
    }

    /// A fetch is running.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }
}

impl<T> Loader<T>
where
    T: Loadable + Clone,
{
    pub fn current(&self) -> T {
        self.sender.borrow().clone()
    }
}

impl Loader<Boards> {
    pub fn boards(client: Client) -> Self {
        Self::new(client, |c| async move { c.boards().await }.boxed())
    }
}

impl Loader<ChanThread> {
    pub fn thread(client: Client, board: impl Into<BoardName>, no: PostNumber) -> Self {
        let board = board.into();
        Self::new(client, move |c| {
            let board = board.clone();
            async move { c.thread(board.as_str(), no).await }.boxed()
        })
    }
}

impl Loader<Catalog> {
    pub fn catalog(client: Client, board: impl Into<BoardName>) -> Self {
        let board = board.into();
        Self::new(client, move |c| {
            let board = board.clone();
            async move { c.catalog(board.as_str()).await }.boxed()
        })
    }
}

impl<T> Drop for Loader<T> {
    fn drop(&mut self) {
        let task = self
            .task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientOptions;
    use crate::endpoint::Endpoint;
    use crate::thread::Page;
    use anyhow::anyhow;
    use std::sync::atomic::AtomicUsize;

    fn client() -> Client {
        Client::new(ClientOptions::default()).unwrap()
    }

    async fn wait_idle<T: Loadable>(loader: &Loader<T>) {
        while loader.is_loading() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_load_on_subscribe() {
        let client = client();
        client.cache().insert(
            Endpoint::Thread("g".into(), 7).url(&[]).unwrap().as_str(),
            br#"{"posts": [{"no": 7}]}"#.to_vec(),
        );
        let loader = Loader::thread(client, "g", 7);
        assert!(loader.current().posts.is_empty());

        let mut receiver = loader.subscribe();
        assert!(receiver.borrow().posts.is_empty());
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow().id(), 7);
        assert_eq!(loader.current().id(), 7);
    }

    #[tokio::test]
    async fn test_fetch_once_when_loaded() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let loader: Loader<Catalog> = Loader::new(client(), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            let page = Page {
                page: 1,
                threads: vec![],
            };
            async move { Result::<Catalog>::Ok(vec![page]) }.boxed()
        });

        let mut receiver = loader.subscribe();
        receiver.changed().await.unwrap();
        wait_idle(&loader).await;
        let _again = loader.subscribe();
        assert!(!loader.is_loading());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_empty_and_retries() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let loader: Loader<Boards> = Loader::new(client(), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Result::<Boards>::Err(anyhow!("offline")) }.boxed()
        });

        let receiver = loader.subscribe();
        wait_idle(&loader).await;
        assert!(receiver.borrow().boards.is_empty());

        let _receiver = loader.subscribe();
        wait_idle(&loader).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
