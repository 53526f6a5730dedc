use serde::{Deserialize, Serialize};

use crate::post::Post;

/// Response of the search api.
///
/// The api is undocumented and reverse engineered from the mobile site, every field is optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub body: Option<SearchResultsBody>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchResultsBody {
    pub board: Option<String>,

    /// Total hits.
    pub nhits: Option<u64>,

    /// Decimal integer in a string.
    pub offset: Option<String>,

    pub query: Option<String>,

    pub threads: Option<Vec<SearchResultsThread>>,
}

/// A thread with the posts that matched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResultsThread {
    pub board: Option<String>,

    pub posts: Option<Vec<Post>>,

    /// Thread id in the form of `t<number>`.
    pub thread: String,
}

impl SearchResultsThread {
    /// Thread number parsed from [SearchResultsThread::thread].
    pub fn thread_number(&self) -> Option<u64> {
        self.thread.strip_prefix('t')?.parse().ok()
    }
}

impl SearchResults {
    /// Keep only the threads `predicate` returns `true` for.
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&SearchResultsThread) -> bool,
    {
        SearchResults {
            body: self.body.map(|x| x.filter(predicate)),
        }
    }
}

impl SearchResultsBody {
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&SearchResultsThread) -> bool,
    {
        SearchResultsBody {
            threads: self
                .threads
                .map(|x| x.into_iter().filter(|t| predicate(t)).collect()),
            ..self
        }
    }
}
