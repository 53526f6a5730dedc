use fc_types::{PageNumber, PostNumber};
use serde::{Deserialize, Serialize};

use crate::post::Post;

/// Thread model.
///
/// The first post is the opening post.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChanThread {
    pub posts: Vec<Post>,
}

impl ChanThread {
    /// Thread number, which is the number of the opening post, or 0 for an empty thread.
    pub fn id(&self) -> PostNumber {
        self.posts.first().map(|x| x.no).unwrap_or_default()
    }

    pub fn op(&self) -> Option<&Post> {
        self.posts.first()
    }
}

/// Response of [crate::endpoint::Endpoint::Threads], an index page.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Threads {
    pub threads: Vec<ChanThread>,
}

/// One page of threads.
///
/// In the catalog each thread is its opening post with `last_replies`, in the thread list only
/// `no`, `last_modified` and `replies` are filled.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page {
    pub page: PageNumber,
    pub threads: Vec<Post>,
}

/// Response of [crate::endpoint::Endpoint::Catalog].
pub type Catalog = Vec<Page>;

/// Response of [crate::endpoint::Endpoint::AllThreads].
pub type Pages = Vec<Page>;

/// Response of [crate::endpoint::Endpoint::Archive].
pub type Archive = Vec<PostNumber>;

/// Drop posts that shall not be shown.
pub trait FilterShownExt {
    /// Keep only the posts `filter` returns `true` for.
    fn filter_should_be_shown<F>(self, filter: &F) -> Self
    where
        F: Fn(&Post) -> bool;
}

impl FilterShownExt for Vec<Post> {
    fn filter_should_be_shown<F>(self, filter: &F) -> Self
    where
        F: Fn(&Post) -> bool,
    {
        self.into_iter().filter(|x| filter(x)).collect()
    }
}

impl FilterShownExt for ChanThread {
    fn filter_should_be_shown<F>(self, filter: &F) -> Self
    where
        F: Fn(&Post) -> bool,
    {
        ChanThread {
            posts: self.posts.filter_should_be_shown(filter),
        }
    }
}

impl FilterShownExt for Page {
    fn filter_should_be_shown<F>(self, filter: &F) -> Self
    where
        F: Fn(&Post) -> bool,
    {
        Page {
            page: self.page,
            threads: self.threads.filter_should_be_shown(filter),
        }
    }
}

impl FilterShownExt for Vec<Page> {
    fn filter_should_be_shown<F>(self, filter: &F) -> Self
    where
        F: Fn(&Post) -> bool,
    {
        self.into_iter()
            .map(|x| x.filter_should_be_shown(filter))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"page": 1, "threads": [
            {"no": 10, "tim": 1, "w": 800, "h": 600, "replies": 2,
             "last_replies": [{"no": 11, "resto": 10, "com": "hi"}]},
            {"no": 20, "replies": 0}
        ]},
        {"page": 2, "threads": [
            {"no": 30, "tim": 3, "w": 10, "h": 10}
        ]}
    ]"#;

    #[test]
    fn test_deserialize_catalog() {
        let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        let op = &catalog[0].threads[0];
        assert_eq!(op.no, 10);
        let last = op.last_replies.as_ref().unwrap();
        assert_eq!(last[0].resto, Some(10));
    }

    #[test]
    fn test_filter_catalog() {
        let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();
        let filtered = catalog.filter_should_be_shown(&Post::has_reasonable_sized_image);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].threads.len(), 1);
        assert_eq!(filtered[0].threads[0].no, 10);
        assert!(filtered[1].threads.is_empty());
    }

    #[test]
    fn test_thread_id() {
        let thread: ChanThread =
            serde_json::from_str(r#"{"posts": [{"no": 5}, {"no": 6, "resto": 5}]}"#).unwrap();
        assert_eq!(thread.id(), 5);
        assert_eq!(ChanThread::default().id(), 0);

        let thread = thread.filter_should_be_shown(&|x: &Post| x.resto.is_some());
        assert_eq!(thread.id(), 6);
    }

    #[test]
    fn test_deserialize_archive_and_threads() {
        let archive: Archive = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(archive, vec![1, 2, 3]);

        let pages: Pages = serde_json::from_str(
            r#"[{"page": 1, "threads": [{"no": 7, "last_modified": 1700000000, "replies": 4}]}]"#,
        )
        .unwrap();
        assert_eq!(pages[0].threads[0].last_modified, Some(1700000000));

        let threads: Threads =
            serde_json::from_str(r#"{"threads": [{"posts": [{"no": 9}]}]}"#).unwrap();
        assert_eq!(threads.threads[0].id(), 9);
    }
}
