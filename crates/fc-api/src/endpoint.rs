use anyhow::{Context, Result};
use fc_types::{
    BoardName, PageNumber, PostNumber, API_BASE_URL, IMAGE_BASE_URL, ROOT_URL, SEARCH_URL,
    STATIC_BASE_URL, WEB_BASE_URL,
};
use reqwest::Url;

/// Everything fetchable from the api and media hosts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// All boards and their settings.
    Boards,

    /// All threads on a board with their preview replies, grouped by page.
    Catalog(BoardName),

    /// One full thread.
    Thread(BoardName, PostNumber),

    /// One index page of a board.
    Threads(BoardName, PageNumber),

    /// Every thread number on a board, with only minimal information filled in.
    AllThreads(BoardName),

    /// Thread numbers in the board archive.
    Archive(BoardName),

    /// Full image, `tim` and `ext` come from the post.
    Image(BoardName, i64, String),

    /// Thumbnail of a post image, always jpg.
    Thumbnail(BoardName, i64),

    /// Placeholder shown for spoilered images.
    SpoilerImage,

    /// Country flag, by two letter country code.
    Flag(String),

    /// Custom flag on boards with user selected flags.
    PolFlag(String),

    /// Search api, parameters are added as query.
    Search,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Boards => format!("{API_BASE_URL}/boards.json"),
            Endpoint::Catalog(board) => format!("{API_BASE_URL}/{board}/catalog.json"),
            Endpoint::Thread(board, no) => format!("{API_BASE_URL}/{board}/thread/{no}.json"),
            Endpoint::Threads(board, page) => format!("{API_BASE_URL}/{board}/{page}.json"),
            Endpoint::AllThreads(board) => format!("{API_BASE_URL}/{board}/threads.json"),
            Endpoint::Archive(board) => format!("{API_BASE_URL}/{board}/archive.json"),
            Endpoint::Image(board, tim, ext) => format!("{IMAGE_BASE_URL}/{board}/{tim}{ext}"),
            Endpoint::Thumbnail(board, tim) => format!("{IMAGE_BASE_URL}/{board}/{tim}s.jpg"),
            Endpoint::SpoilerImage => format!("{STATIC_BASE_URL}/image/spoiler.png"),
            Endpoint::Flag(country) => format!(
                "{STATIC_BASE_URL}/image/country/{}.gif",
                country.to_lowercase()
            ),
            Endpoint::PolFlag(country) => {
                format!("{STATIC_BASE_URL}/image/country/troll/{country}.gif")
            }
            Endpoint::Search => SEARCH_URL.to_string(),
        }
    }

    /// Build the url with optional query `params`.
    pub fn url(&self, params: &[(&str, &str)]) -> Result<Url> {
        let path = self.path();
        let url = if params.is_empty() {
            Url::parse(path.as_str())
        } else {
            Url::parse_with_params(path.as_str(), params)
        };
        url.with_context(|| format!("invalid endpoint url {path}"))
    }

    /// Url of the search api.
    ///
    /// `offset` and `length` page through results, `board` limits search to one board.
    pub fn search_url(
        query: &str,
        offset: Option<u32>,
        length: Option<u32>,
        board: Option<&str>,
    ) -> Result<Url> {
        let offset = offset.map(|x| x.to_string());
        let length = length.map(|x| x.to_string());
        let mut params = vec![("q", query)];
        if let Some(v) = offset.as_deref() {
            params.push(("o", v));
        }
        if let Some(v) = length.as_deref() {
            params.push(("l", v));
        }
        if let Some(v) = board {
            params.push(("b", v));
        }
        Endpoint::Search.url(params.as_slice())
    }
}

/// Pages on the website, for opening things in a browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WebPage {
    Root,
    Catalog(BoardName),
    Thread(BoardName, PostNumber),

    /// A post inside a thread: board, thread, post.
    Post(BoardName, PostNumber, PostNumber),
}

impl WebPage {
    pub fn path(&self) -> String {
        match self {
            WebPage::Root => ROOT_URL.to_string(),
            WebPage::Catalog(board) => format!("{WEB_BASE_URL}/{board}/catalog"),
            WebPage::Thread(board, thread) => format!("{WEB_BASE_URL}/{board}/thread/{thread}"),
            WebPage::Post(board, thread, post) => {
                format!("{WEB_BASE_URL}/{board}/thread/{thread}#p{post}")
            }
        }
    }

    pub fn url(&self) -> Result<Url> {
        let path = self.path();
        Url::parse(path.as_str()).with_context(|| format!("invalid web page url {path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_paths() {
        assert_eq!(Endpoint::Boards.path(), "https://a.4cdn.org/boards.json");
        assert_eq!(
            Endpoint::Catalog("g".into()).path(),
            "https://a.4cdn.org/g/catalog.json"
        );
        assert_eq!(
            Endpoint::Thread("g".into(), 123).path(),
            "https://a.4cdn.org/g/thread/123.json"
        );
        assert_eq!(
            Endpoint::Threads("g".into(), 2).path(),
            "https://a.4cdn.org/g/2.json"
        );
        assert_eq!(
            Endpoint::AllThreads("g".into()).path(),
            "https://a.4cdn.org/g/threads.json"
        );
        assert_eq!(
            Endpoint::Archive("g".into()).path(),
            "https://a.4cdn.org/g/archive.json"
        );
    }

    #[test]
    fn test_media_paths() {
        assert_eq!(
            Endpoint::Image("g".into(), 1546293948883, ".png".into()).path(),
            "https://i.4cdn.org/g/1546293948883.png"
        );
        assert_eq!(
            Endpoint::Thumbnail("g".into(), 1546293948883).path(),
            "https://i.4cdn.org/g/1546293948883s.jpg"
        );
        assert_eq!(
            Endpoint::SpoilerImage.path(),
            "https://s.4cdn.org/image/spoiler.png"
        );
        assert_eq!(
            Endpoint::Flag("US".into()).path(),
            "https://s.4cdn.org/image/country/us.gif"
        );
        assert_eq!(
            Endpoint::PolFlag("AC".into()).path(),
            "https://s.4cdn.org/image/country/troll/AC.gif"
        );
    }

    #[test]
    fn test_url_params() {
        let url = Endpoint::Boards.url(&[]).unwrap();
        assert_eq!(url.as_str(), "https://a.4cdn.org/boards.json");

        let url = Endpoint::Search.url(&[("q", "a b")]).unwrap();
        assert_eq!(url.as_str(), "https://p.4chan.org/api/search?q=a+b");
    }

    #[test]
    fn test_search_url() {
        let url = Endpoint::search_url("cat", None, None, None).unwrap();
        assert_eq!(url.as_str(), "https://p.4chan.org/api/search?q=cat");

        let url = Endpoint::search_url("cat", Some(10), Some(5), Some("an")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://p.4chan.org/api/search?q=cat&o=10&l=5&b=an"
        );
    }

    #[test]
    fn test_web_pages() {
        assert_eq!(WebPage::Root.path(), "https://4chan.org/");
        assert_eq!(
            WebPage::Catalog("g".into()).path(),
            "https://boards.4chan.org/g/catalog"
        );
        assert_eq!(
            WebPage::Thread("g".into(), 1).path(),
            "https://boards.4chan.org/g/thread/1"
        );
        let url = WebPage::Post("g".into(), 1, 2).url().unwrap();
        assert_eq!(url.fragment(), Some("p2"));
    }
}
