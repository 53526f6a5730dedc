use anyhow::Result;
use chrono::{DateTime, Utc};
use fc_comment::{parse_comment, CleanTextExt, Element};
use fc_types::{BoardName, Flag, PostNumber};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;

/// Images narrower or lower than this are not worth showing.
const MIN_IMAGE_SIDE: u32 = 32;

/// A message from a user.
///
/// The opening post of a thread carries the thread level fields (`sticky`, `replies`, ...), they
/// are `None` on replies. Fields absent upstream are `None` too.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    /// Post number.
    pub no: PostNumber,

    /// Thread this post replies to, 0 for opening posts.
    pub resto: Option<PostNumber>,

    /// Stickied thread.
    pub sticky: Option<Flag>,

    /// Closed thread.
    pub closed: Option<Flag>,

    /// Archived thread.
    pub archived: Option<Flag>,

    /// Unix timestamp when archived.
    pub archived_on: Option<i64>,

    /// `MM/DD/YY(Day)HH:MM`, `:SS` on some boards, EST/EDT timezone.
    pub now: Option<String>,

    /// User name.
    ///
    /// Html escaped.
    pub name: Option<String>,

    /// Tripcode.
    pub trip: Option<String>,

    /// Poster id on boards with ids enabled.
    pub id: Option<String>,

    pub capcode: Option<String>,

    /// ISO 3166-1 alpha-2 country code.
    pub country: Option<String>,

    pub country_name: Option<String>,

    /// Subject.
    ///
    /// Html escaped.
    pub sub: Option<String>,

    /// Comment.
    ///
    /// Html escaped with markup, see [Post::comment_elements].
    pub com: Option<String>,

    /// Renamed filename, unix timestamp plus milliseconds.
    ///
    /// Used to build image urls.
    pub tim: Option<i64>,

    /// Original filename.
    pub filename: Option<String>,

    /// File extension with the dot: `.jpg`, `.png`, `.gif`, `.pdf`, `.swf`, `.webm`.
    pub ext: Option<String>,

    /// File size in bytes.
    pub fsize: Option<u64>,

    /// Base64 file md5.
    pub md5: Option<String>,

    /// Image width.
    pub w: Option<u32>,

    /// Image height.
    pub h: Option<u32>,

    /// Thumbnail width.
    pub tn_w: Option<u32>,

    /// Thumbnail height.
    pub tn_h: Option<u32>,

    pub filedeleted: Option<Flag>,

    pub spoiler: Option<Flag>,

    /// Custom spoiler, 1-99.
    pub custom_spoiler: Option<u32>,

    pub omitted_posts: Option<u32>,

    pub omitted_images: Option<u32>,

    /// Unix timestamp.
    pub time: Option<i64>,

    /// Thread url slug.
    pub semantic_url: Option<String>,

    /// Count of unique ips in thread.
    pub unique_ips: Option<u32>,

    pub replies: Option<u32>,

    pub images: Option<u32>,

    /// Bump limit met.
    pub bumplimit: Option<Flag>,

    /// Image limit met.
    pub imagelimit: Option<Flag>,

    /// Latest replies, only in catalog.
    pub last_replies: Option<Vec<Post>>,

    /// Unix timestamp of the last modification.
    pub last_modified: Option<i64>,

    /// Thread tag, only on /f/.
    pub tag: Option<String>,

    /// Year the poster bought a pass.
    pub since4pass: Option<u32>,
}

impl Post {
    /// Parsed comment, empty if there is no comment.
    pub fn comment_elements(&self) -> Vec<Element> {
        self.com.as_deref().map(parse_comment).unwrap_or_default()
    }

    /// Subject with entities decoded.
    pub fn clean_subject(&self) -> Option<String> {
        self.sub.as_deref().map(CleanTextExt::clean)
    }

    /// Name with entities decoded.
    pub fn clean_name(&self) -> Option<String> {
        self.name.as_deref().map(CleanTextExt::clean)
    }

    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(|x| DateTime::from_timestamp(x, 0))
    }

    /// Has an image that is not tiny.
    pub fn has_reasonable_sized_image(&self) -> bool {
        self.tim.is_some()
            && self.w.unwrap_or_default() >= MIN_IMAGE_SIDE
            && self.h.unwrap_or_default() >= MIN_IMAGE_SIDE
    }

    /// The file can be shown as an image directly.
    pub fn has_renderable_image(&self) -> bool {
        self.ext.as_deref().is_some_and(renderable_image_extension)
    }
}

/// Image types that decode everywhere, animated or not.
pub fn renderable_image_extension(ext: &str) -> bool {
    matches!(ext, ".gif" | ".jpg" | ".png")
}

/// A post with the board and thread it belongs to.
///
/// Upstream posts do not know their board, carry it along when walking several boards.
#[derive(Clone, Debug)]
pub struct PostInContext {
    pub board: BoardName,
    pub thread: PostNumber,
    pub post: Post,
}

impl PostInContext {
    pub fn new(board: impl Into<BoardName>, thread: PostNumber, post: Post) -> Self {
        Self {
            board: board.into(),
            thread,
            post,
        }
    }

    /// Full image, only for renderable types.
    pub fn image(&self) -> Option<Endpoint> {
        match (self.post.tim, self.post.ext.as_ref()) {
            (Some(tim), Some(ext)) if renderable_image_extension(ext) => {
                Some(Endpoint::Image(self.board.clone(), tim, ext.clone()))
            }
            _ => None,
        }
    }

    /// Thumbnail, present for any uploaded file that is not deleted.
    pub fn thumbnail(&self) -> Option<Endpoint> {
        if self.post.filedeleted.is_some_and(|x| x.is_set()) {
            return None;
        }
        self.post
            .tim
            .map(|tim| Endpoint::Thumbnail(self.board.clone(), tim))
    }

    /// Something showable as image: the full image for renderable types, otherwise the thumbnail.
    pub fn renderable_image(&self) -> Option<Endpoint> {
        if self.post.has_renderable_image() {
            self.image()
        } else {
            self.thumbnail()
        }
    }

    pub fn renderable_image_url(&self) -> Result<Option<Url>> {
        self.renderable_image().map(|x| x.url(&[])).transpose()
    }

    /// Width and height.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.post.w.zip(self.post.h)
    }

    /// Width and height.
    pub fn thumbnail_size(&self) -> Option<(u32, u32)> {
        self.post.tn_w.zip(self.post.tn_h)
    }

    /// Size of whatever [PostInContext::renderable_image] points to.
    pub fn renderable_image_size(&self) -> Option<(u32, u32)> {
        if self.post.has_renderable_image() {
            self.image_size()
        } else {
            self.thumbnail_size()
        }
    }
}
