use fc_types::{BoardName, Flag};
use serde::{Deserialize, Serialize};

/// Posting cooldowns on a board, in seconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldowns {
    pub threads: u32,
    pub replies: u32,
    pub images: u32,
}

/// Board settings.
///
/// Not all information provided by upstream are included in this model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    /// Short name used in urls.
    pub board: BoardName,

    /// Human-readable name.
    pub title: String,

    /// Worksafe board.
    pub ws_board: Flag,

    /// Threads on each index page.
    pub per_page: u32,

    /// Count of index pages.
    pub pages: u32,

    /// Max upload size in bytes.
    pub max_filesize: u64,

    pub max_webm_filesize: u64,

    pub max_comment_chars: u32,

    /// In seconds.
    pub max_webm_duration: u32,

    /// Replies before a thread stops bumping.
    pub bump_limit: u32,

    /// Images before a thread stops accepting images.
    pub image_limit: u32,

    pub cooldowns: Cooldowns,

    /// Html escaped.
    pub meta_description: String,

    /// Board has an archive.
    pub is_archived: Option<Flag>,
}

/// Response of [crate::endpoint::Endpoint::Boards].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Boards {
    pub boards: Vec<Board>,
}
