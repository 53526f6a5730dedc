use fc_api::board::Board;
use fc_api::post::Post;
use fc_comment::Element;
use std::fmt::Write;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Render comment elements to terminal friendly text.
///
/// Bold and strikethrough are marked with markdown symbols, links show their target after the
/// text unless both are the same.
pub fn render_elements(elements: &[Element]) -> String {
    let mut out = String::new();
    for element in elements {
        match element {
            Element::Plain(v) | Element::Quote(v) => out.push_str(v),
            Element::Bold(v) => {
                let _ = write!(out, "**{v}**");
            }
            Element::Strikethrough(v) => {
                let _ = write!(out, "~~{v}~~");
            }
            Element::DeadLink(v) => {
                let _ = write!(out, "{v} (dead)");
            }
            Element::Anchor { text, href } if href.is_empty() || href == text => {
                out.push_str(text)
            }
            Element::Anchor { text, href } => {
                let _ = write!(out, "{text} <{href}>");
            }
        }
    }
    out
}

/// Render one post: a header line, the attached file if any, then the comment.
pub fn render_post(post: &Post) -> String {
    let mut out = format!("No.{}", post.no);
    if let Some(name) = post.clean_name() {
        let _ = write!(out, " {name}");
    }
    if let Some(trip) = post.trip.as_deref() {
        out.push_str(trip);
    }
    if let Some(time) = post.posted_at() {
        let _ = write!(out, " {}", time.format(TIME_FORMAT));
    }
    if let Some(subject) = post.clean_subject() {
        let _ = write!(out, "\n{subject}");
    }
    if let (Some(filename), Some(ext)) = (post.filename.as_deref(), post.ext.as_deref()) {
        let _ = write!(out, "\n[{filename}{ext}");
        if let (Some(w), Some(h)) = (post.w, post.h) {
            let _ = write!(out, " {w}x{h}");
        }
        out.push(']');
    }
    let comment = render_elements(post.comment_elements().as_slice());
    if !comment.is_empty() {
        let _ = write!(out, "\n{comment}");
    }
    out
}

pub fn render_board(board: &Board) -> String {
    let mut out = format!("/{}/ {}", board.board, board.title);
    if !board.ws_board.is_set() {
        out.push_str(" (nsfw)");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_comment::parse_comment;

    #[test]
    fn test_render_elements() {
        let elements = parse_comment(
            r##"<a href="#p1" class="quotelink">&gt;&gt;1</a><br><b>bold</b> <s>spoiler</s><br><span class="deadlink">&gt;&gt;2</span> see https://example.com"##,
        );
        assert_eq!(
            render_elements(elements.as_slice()),
            ">>1 <#p1>\n**bold** ~~spoiler~~\n>>2 (dead) see https://example.com"
        );
        assert_eq!(render_elements(&[]), "");
    }

    #[test]
    fn test_render_post() {
        let post: Post = serde_json::from_str(
            r#"{"no": 10, "name": "Anonymous", "time": 0, "sub": "a &amp; b",
                "filename": "cat", "ext": ".jpg", "w": 800, "h": 600,
                "com": "<span class=\"quote\">&gt;be me</span>"}"#,
        )
        .unwrap();
        assert_eq!(
            render_post(&post),
            "No.10 Anonymous 1970-01-01 00:00:00 UTC\na & b\n[cat.jpg 800x600]\n>be me"
        );

        let post: Post = serde_json::from_str(r#"{"no": 11}"#).unwrap();
        assert_eq!(render_post(&post), "No.11");
    }
}
