use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

use crate::Element;

/// Regex to pick the link target out of an anchor tag.
static HREF_RE: OnceLock<Regex> = OnceLock::new();

/// What an open tag means for the text inside it.
///
/// Decided once when the tag is pushed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Context {
    /// `<b>`
    Bold,

    /// `<s>`
    Strikethrough,

    /// `<span class="quote">`, greentext.
    Quote,

    /// `<span class="deadlink">`, a reply link to a deleted post.
    DeadLink,

    /// `<a ...>`, target taken from the `href` attribute.
    Anchor { href: String },

    /// Any other tag.
    ///
    /// Text inside is dropped.
    Unknown,
}

impl Context {
    pub fn classify(raw: &str) -> Self {
        match raw {
            "<b>" => Context::Bold,
            "<s>" => Context::Strikethrough,
            r#"<span class="quote">"# => Context::Quote,
            r#"<span class="deadlink">"# => Context::DeadLink,
            v if v.starts_with("<a ") => Context::Anchor {
                href: extract_href(v),
            },
            _ => Context::Unknown,
        }
    }

    /// Wrap `text` in the element this context produces, if any.
    pub fn element(&self, text: String) -> Option<Element> {
        let element = match self {
            Context::Bold => Element::Bold(text),
            Context::Strikethrough => Element::Strikethrough(text),
            Context::Quote => Element::Quote(text),
            Context::DeadLink => Element::DeadLink(text),
            Context::Anchor { href } => Element::Anchor {
                text,
                href: href.clone(),
            },
            Context::Unknown => return None,
        };
        Some(element)
    }
}

/// Value of the first `href="..."` in `tag`, or empty if there is none.
fn extract_href(tag: &str) -> String {
    HREF_RE
        .get_or_init(|| Regex::new(r#"href="(?<href>[^"]*)""#).unwrap())
        .captures(tag)
        .and_then(|x| x.name("href"))
        .map(|x| x.as_str().to_string())
        .unwrap_or_default()
}

/// An open tag on the stack.
#[derive(Debug)]
struct Frame<'a> {
    raw: &'a str,
    context: Context,
}

/// Currently open tags, innermost last.
///
/// Closing tags are not checked against the opening ones, any close pops the innermost.
#[derive(Debug, Default)]
pub(crate) struct ContextStack<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> ContextStack<'a> {
    pub fn push(&mut self, raw: &'a str) {
        self.frames.push(Frame {
            raw,
            context: Context::classify(raw),
        });
    }

    pub fn pop(&mut self, raw: &str) {
        match self.frames.pop() {
            Some(frame) if frame.raw != raw => {
                trace!("tag {:?} closed by {raw:?}", frame.raw);
            }
            Some(_) => {}
            None => trace!("unbalanced close tag {raw:?} ignored"),
        }
    }

    /// Innermost context, `None` when no tag is open.
    pub fn top(&self) -> Option<&Context> {
        self.frames.last().map(|x| &x.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Context::classify("<b>"), Context::Bold);
        assert_eq!(Context::classify("<s>"), Context::Strikethrough);
        assert_eq!(Context::classify(r#"<span class="quote">"#), Context::Quote);
        assert_eq!(
            Context::classify(r#"<span class="deadlink">"#),
            Context::DeadLink
        );
        assert_eq!(Context::classify("<B>"), Context::Unknown);
        assert_eq!(Context::classify("<span>"), Context::Unknown);
        assert_eq!(Context::classify("<a>"), Context::Unknown);
    }

    #[test]
    fn test_classify_anchor() {
        assert_eq!(
            Context::classify(r##"<a href="#p123" class="quotelink">"##),
            Context::Anchor {
                href: "#p123".to_string()
            }
        );
        assert_eq!(
            Context::classify(r#"<a class="x" href="/g/thread/1#p2">"#),
            Context::Anchor {
                href: "/g/thread/1#p2".to_string()
            }
        );
        assert_eq!(
            Context::classify(r#"<a class="x">"#),
            Context::Anchor {
                href: String::new()
            }
        );
        assert_eq!(
            Context::classify(r#"<a href="">"#),
            Context::Anchor {
                href: String::new()
            }
        );
    }

    #[test]
    fn test_unknown_context_drops_text() {
        assert_eq!(Context::Unknown.element("abc".to_string()), None);
        assert_eq!(
            Context::Quote.element(">abc".to_string()),
            Some(Element::Quote(">abc".to_string()))
        );
    }

    #[test]
    fn test_stack_pop_is_unconditional() {
        let mut stack = ContextStack::default();
        stack.pop("</b>");
        assert_eq!(stack.top(), None);

        stack.push("<b>");
        stack.push("<s>");
        assert_eq!(stack.top(), Some(&Context::Strikethrough));
        stack.pop("</b>");
        assert_eq!(stack.top(), Some(&Context::Bold));
        stack.pop("</span>");
        assert_eq!(stack.top(), None);
    }
}
