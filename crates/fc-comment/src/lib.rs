//! Parse escaped post comments into flat, renderer agnostic elements.
//!
//! Comments arrive as html escaped text with a handful of tags:
//!
//! ```html
//! <a href="#p123" class="quotelink">&gt;&gt;123</a><br><span class="quote">&gt;be me</span>
//! ```
//!
//! [parse] walks it once and reports one [Element] per run of text. Nested tags are not kept,
//! only the innermost one decides what a run is.
//!
//! ```
//! use fc_comment::{parse_comment, Element};
//!
//! let elements = parse_comment("abc<b>def</b>ghi");
//! assert_eq!(elements[1], Element::Bold("def".to_string()));
//! ```
use serde::{Deserialize, Serialize};

use crate::coalesce::Coalescer;
use crate::context::ContextStack;
use crate::lexer::Lexer;
use crate::linkify::linkify;
use crate::token::Token;

mod clean;
mod coalesce;
mod context;
mod entity;
mod lexer;
mod linkify;
mod scanner;
pub(crate) mod token;

pub use clean::CleanTextExt;
pub use entity::{decode_entity, ENTITIES};

const TAG_OPEN: char = '<';
const TAG_CLOSE: char = '>';
const CLOSE_PREFIX: &str = "</";
const ENTITY_OPEN: char = '&';
const ENTITY_CLOSE: char = ';';
const LINE_BREAK: &str = "<br>";
const WORD_BREAK: &str = "<wbr>";

/// A run of comment text and what it is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Element {
    /// Text outside any tag.
    Plain(String),

    /// `<b>`
    Bold(String),

    /// `<s>`, spoiler on most boards.
    Strikethrough(String),

    /// `<span class="quote">`, greentext line.
    Quote(String),

    /// `<span class="deadlink">`, a quote link to a post that is gone.
    DeadLink(String),

    /// `<a href="...">` or a bare link found in plain text.
    ///
    /// `href` is empty if the tag has none.
    Anchor { text: String, href: String },
}

impl Element {
    /// The visible text, whatever the kind.
    pub fn text(&self) -> &str {
        match self {
            Element::Plain(v)
            | Element::Bold(v)
            | Element::Strikethrough(v)
            | Element::Quote(v)
            | Element::DeadLink(v) => v.as_str(),
            Element::Anchor { text, .. } => text.as_str(),
        }
    }
}

/// Parse comment `text`, calling `consumer` once per [Element] in document order.
///
/// Never fails:
///
/// * An unterminated tag or entity makes the rest of the input plain text.
/// * Unknown entities are kept as written.
/// * Text inside unknown tags is dropped.
/// * A closing tag always closes the innermost open tag, whatever its name.
pub fn parse<F>(text: &str, mut consumer: F)
where
    F: FnMut(Element),
{
    let mut stack = ContextStack::default();

    for token in Coalescer::new(Lexer::new(text)) {
        match token {
            Token::TagOpen(raw) => stack.push(raw),
            Token::TagClose(raw) => stack.pop(raw),
            Token::Text(text) => match stack.top() {
                None => linkify(text.into_owned(), &mut consumer),
                Some(context) => {
                    if let Some(element) = context.element(text.into_owned()) {
                        consumer(element);
                    }
                }
            },
        }
    }
}

/// Parse comment `text` and collect all elements.
pub fn parse_comment(text: &str) -> Vec<Element> {
    let mut elements = vec![];
    parse(text, |x| elements.push(x));
    elements
}
