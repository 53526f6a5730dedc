use std::borrow::Cow;

use tracing::trace;

use crate::entity::decode_entity;
use crate::scanner::Scanner;
use crate::token::Token;
use crate::{CLOSE_PREFIX, ENTITY_CLOSE, ENTITY_OPEN, TAG_CLOSE, TAG_OPEN};

/// Split raw comment into [Token]s, left to right, in one pass.
pub(crate) struct Lexer<'a> {
    /// Inner scanner.
    source: Scanner<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            source: Scanner::new(data),
        }
    }

    /// Construct a tag or entity token.
    ///
    /// The caller shall ensure current position is on the `<` or `&`.
    fn scan_markup(&mut self) -> Token<'a> {
        let rest = self.source.rest();
        let close = if rest.starts_with(TAG_OPEN) {
            TAG_CLOSE
        } else {
            ENTITY_CLOSE
        };

        let end = match rest.find(close) {
            Some(v) => v,
            None => return self.fallback(),
        };

        let raw = self.source.take(end + 1);
        if close == TAG_CLOSE {
            if raw.starts_with(CLOSE_PREFIX) {
                Token::TagClose(raw)
            } else {
                Token::TagOpen(raw)
            }
        } else {
            match decode_entity(raw) {
                Some(ch) => Token::Text(Cow::Owned(ch.to_string())),
                None => {
                    trace!("unknown entity {raw:?} kept as text");
                    Token::Text(Cow::Borrowed(raw))
                }
            }
        }
    }

    /// Unterminated tag or entity, treat all input left as plain text and finish.
    fn fallback(&mut self) -> Token<'a> {
        trace!(
            "unterminated markup at {}, keeping the rest as text",
            self.source.position()
        );
        Token::Text(Cow::Borrowed(self.source.take_rest()))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source.done() {
            return None;
        }

        let token = match self.source.find_any(&[TAG_OPEN, ENTITY_OPEN]) {
            Some(0) => self.scan_markup(),
            Some(v) => Token::Text(Cow::Borrowed(self.source.take(v))),
            None => Token::Text(Cow::Borrowed(self.source.take_rest())),
        };
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(v: &str) -> Token<'_> {
        Token::Text(Cow::Borrowed(v))
    }

    fn lex(data: &str) -> Vec<Token<'_>> {
        Lexer::new(data).collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(lex("abc def"), vec![text("abc def")]);
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn test_tags() {
        assert_eq!(
            lex(r##"abc<a href="#p1">def</a>"##),
            vec![
                text("abc"),
                Token::TagOpen(r##"<a href="#p1">"##),
                text("def"),
                Token::TagClose("</a>"),
            ]
        );
    }

    #[test]
    fn test_entities() {
        assert_eq!(
            lex("a&gt;b&foo;"),
            vec![text("a"), text(">"), text("b"), text("&foo;")]
        );
    }

    #[test]
    fn test_unterminated_tag_keeps_rest() {
        assert_eq!(lex("abc<b def &amp;"), vec![text("abc"), text("<b def &amp;")]);
    }

    #[test]
    fn test_unterminated_entity_keeps_rest() {
        assert_eq!(lex("x & y <b>z</b>"), vec![text("x "), text("& y <b>z</b>")]);
    }

    #[test]
    fn test_entity_runs_to_first_semicolon() {
        // Whatever sits between `&` and the next `;` is one entity candidate.
        assert_eq!(lex("a & b; c"), vec![text("a "), text("& b;"), text(" c")]);
    }

    #[test]
    fn test_tag_runs_to_first_close() {
        assert_eq!(
            lex("<<b>>"),
            vec![Token::TagOpen("<<b>"), text(">")]
        );
    }
}
