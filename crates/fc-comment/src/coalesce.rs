use std::borrow::Cow;
use std::mem;

use crate::token::Token;
use crate::{LINE_BREAK, WORD_BREAK};

/// Merge adjacent text tokens into one and fold `<br>`/`<wbr>` into the text they sit in.
pub(crate) struct Coalescer<'a, I> {
    tokens: I,

    /// Text collected since the last forwarded tag.
    buffer: String,

    /// Tag token waiting behind a flushed buffer.
    pending: Option<Token<'a>>,
}

impl<'a, I> Coalescer<'a, I>
where
    I: Iterator<Item = Token<'a>>,
{
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            buffer: String::new(),
            pending: None,
        }
    }

    fn flush(&mut self) -> Token<'a> {
        Token::Text(Cow::Owned(mem::take(&mut self.buffer)))
    }
}

impl<'a, I> Iterator for Coalescer<'a, I>
where
    I: Iterator<Item = Token<'a>>,
{
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        loop {
            match self.tokens.next() {
                Some(Token::Text(text)) => self.buffer.push_str(&text),
                Some(Token::TagOpen(LINE_BREAK)) => self.buffer.push('\n'),
                Some(Token::TagOpen(WORD_BREAK)) => self.buffer.push('\u{200b}'),
                Some(tag) => {
                    if self.buffer.is_empty() {
                        return Some(tag);
                    }
                    self.pending = Some(tag);
                    return Some(self.flush());
                }
                None => {
                    if self.buffer.is_empty() {
                        return None;
                    }
                    return Some(self.flush());
                }
            }
        }
    }
}
