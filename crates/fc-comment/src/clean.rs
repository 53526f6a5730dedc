use crate::entity::ENTITIES;
use crate::{LINE_BREAK, WORD_BREAK};

/// Quick cleanup for short escaped fields like subjects and names, where markup is not expected.
pub trait CleanTextExt {
    /// Decode the known entities and turn `<br>`/`<wbr>` into `\n` and U+200B.
    ///
    /// Replacements run one after another over the whole string, so `&amp;gt;` ends up as `>`.
    /// Use [crate::parse] for comment bodies.
    fn clean(&self) -> String;
}

impl CleanTextExt for str {
    fn clean(&self) -> String {
        let mut result = self.to_string();
        for (entity, ch) in ENTITIES {
            result = result.replace(entity, ch.encode_utf8(&mut [0; 4]));
        }
        result
            .replace(LINE_BREAK, "\n")
            .replace(WORD_BREAK, "\u{200b}")
    }
}
