use std::borrow::Cow;

/// All types of tokens.
///
/// Tokens only live during one parse call and borrow from the input where they can.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Tag head, raw text including attributes.
    ///
    /// `<span class="quote">`
    TagOpen(&'a str),

    /// Tag tail.
    ///
    /// `</span>`
    TagClose(&'a str),

    /// Plain text, entities already decoded.
    Text(Cow<'a, str>),
}
