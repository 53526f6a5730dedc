/// The only character entities upstream escapes comments with.
///
/// Anything else, including other numeric references, is left as is.
pub const ENTITIES: [(&str, char); 6] = [
    ("&#039;", '\''),
    ("&#044;", ','),
    ("&amp;", '&'),
    ("&gt;", '>'),
    ("&lt;", '<'),
    ("&quot;", '"'),
];

/// Decode a full entity reference, `&` and `;` included.
pub fn decode_entity(entity: &str) -> Option<char> {
    ENTITIES
        .iter()
        .find(|(name, _)| *name == entity)
        .map(|(_, ch)| *ch)
}
