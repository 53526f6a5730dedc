use regex::Regex;
use std::sync::OnceLock;

use crate::Element;

/// Regex to match a whole word that looks like a link.
///
/// Either a `http(s)://` url, or a bare `label.label/path` where labels are ascii alphanumerics
/// and `-`.
static URL_RE: OnceLock<Regex> = OnceLock::new();

fn is_url(word: &str) -> bool {
    URL_RE
        .get_or_init(|| {
            Regex::new(r"^(?:https?://\S+|[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+/\S*)$")
                .unwrap()
        })
        .is_match(word)
}

/// Split untagged `text` into plain runs and [Element::Anchor]s for bare links in it.
///
/// Whitespace always stays in the plain runs. Text without links comes out as a single
/// [Element::Plain].
pub(crate) fn linkify<F>(text: String, consumer: &mut F)
where
    F: FnMut(Element),
{
    // End of the last link emitted, start of the plain run not emitted yet.
    let mut plain_start = 0;
    let mut word_start: Option<usize> = None;

    // A trailing sentinel space closes the last word.
    for (idx, ch) in text.char_indices().chain([(text.len(), ' ')]) {
        if !ch.is_whitespace() {
            word_start.get_or_insert(idx);
            continue;
        }
        let start = match word_start.take() {
            Some(v) => v,
            None => continue,
        };
        let word = &text[start..idx];
        if !is_url(word) {
            continue;
        }
        if plain_start < start {
            consumer(Element::Plain(text[plain_start..start].to_string()));
        }
        consumer(Element::Anchor {
            text: word.to_string(),
            href: word.to_string(),
        });
        plain_start = idx;
    }

    if plain_start == 0 {
        consumer(Element::Plain(text));
    } else if plain_start < text.len() {
        consumer(Element::Plain(text[plain_start..].to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<Element> {
        let mut result = vec![];
        linkify(text.to_string(), &mut |x| result.push(x));
        result
    }

    fn anchor(link: &str) -> Element {
        Element::Anchor {
            text: link.to_string(),
            href: link.to_string(),
        }
    }

    #[test]
    fn test_no_links() {
        assert_eq!(run("abc def"), vec![Element::Plain("abc def".to_string())]);
        assert_eq!(run("1.5 is a number"), vec![Element::Plain("1.5 is a number".to_string())]);
        assert_eq!(run("a/b c.d"), vec![Element::Plain("a/b c.d".to_string())]);
    }

    #[test]
    fn test_numeric_labels() {
        assert_eq!(run("1.5/"), vec![anchor("1.5/")]);
        assert_eq!(run("10.0.0.1/x"), vec![anchor("10.0.0.1/x")]);
    }

    #[test]
    fn test_scheme_links() {
        assert_eq!(
            run("see https://example.com"),
            vec![Element::Plain("see ".to_string()), anchor("https://example.com")]
        );
        assert_eq!(run("http://"), vec![Element::Plain("http://".to_string())]);
        assert_eq!(run("ftp://a.b"), vec![Element::Plain("ftp://a.b".to_string())]);
    }

    #[test]
    fn test_bare_host_links() {
        assert_eq!(
            run("example.com/a/b.gif\nnext"),
            vec![anchor("example.com/a/b.gif"), Element::Plain("\nnext".to_string())]
        );
        assert_eq!(run("sub.example.co.uk/"), vec![anchor("sub.example.co.uk/")]);
        // No path, not a link.
        assert_eq!(run("example.com"), vec![Element::Plain("example.com".to_string())]);
    }

    #[test]
    fn test_adjacent_links() {
        assert_eq!(
            run("a.bc/d  http://e"),
            vec![anchor("a.bc/d"), Element::Plain("  ".to_string()), anchor("http://e")]
        );
    }

    #[test]
    fn test_word_must_start_with_link() {
        assert_eq!(
            run("(http://example.com)"),
            vec![Element::Plain("(http://example.com)".to_string())]
        );
    }
}
