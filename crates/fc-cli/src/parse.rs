use crate::cmd::ParseArgs;
use crate::config::OutputFormat;
use crate::thread::render_thread;
use crate::utils::print_output;
use anyhow::{Context, Result};
use fc_api::post::Post;
use fc_api::thread::ChanThread;
use fc_comment::Element;
use fc_types::PostNumber;
use serde::Serialize;
use tokio::fs;

/// A post with its comment parsed, what json output of this command holds.
#[derive(Debug, Serialize)]
struct ParsedPost {
    no: PostNumber,
    subject: Option<String>,
    name: Option<String>,
    comment: Vec<Element>,
}

impl From<&Post> for ParsedPost {
    fn from(value: &Post) -> Self {
        Self {
            no: value.no,
            subject: value.clean_subject(),
            name: value.clean_name(),
            comment: value.comment_elements(),
        }
    }
}

pub async fn run_parse_command(args: ParseArgs, format: OutputFormat) -> Result<()> {
    let content = fs::read(args.file.as_str())
        .await
        .context("when reading content file")?;
    let thread = parse_thread(content.as_slice())
        .with_context(|| format!("when parsing thread data in {}", args.file))?;
    match format {
        OutputFormat::Text => print_output(&thread, format, render_thread),
        OutputFormat::Json => {
            let posts = thread.posts.iter().map(ParsedPost::from).collect::<Vec<_>>();
            print_output(&posts, format, |_| String::new())
        }
    }
}

fn parse_thread(data: &[u8]) -> Result<ChanThread> {
    Ok(serde_json::from_slice(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_thread() {
        let thread =
            parse_thread(br#"{"posts": [{"no": 1, "sub": "&quot;hi&quot;", "com": "a<br>b"}]}"#)
                .unwrap();
        let parsed = ParsedPost::from(&thread.posts[0]);
        assert_eq!(parsed.subject.as_deref(), Some("\"hi\""));
        assert_eq!(parsed.comment, vec![Element::Plain("a\nb".to_string())]);

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["comment"][0]["kind"], "plain");

        assert!(parse_thread(b"[]").is_err());
    }
}
