use crate::cmd::CommentArgs;
use crate::config::OutputFormat;
use crate::render::render_elements;
use crate::utils::print_output;
use anyhow::{Context, Result};
use fc_comment::parse_comment;
use tokio::fs;
use tracing::trace;

pub async fn run_comment_command(args: CommentArgs, format: OutputFormat) -> Result<()> {
    trace!("running comment command with args: {args:?}");
    let text = match (args.source.text, args.source.file) {
        (Some(text), _) => text,
        (None, Some(file)) => fs::read_to_string(file.as_str())
            .await
            .with_context(|| format!("when reading comment file {file}"))?,
        (None, None) => String::new(),
    };

    let elements = parse_comment(text.as_str());
    trace!("parsed {} elements", elements.len());
    print_output(&elements, format, |x| render_elements(x.as_slice()))
}
