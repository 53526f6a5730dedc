use crate::cmd::BoardArgs;
use crate::config::OutputFormat;
use crate::render::{render_board, render_post};
use crate::utils::print_output;
use anyhow::{Context, Result};
use fc_api::board::Boards;
use fc_api::thread::{Archive, Catalog};
use fc_api::Client;
use std::fmt::Write;
use tracing::trace;

pub async fn run_boards_command(client: &Client, format: OutputFormat) -> Result<()> {
    let boards = client.boards().await.context("when fetching boards")?;
    print_output(&boards, format, render_boards)
}

pub async fn run_catalog_command(
    client: &Client,
    args: BoardArgs,
    format: OutputFormat,
) -> Result<()> {
    trace!("running catalog command with args: {args:?}");
    let catalog = client
        .catalog(args.board.as_str())
        .await
        .with_context(|| format!("when fetching catalog of /{}/", args.board))?;
    print_output(&catalog, format, render_catalog)
}

pub async fn run_archive_command(
    client: &Client,
    args: BoardArgs,
    format: OutputFormat,
) -> Result<()> {
    trace!("running archive command with args: {args:?}");
    let archive = client
        .archive(args.board.as_str())
        .await
        .with_context(|| format!("when fetching archive of /{}/", args.board))?;
    print_output(&archive, format, render_archive)
}

fn render_boards(boards: &Boards) -> String {
    boards
        .boards
        .iter()
        .map(render_board)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for page in catalog {
        let _ = writeln!(out, "===== page {} =====", page.page);
        for op in page.threads.iter() {
            let _ = writeln!(out, "{}", render_post(op));
            let _ = writeln!(
                out,
                "({} replies, {} images)\n",
                op.replies.unwrap_or_default(),
                op.images.unwrap_or_default()
            );
        }
    }
    out.trim_end().to_string()
}

fn render_archive(archive: &Archive) -> String {
    archive
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_catalog() {
        let catalog: Catalog = serde_json::from_str(
            r#"[{"page": 1, "threads": [
                {"no": 1, "com": "first", "replies": 3, "images": 1},
                {"no": 2}
            ]}]"#,
        )
        .unwrap();
        assert_eq!(
            render_catalog(&catalog),
            "===== page 1 =====\nNo.1\nfirst\n(3 replies, 1 images)\n\nNo.2\n(0 replies, 0 images)"
        );
        assert_eq!(render_catalog(&vec![]), "");
    }

    #[test]
    fn test_render_archive_and_boards() {
        assert_eq!(render_archive(&vec![3, 2, 1]), "3\n2\n1");
        assert_eq!(render_boards(&Boards::default()), "");
    }
}
