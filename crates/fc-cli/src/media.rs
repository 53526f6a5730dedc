use crate::cmd::MediaArgs;
use anyhow::{Context, Result};
use fc_api::Client;
use tokio::fs;
use tracing::{debug, trace};

pub async fn run_media_command(client: &Client, args: MediaArgs) -> Result<()> {
    trace!("running media command with args: {args:?}");
    let board = args.board.as_str();
    let data = if args.thumbnail {
        client.thumbnail_data(board, args.tim).await
    } else {
        client.image_data(board, args.tim, args.ext.as_str()).await
    }
    .with_context(|| format!("when downloading {}{} on /{board}/", args.tim, args.ext))?;

    fs::write(args.output.as_str(), data.as_slice())
        .await
        .with_context(|| format!("when saving to {}", args.output))?;
    debug!("saved {} bytes to {}", data.len(), args.output);
    println!("saved to {}", args.output);
    Ok(())
}
