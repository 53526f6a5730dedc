use crate::board::{run_archive_command, run_boards_command, run_catalog_command};
use crate::comment::run_comment_command;
use crate::config::{load_config, OutputFormat};
use crate::media::run_media_command;
use crate::parse::run_parse_command;
use crate::search::run_search_command;
use crate::thread::run_thread_command;
use anyhow::{Context, Result};
use clap::{arg, ArgAction};
use clap::{Args, Parser, Subcommand};
use fc_api::{Client, ClientOptions};
use fc_types::PostNumber;
use tracing::trace;

///////// Groups /////////

#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct CommentSourceGroups {
    #[arg(help = "Raw comment text")]
    pub text: Option<String>,

    #[arg(short = 'f', long = "file", help = "Read raw comment text from file")]
    pub file: Option<String>,
}

///////// Args /////////

#[derive(Clone, Debug, Args)]
pub struct BoardArgs {
    #[arg(help = "Board name without slashes, e.g. g")]
    pub board: String,
}

#[derive(Clone, Debug, Args)]
pub struct ThreadArgs {
    #[arg(help = "Board name without slashes, e.g. g")]
    pub board: String,

    #[arg(help = "Thread number, the number of the opening post. Accepts more than one", required = true)]
    pub no: Vec<PostNumber>,

    #[arg(
        short = 'i',
        long = "images-only",
        help = "Only show posts carrying an image worth showing",
        default_value = "false",
        action = ArgAction::SetTrue,
    )]
    pub images_only: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    #[arg(help = "Text to search")]
    pub query: String,

    #[arg(short = 'b', long = "board", help = "Only search on this board")]
    pub board: Option<String>,

    #[arg(long = "offset", help = "Skip this many results")]
    pub offset: Option<u32>,

    #[arg(long = "length", help = "Max results to return")]
    pub length: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct CommentArgs {
    #[command(flatten)]
    pub source: CommentSourceGroups,
}

#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    #[arg(help = "Path to a saved thread json file")]
    pub file: String,
}

#[derive(Clone, Debug, Args)]
pub struct MediaArgs {
    #[arg(help = "Board name without slashes, e.g. g")]
    pub board: String,

    #[arg(help = "Renamed filename of the file, the `tim` field of post")]
    pub tim: i64,

    #[arg(help = "File extension with the leading dot, e.g. .jpg")]
    pub ext: String,

    #[arg(short = 'o', long = "output", help = "File path to save downloaded content")]
    pub output: String,

    #[arg(
        short = 't',
        long = "thumbnail",
        help = "Download the thumbnail instead of the file",
        default_value = "false",
        action = ArgAction::SetTrue,
    )]
    pub thumbnail: bool,
}

///////// Subcommand /////////

#[derive(Clone, Debug, Parser)]
pub struct Cli {
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        help = "Path to the toml config file"
    )]
    pub config: Option<String>,

    #[arg(
        long = "format",
        global = true,
        help = "Output format, overrides the one in config"
    )]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    #[command(about = "list all boards")]
    Boards,

    #[command(about = "list opening posts of every thread on board")]
    Catalog(BoardArgs),

    #[command(about = "fetch every post in thread")]
    Thread(ThreadArgs),

    #[command(about = "list archived thread numbers on board")]
    Archive(BoardArgs),

    #[command(about = "search posts")]
    Search(SearchArgs),

    #[command(about = "parse comment markup and print the elements")]
    Comment(CommentArgs),

    #[command(about = "parse post data from saved thread json file")]
    Parse(ParseArgs),

    #[command(about = "download file or thumbnail attached to post")]
    Media(MediaArgs),
}

/// Main entry of all subcommands.
pub async fn run_command_with_args(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref()).await?;
    if let Some(format) = cli.format {
        config.output = format;
    }
    trace!("running with config: {config:?}");
    let format = config.output;
    let options = config.client;

    match cli.command {
        Command::Boards => run_boards_command(&build_client(options)?, format).await,
        Command::Catalog(args) => {
            run_catalog_command(&build_client(options)?, args, format).await
        }
        Command::Thread(args) => run_thread_command(&build_client(options)?, args, format).await,
        Command::Archive(args) => {
            run_archive_command(&build_client(options)?, args, format).await
        }
        Command::Search(args) => run_search_command(&build_client(options)?, args, format).await,
        Command::Comment(args) => run_comment_command(args, format).await,
        Command::Parse(args) => run_parse_command(args, format).await,
        Command::Media(args) => run_media_command(&build_client(options)?, args).await,
    }
}

fn build_client(options: ClientOptions) -> Result<Client> {
    Client::new(options).context("when building api client")
}
