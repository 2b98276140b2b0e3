pub mod api_client;
mod commands;
pub mod error;
pub mod utils;


use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, FileConfig, Overrides};
use crate::extract::{ExtractMode, Extractor};

use self::api_client::ApiClient;
use self::commands::note::CreateNoteRequest;
use self::error::CliError;

#[derive(Parser)]
#[command(name = "jot")]
#[command(author, version, about = "Notes and action items extracted from free text", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: JOT_API_URL env or http://localhost:3737)
    #[arg(long, global = true, env = "JOT_API_URL")]
    pub api_url: Option<String>,

    /// YAML config file (default: $XDG_CONFIG_HOME/jot/config.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct DbArgs {
    /// Database file path (default: $XDG_DATA_HOME/jot/jot.db)
    #[arg(long, env = "JOT_DB")]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API, MCP endpoint and web UI
    Serve {
        /// Host address to bind to
        #[arg(long)]
        host: Option<IpAddr>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Serve interactive API docs at /docs
        #[arg(long)]
        docs: bool,
        #[command(flatten)]
        db: DbArgs,
    },
    /// Run an MCP server on stdin/stdout
    Mcp {
        #[command(flatten)]
        db: DbArgs,
    },
    /// Extract action items from text locally (nothing is stored)
    Extract {
        /// Text to scan (reads stdin when neither TEXT nor --file is given)
        text: Option<String>,
        /// Read the text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Rule set: lines or keywords
        #[arg(long, default_value = "lines")]
        mode: ExtractMode,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Note management commands
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Action item commands
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// List notes, newest first
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create a note
    Add {
        /// Note title
        title: String,
        /// Note body (reads --file or stdin when omitted)
        content: Option<String>,
        /// Read the body from a file
        #[arg(long, conflicts_with = "content")]
        file: Option<PathBuf>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Show one note
    Show {
        id: i64,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Search titles and bodies (case-insensitive)
    Search {
        /// Search query
        query: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Delete a note; its action items are kept
    Delete {
        id: i64,
        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ItemCommands {
    /// List action items
    List {
        /// Only items from this note
        #[arg(long)]
        note: Option<i64>,
        /// Only open items
        #[arg(long, conflicts_with = "done")]
        open: bool,
        /// Only completed items
        #[arg(long)]
        done: bool,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Mark an action item as done
    Complete {
        /// Action item ID
        id: i64,
    },
}

/// `--open`/`--done` as a completion filter.
fn completion_filter(open: bool, done: bool) -> Option<bool> {
    match (open, done) {
        (true, _) => Some(false),
        (_, true) => Some(true),
        _ => None,
    }
}

fn resolve_config(cli: &Cli, overrides: Overrides) -> miette::Result<AppConfig> {
    let file = FileConfig::discover(cli.config.as_deref())?;
    Ok(AppConfig::resolve(
        file,
        Overrides {
            verbosity: cli.verbose,
            ..overrides
        },
    ))
}

pub async fn run() -> miette::Result<()> {
    let mut cli = Cli::parse();

    let Some(command) = cli.command.take() else {
        // Show help when no command provided
        let _ = Cli::parse_from(["jot", "--help"]);
        return Ok(());
    };

    let output = match command {
        Commands::Serve {
            host,
            port,
            docs,
            db,
        } => {
            let config = resolve_config(
                &cli,
                Overrides {
                    host,
                    port,
                    db_path: db.db,
                    enable_docs: docs,
                    ..Overrides::default()
                },
            )?;
            return commands::serve::serve(config).await;
        }
        Commands::Mcp { db } => {
            let config = resolve_config(
                &cli,
                Overrides {
                    db_path: db.db,
                    ..Overrides::default()
                },
            )?;
            return commands::mcp::mcp(config).await;
        }
        Commands::Extract {
            text,
            file,
            mode,
            format,
        } => {
            let config = resolve_config(&cli, Overrides::default())?;
            let input = commands::extract::read_input(text, file.as_deref())?;
            commands::extract::extract(&Extractor::new(config.rules), &input, mode, &format)?
        }
        Commands::Note { command } => {
            let api_client = ApiClient::new(cli.api_url.clone());
            run_note(&api_client, command).await?
        }
        Commands::Item { command } => {
            let api_client = ApiClient::new(cli.api_url.clone());
            match command {
                ItemCommands::List {
                    note,
                    open,
                    done,
                    format,
                } => {
                    commands::item::list_items(
                        &api_client,
                        note,
                        completion_filter(open, done),
                        &format,
                    )
                    .await?
                }
                ItemCommands::Complete { id } => {
                    commands::item::complete_item(&api_client, id).await?
                }
            }
        }
    };

    println!("{}", output);
    Ok(())
}

async fn run_note(api_client: &ApiClient, command: NoteCommands) -> Result<String, CliError> {
    match command {
        NoteCommands::List { format } => commands::note::list_notes(api_client, &format).await,
        NoteCommands::Add {
            title,
            content,
            file,
            tags,
        } => {
            let content = commands::extract::read_input(content, file.as_deref())?;
            let request = CreateNoteRequest {
                title,
                content,
                tags: utils::parse_tags(tags.as_deref()),
            };
            commands::note::create_note(api_client, request).await
        }
        NoteCommands::Show { id, format } => commands::note::get_note(api_client, id, &format).await,
        NoteCommands::Search { query, format } => {
            commands::note::search_notes(api_client, &query, &format).await
        }
        NoteCommands::Delete { id, force } => {
            commands::note::delete_note(api_client, id, force).await
        }
    }
}
